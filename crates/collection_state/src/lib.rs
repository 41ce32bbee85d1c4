//! Headless state machines for paginated, filtered, selectable, and virtualized collections.
//!
//! Nothing in this crate touches a browser, a router, or a reactive runtime. Each state type is
//! mutated through methods (or, for [`ResourceList`], the [`reduce_resource_list`] reducer) that
//! report whether anything changed, and asynchronous work is expressed as sequence-numbered
//! [`RequestTicket`]s that the host executes and commits back.

pub mod config;
pub mod debounce;
pub mod driver;
pub mod error;
pub mod filters;
pub mod infinite_scroll;
pub mod pagination;
pub mod resource_list;
pub mod selection;
pub mod virtual_window;

pub use config::{
    DebounceConfig, FilterConfig, FilterField, FilterFieldKind, InfiniteScrollConfig,
    PaginationConfig, ResourceListConfig, VirtualListConfig,
};
pub use debounce::{DebounceTicket, Debouncer};
pub use driver::{fetch_ticket, FetchResolution};
pub use error::InvalidArgument;
pub use filters::{
    from_query, merge_into_query, overlay_query, to_query, validate_filter_key, FilterState,
};
pub use infinite_scroll::InfiniteScroll;
pub use pagination::{PageItem, PaginationState};
pub use resource_list::{
    reduce_resource_list, CommitOutcome, FetchStatus, ListAction, ListEffect, ListResult,
    RequestTicket, ResourceList,
};
pub use selection::SelectionState;
pub use virtual_window::{
    columns_for_width, compute_grid_window, compute_window, compute_window_with, GridWindow,
    VirtualWindow,
};
