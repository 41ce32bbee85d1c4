//! Leptos hooks over the headless state machines in [`collection_state`].
//!
//! Each hook owns its state in a signal, mutates it by cloning the current value, applying one
//! state-machine operation, and writing back only when something changed. Fetches run on
//! `spawn_local`; results are committed against the ticket that started them, so superseded or
//! torn-down requests never reach the UI.

mod commit;
pub mod debounced;
pub mod filters;
pub mod infinite_scroll;
pub mod pagination;
pub mod resource_list;
pub mod selection;
pub mod virtual_list;

pub use debounced::use_debounced;
pub use filters::{use_filters, use_url_filters, FiltersHandle};
pub use infinite_scroll::{use_infinite_scroll, InfiniteScrollHandle};
pub use pagination::{use_pagination_state, PaginationHandle};
pub use resource_list::{use_resource_list, ResourceListHandle};
pub use selection::{use_bulk_selection, SelectionHandle};
pub use virtual_list::{use_virtual_grid, use_virtual_list, VirtualGridHandle, VirtualListHandle};
