//! Collaborator contracts and shared models for list/collection state.
//!
//! This crate is the API-first boundary between the headless state machines in
//! `collection_state` and the outside world. It defines the request/response models handed to an
//! injected fetcher, the query-string codec used for URL synchronization, and the router
//! collaborator trait. Concrete browser adapters live in `collection_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fetch;
pub mod models;
pub mod query;
pub mod router;

pub use fetch::{FnListFetcher, ListFetchFuture, ListFetcher, MemoryListFetcher};
pub use models::{ErrorInfo, FilterValue, ListPage, RequestDescriptor, SortDirection, SortSpec};
pub use query::QueryParams;
pub use router::{MemoryQueryStore, NoopQueryStore, QueryStore};
