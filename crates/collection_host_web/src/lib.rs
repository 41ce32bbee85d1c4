//! Browser (`wasm32`) implementations of [`collection_host`] contracts.
//!
//! On non-wasm targets every adapter degrades to an inert fallback so the hook crate and its
//! tests build natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod query;
pub mod scroll;

pub use query::BrowserQueryStore;
pub use scroll::{element_metrics, ScrollMetrics};
