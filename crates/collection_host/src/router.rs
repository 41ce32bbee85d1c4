//! Router/history collaborator used by URL-synchronized filter state.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::query::QueryParams;

/// Reads and writes the current URL query string.
///
/// Absence of a real router is modelled with [`NoopQueryStore`]; in-memory behavior of the filter
/// state does not depend on this collaborator.
pub trait QueryStore {
    /// Returns the current query parameters.
    fn read_query(&self) -> QueryParams;

    /// Replaces the current query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying history/router rejects the write.
    fn write_query(&self, params: &QueryParams) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Query store that never persists anything. Disables URL synchronization.
pub struct NoopQueryStore;

impl QueryStore for NoopQueryStore {
    fn read_query(&self) -> QueryParams {
        QueryParams::new()
    }

    fn write_query(&self, _params: &QueryParams) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory query store for tests and non-browser hosts.
pub struct MemoryQueryStore {
    inner: Rc<RefCell<QueryParams>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryQueryStore {
    /// Store seeded with `initial`.
    pub fn new(initial: QueryParams) -> Self {
        Self {
            inner: Rc::new(RefCell::new(initial)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    /// Store seeded from a raw query string.
    pub fn from_query_string(raw: &str) -> Self {
        Self::new(QueryParams::parse(raw))
    }

    /// Current contents serialized as a query string.
    pub fn query_string(&self) -> String {
        self.inner.borrow().to_query_string()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl QueryStore for MemoryQueryStore {
    fn read_query(&self) -> QueryParams {
        self.inner.borrow().clone()
    }

    fn write_query(&self, params: &QueryParams) -> Result<(), String> {
        *self.inner.borrow_mut() = params.clone();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
