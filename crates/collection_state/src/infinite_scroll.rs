//! Append-only page loading for infinite scroll.

use collection_host::{ErrorInfo, ListPage, RequestDescriptor};

use crate::{
    config::InfiniteScrollConfig,
    error::InvalidArgument,
    filters::FilterState,
    resource_list::{CommitOutcome, RequestTicket},
};

#[derive(Debug, Clone)]
/// Accumulated items plus the cursor for the next page.
///
/// `page` is the last loaded page number and stays 0 until the first page commits.
pub struct InfiniteScroll<T> {
    config: InfiniteScrollConfig,
    filters: FilterState,
    items: Vec<T>,
    page: usize,
    has_more: bool,
    loading: bool,
    error: Option<ErrorInfo>,
    sequence: u64,
    in_flight: Option<u64>,
    revision: u64,
    disposed: bool,
}

impl<T> InfiniteScroll<T> {
    /// # Errors
    ///
    /// Returns [`InvalidArgument::ZeroPageSize`] for a zero configured page size.
    pub fn new(config: InfiniteScrollConfig) -> Result<Self, InvalidArgument> {
        if config.page_size == 0 {
            return Err(InvalidArgument::ZeroPageSize);
        }
        Ok(Self {
            config,
            filters: FilterState::default(),
            items: Vec::new(),
            page: 0,
            has_more: true,
            loading: false,
            error: None,
            sequence: 0,
            in_flight: None,
            revision: 0,
            disposed: false,
        })
    }

    pub fn config(&self) -> &InfiniteScrollConfig {
        &self.config
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Last loaded page; 0 before the first page commits.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Issues a ticket for the next page.
    ///
    /// Returns `None` while a load is in flight, once the source is exhausted, or after disposal.
    pub fn load_more(&mut self) -> Option<RequestTicket> {
        if self.disposed || self.loading || !self.has_more {
            return None;
        }
        self.sequence += 1;
        self.in_flight = Some(self.sequence);
        self.loading = true;
        self.revision += 1;
        Some(RequestTicket {
            sequence: self.sequence,
            descriptor: RequestDescriptor {
                page: self.page + 1,
                page_size: self.config.page_size,
                filters: self.filters.values().clone(),
                sort: self.filters.sort(),
            },
        })
    }

    /// Sentinel-visibility trigger: loads the next page when `visible` is `true`.
    pub fn on_visibility(&mut self, visible: bool) -> Option<RequestTicket> {
        if visible {
            self.load_more()
        } else {
            None
        }
    }

    /// Offers a fetch result for `ticket`.
    ///
    /// Success appends the page and sets `has_more` from whether a full page came back. Failure
    /// keeps `has_more` untouched so the same page can be retried.
    pub fn commit(
        &mut self,
        ticket: &RequestTicket,
        result: Result<ListPage<T>, ErrorInfo>,
    ) -> CommitOutcome {
        if self.disposed {
            return CommitOutcome::Cancelled;
        }
        if ticket.sequence != self.sequence || self.in_flight != Some(ticket.sequence) {
            return CommitOutcome::Stale;
        }

        self.in_flight = None;
        self.loading = false;
        self.revision += 1;
        match result {
            Ok(page) => {
                let returned = page.items.len();
                self.items.extend(page.items);
                self.page = ticket.descriptor.page;
                self.has_more = returned == self.config.page_size;
                self.error = None;
                CommitOutcome::Applied
            }
            Err(error) => {
                self.error = Some(error);
                CommitOutcome::Failed
            }
        }
    }

    /// Clears accumulated items. Tickets issued before the reset become stale.
    pub fn reset(&mut self) {
        self.sequence += 1;
        self.in_flight = None;
        self.items.clear();
        self.page = 0;
        self.has_more = true;
        self.loading = false;
        self.error = None;
        self.revision += 1;
    }

    /// Replaces the filters, resetting when they differ. Returns `true` on reset.
    pub fn set_filters(&mut self, filters: FilterState) -> bool {
        if filters == self.filters {
            return false;
        }
        self.filters = filters;
        self.reset();
        true
    }

    pub fn dispose(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        self.in_flight = None;
        self.loading = false;
        self.revision += 1;
        true
    }
}
