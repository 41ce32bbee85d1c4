//! Fetch orchestration over pagination + filters.
//!
//! [`ResourceList`] owns one [`PaginationState`] and one [`FilterState`], derives a
//! [`RequestDescriptor`] from them, and issues sequence-numbered [`RequestTicket`]s when the
//! descriptor changes. Results come back through [`ResourceList::commit`], which only accepts the
//! most recently issued ticket.

mod reducer;

use collection_host::{ErrorInfo, ListPage, RequestDescriptor};
use serde::{Deserialize, Serialize};

use crate::{
    config::ResourceListConfig, error::InvalidArgument, filters::FilterState,
    pagination::PaginationState,
};

pub use reducer::{reduce_resource_list, ListAction, ListEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Fetch life-cycle phase.
pub enum FetchStatus {
    /// Nothing issued yet.
    #[default]
    Idle,
    /// A ticket is in flight.
    Loading,
    /// The latest ticket resolved with data.
    Success,
    /// The latest ticket resolved with an error.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Items plus fetch status exposed to rendering code.
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub loading: bool,
    pub error: Option<ErrorInfo>,
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// An issued request: descriptor plus the sequence number that guards its commit.
pub struct RequestTicket {
    pub sequence: u64,
    pub descriptor: RequestDescriptor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Result of offering a fetch result to [`ResourceList::commit`].
pub enum CommitOutcome {
    /// Data committed.
    Applied,
    /// Error committed; previous items kept.
    Failed,
    /// A newer ticket was issued after this one; nothing changed.
    Stale,
    /// The list was disposed; nothing changed.
    Cancelled,
}

impl CommitOutcome {
    /// `true` when state was written.
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Applied | Self::Failed)
    }
}

#[derive(Debug, Clone)]
/// Resource-list orchestrator state.
pub struct ResourceList<T> {
    config: ResourceListConfig,
    pagination: PaginationState,
    filters: FilterState,
    result: ListResult<T>,
    status: FetchStatus,
    last_issued: Option<RequestDescriptor>,
    sequence: u64,
    in_flight: Option<u64>,
    revision: u64,
    disposed: bool,
}

impl<T> ResourceList<T> {
    /// Builds an idle list from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::ZeroPageSize`] for a zero configured page size.
    pub fn new(config: ResourceListConfig) -> Result<Self, InvalidArgument> {
        let pagination = PaginationState::from_config(&config.pagination)?;
        let filters = FilterState::from_config(&config.filters);
        Ok(Self {
            config,
            pagination,
            filters,
            result: ListResult::default(),
            status: FetchStatus::Idle,
            last_issued: None,
            sequence: 0,
            in_flight: None,
            revision: 0,
            disposed: false,
        })
    }

    pub fn config(&self) -> &ResourceListConfig {
        &self.config
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn result(&self) -> &ListResult<T> {
        &self.result
    }

    pub fn items(&self) -> &[T] {
        &self.result.items
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.result.loading
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.result.error.as_ref()
    }

    /// Monotonic counter bumped on every observable state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sequence number of the most recently issued ticket (0 before the first).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Descriptor derived from the current pagination and filters.
    pub fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor {
            page: self.pagination.page(),
            page_size: self.pagination.page_size(),
            filters: self.filters.values().clone(),
            sort: self.filters.sort(),
        }
    }

    /// Issues a ticket when the derived descriptor differs from the last issued one.
    pub fn evaluate(&mut self) -> Option<RequestTicket> {
        if self.disposed {
            return None;
        }
        let descriptor = self.descriptor();
        if self.last_issued.as_ref() == Some(&descriptor) {
            return None;
        }
        Some(self.issue(descriptor))
    }

    /// Re-issues the current descriptor even if unchanged.
    pub fn refetch(&mut self) -> Option<RequestTicket> {
        if self.disposed {
            return None;
        }
        let descriptor = self.descriptor();
        Some(self.issue(descriptor))
    }

    /// Offers a fetch result for `ticket`.
    ///
    /// Only the latest issued ticket may commit; anything older is [`CommitOutcome::Stale`]. After
    /// [`ResourceList::dispose`] every commit is [`CommitOutcome::Cancelled`].
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
        self.result.loading = false;
        self.revision += 1;
        match result {
            Ok(page) => {
                self.result.items = page.items;
                self.result.total_items = page.total_items;
                self.result.error = None;
                self.status = FetchStatus::Success;
                self.pagination.set_total(page.total_items);
                CommitOutcome::Applied
            }
            Err(error) => {
                self.result.error = Some(error);
                self.status = FetchStatus::Error;
                CommitOutcome::Failed
            }
        }
    }

    /// Marks the list torn down. In-flight and future results are discarded.
    pub fn dispose(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        self.in_flight = None;
        if self.result.loading {
            self.result.loading = false;
            self.revision += 1;
        }
        true
    }

    fn issue(&mut self, descriptor: RequestDescriptor) -> RequestTicket {
        self.sequence += 1;
        self.in_flight = Some(self.sequence);
        self.last_issued = Some(descriptor.clone());
        self.result.loading = true;
        self.status = FetchStatus::Loading;
        self.revision += 1;
        RequestTicket {
            sequence: self.sequence,
            descriptor,
        }
    }

    fn touch(&mut self, changed: bool) -> bool {
        if changed {
            self.revision += 1;
        }
        changed
    }
}
