//! Async glue between issued tickets and the fetch collaborator.

use collection_host::{ErrorInfo, ListFetcher, ListPage};

use crate::{
    infinite_scroll::InfiniteScroll,
    resource_list::{CommitOutcome, RequestTicket, ResourceList},
};

#[derive(Debug, Clone, PartialEq)]
/// A ticket paired with what the fetcher returned for it.
pub struct FetchResolution<T> {
    pub ticket: RequestTicket,
    pub result: Result<ListPage<T>, ErrorInfo>,
}

impl<T> FetchResolution<T> {
    /// Commits into a paginated list.
    pub fn commit_to(self, list: &mut ResourceList<T>) -> CommitOutcome {
        list.commit(&self.ticket, self.result)
    }

    /// Commits into an infinite-scroll accumulator.
    pub fn append_to(self, scroll: &mut InfiniteScroll<T>) -> CommitOutcome {
        scroll.commit(&self.ticket, self.result)
    }
}

/// Runs `fetcher` for `ticket`. Errors are carried in the resolution, never returned.
pub async fn fetch_ticket<T, F>(fetcher: &F, ticket: RequestTicket) -> FetchResolution<T>
where
    F: ListFetcher<T> + ?Sized,
{
    let result = fetcher.fetch_page(&ticket.descriptor).await;
    FetchResolution { ticket, result }
}

#[cfg(test)]
mod tests {
    use collection_host::{FnListFetcher, MemoryListFetcher};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::{InfiniteScrollConfig, ResourceListConfig};

    #[test]
    fn memory_fetch_commits_into_list() {
        let fetcher = MemoryListFetcher::new((1..=45).collect::<Vec<u32>>());
        let mut list = ResourceList::new(ResourceListConfig::default()).expect("list");
        let ticket = list.evaluate().expect("ticket");

        let resolution = block_on(fetch_ticket(&fetcher, ticket));
        assert_eq!(resolution.commit_to(&mut list), CommitOutcome::Applied);
        assert_eq!(list.items().len(), 20);
        assert_eq!(list.pagination().total_pages(), 3);
    }

    #[test]
    fn fetch_failure_lands_in_state() {
        let fetcher = FnListFetcher::new(|_request| async {
            Err::<ListPage<u32>, _>(ErrorInfo::new("503").with_code("unavailable"))
        });
        let mut scroll = InfiniteScroll::new(InfiniteScrollConfig::default()).expect("scroll");
        let ticket = scroll.load_more().expect("ticket");

        let resolution = block_on(fetch_ticket(&fetcher, ticket));
        assert_eq!(resolution.append_to(&mut scroll), CommitOutcome::Failed);
        assert_eq!(
            scroll.error().and_then(|e| e.code.as_deref()),
            Some("unavailable")
        );
    }
}
