//! Fetch collaborator contract and in-memory adapters.

use std::{future::Future, pin::Pin, rc::Rc};

use crate::models::{ErrorInfo, ListPage, RequestDescriptor};

/// Object-safe boxed future used by [`ListFetcher`].
pub type ListFetchFuture<'a, T> = Pin<Box<dyn Future<Output = Result<ListPage<T>, ErrorInfo>> + 'a>>;

/// Caller-supplied data source for one page of a list.
///
/// The core never constructs network requests itself; it hands a [`RequestDescriptor`] to the
/// fetcher and commits whatever comes back.
pub trait ListFetcher<T> {
    /// Fetches the page described by `request`.
    fn fetch_page<'a>(&'a self, request: &'a RequestDescriptor) -> ListFetchFuture<'a, T>;
}

/// Adapts a closure `Fn(RequestDescriptor) -> impl Future` into a [`ListFetcher`].
pub struct FnListFetcher<F> {
    fetch: F,
}

impl<F> FnListFetcher<F> {
    /// Wraps `fetch`.
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<T, F, Fut> ListFetcher<T> for FnListFetcher<F>
where
    F: Fn(RequestDescriptor) -> Fut,
    Fut: Future<Output = Result<ListPage<T>, ErrorInfo>> + 'static,
{
    fn fetch_page<'a>(&'a self, request: &'a RequestDescriptor) -> ListFetchFuture<'a, T> {
        Box::pin((self.fetch)(request.clone()))
    }
}

type ItemMatcher<T> = Rc<dyn Fn(&T, &RequestDescriptor) -> bool>;
type ItemOrdering<T> = Rc<dyn Fn(&T, &T, &RequestDescriptor) -> std::cmp::Ordering>;

/// In-memory fetcher that pages over a fixed item vector.
///
/// Filtering and sorting are opt-in via [`MemoryListFetcher::with_matcher`] and
/// [`MemoryListFetcher::with_ordering`]; without them every item matches in source order.
pub struct MemoryListFetcher<T> {
    items: Rc<Vec<T>>,
    matcher: Option<ItemMatcher<T>>,
    ordering: Option<ItemOrdering<T>>,
}

impl<T> Clone for MemoryListFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
            matcher: self.matcher.clone(),
            ordering: self.ordering.clone(),
        }
    }
}

impl<T: Clone> MemoryListFetcher<T> {
    /// Fetcher over `items`.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(items),
            matcher: None,
            ordering: None,
        }
    }

    /// Keeps only items for which `matcher(item, request)` holds.
    pub fn with_matcher(mut self, matcher: impl Fn(&T, &RequestDescriptor) -> bool + 'static) -> Self {
        self.matcher = Some(Rc::new(matcher));
        self
    }

    /// Orders matching items with `ordering(a, b, request)` before paging.
    pub fn with_ordering(
        mut self,
        ordering: impl Fn(&T, &T, &RequestDescriptor) -> std::cmp::Ordering + 'static,
    ) -> Self {
        self.ordering = Some(Rc::new(ordering));
        self
    }

    /// Synchronously computes the page for `request`.
    pub fn page_for(&self, request: &RequestDescriptor) -> ListPage<T> {
        let mut matching: Vec<&T> = self
            .items
            .iter()
            .filter(|item| {
                self.matcher
                    .as_ref()
                    .map_or(true, |matcher| matcher(item, request))
            })
            .collect();
        if let Some(ordering) = &self.ordering {
            matching.sort_by(|a, b| ordering(a, b, request));
        }

        let total_items = matching.len();
        let items = matching
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .cloned()
            .collect();
        ListPage { items, total_items }
    }
}

impl<T: Clone> ListFetcher<T> for MemoryListFetcher<T> {
    fn fetch_page<'a>(&'a self, request: &'a RequestDescriptor) -> ListFetchFuture<'a, T> {
        Box::pin(async move { Ok(self.page_for(request)) })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{FilterValue, SortDirection, SortSpec};

    fn request(page: usize, page_size: usize) -> RequestDescriptor {
        RequestDescriptor {
            page,
            page_size,
            filters: BTreeMap::new(),
            sort: None,
        }
    }

    #[test]
    fn memory_fetcher_pages_over_items() {
        let fetcher = MemoryListFetcher::new((1..=25).collect::<Vec<u32>>());
        let fetcher_obj: &dyn ListFetcher<u32> = &fetcher;

        let page = block_on(fetcher_obj.fetch_page(&request(3, 10))).expect("page");
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_items, 25);

        let past_end = block_on(fetcher_obj.fetch_page(&request(4, 10))).expect("page");
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_items, 25);
    }

    #[test]
    fn memory_fetcher_applies_matcher_and_ordering() {
        let fetcher = MemoryListFetcher::new(vec!["pear", "apple", "plum", "banana"])
            .with_matcher(|item, request| match request.filters.get("prefix") {
                Some(FilterValue::Text(prefix)) => item.starts_with(prefix.as_str()),
                _ => true,
            })
            .with_ordering(|a, b, request| match &request.sort {
                Some(sort) if sort.direction == SortDirection::Desc => b.cmp(a),
                _ => a.cmp(b),
            });

        let mut req = request(1, 10);
        req.filters
            .insert("prefix".to_string(), FilterValue::text("p"));
        req.sort = Some(SortSpec::new("name", SortDirection::Desc));

        let page = fetcher.page_for(&req);
        assert_eq!(page.items, vec!["plum", "pear"]);
        assert_eq!(page.total_items, 2);
    }

    #[test]
    fn fn_fetcher_forwards_owned_descriptor() {
        let fetcher = FnListFetcher::new(|request: RequestDescriptor| async move {
            if request.page > 1 {
                Err(ErrorInfo::new("out of range"))
            } else {
                Ok(ListPage::new(vec![request.page_size], 1))
            }
        });

        let ok = block_on(ListFetcher::<usize>::fetch_page(&fetcher, &request(1, 5)));
        assert_eq!(ok, Ok(ListPage::new(vec![5], 1)));
        let err = block_on(ListFetcher::<usize>::fetch_page(&fetcher, &request(2, 5)));
        assert_eq!(err, Err(ErrorInfo::new("out of range")));
    }
}
