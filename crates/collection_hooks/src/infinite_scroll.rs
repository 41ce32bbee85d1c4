//! `use_infinite_scroll`: append-on-demand loading bound to Leptos.

use std::rc::Rc;

use collection_host::{ErrorInfo, ListFetcher};
use collection_host_web::ScrollMetrics;
use collection_state::{
    fetch_ticket, FilterState, InfiniteScroll, InfiniteScrollConfig, InvalidArgument,
    RequestTicket,
};
use leptos::*;

use crate::commit::commit;

/// Handle returned by [`use_infinite_scroll`].
pub struct InfiniteScrollHandle<T: 'static> {
    pub state: RwSignal<InfiniteScroll<T>>,
    fetcher: StoredValue<Rc<dyn ListFetcher<T>>>,
}

impl<T: 'static> Clone for InfiniteScrollHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for InfiniteScrollHandle<T> {}

/// Creates an infinite-scroll accumulator over `fetcher`.
///
/// When `filters` is given, every change restarts loading from the first page. The first page
/// loads on mount when `config.load_on_mount` is set.
///
/// # Errors
///
/// Returns [`InvalidArgument::ZeroPageSize`] for a zero configured page size.
pub fn use_infinite_scroll<T: Clone + 'static>(
    config: InfiniteScrollConfig,
    fetcher: Rc<dyn ListFetcher<T>>,
    filters: Option<Signal<FilterState>>,
) -> Result<InfiniteScrollHandle<T>, InvalidArgument> {
    let load_on_mount = config.load_on_mount;
    let mut scroll = InfiniteScroll::new(config)?;
    if let Some(filters) = filters {
        scroll.set_filters(filters.get_untracked());
    }

    let handle = InfiniteScrollHandle {
        state: create_rw_signal(scroll),
        fetcher: store_value(fetcher),
    };

    if let Some(filters) = filters {
        create_effect(move |previous: Option<()>| {
            let next = filters.get();
            if previous.is_none() {
                return;
            }
            if handle.update(|scroll| scroll.set_filters(next)) {
                handle.load_more();
            }
        });
    }

    if load_on_mount {
        handle.load_more();
    }

    on_cleanup(move || {
        handle.update(InfiniteScroll::dispose);
    });

    Ok(handle)
}

impl<T: Clone + 'static> InfiniteScrollHandle<T> {
    /// Requests the next page unless one is in flight or the source is exhausted.
    pub fn load_more(&self) -> bool {
        let mut ticket = None;
        self.update(|scroll| {
            ticket = scroll.load_more();
            ticket.is_some()
        });
        match ticket {
            Some(ticket) => {
                self.spawn_fetch(ticket);
                true
            }
            None => false,
        }
    }

    /// Sentinel-visibility trigger.
    pub fn on_visibility(&self, visible: bool) -> bool {
        visible && self.load_more()
    }

    /// Loads the next page once the container is within `threshold` pixels of its end.
    pub fn on_scroll(&self, metrics: ScrollMetrics, threshold: f64) -> bool {
        self.on_visibility(metrics.is_near_end(threshold))
    }

    /// Drops everything loaded so far; in-flight responses are discarded.
    pub fn reset(&self) {
        self.update(|scroll| {
            scroll.reset();
            true
        });
    }

    pub fn items(&self) -> Signal<Vec<T>> {
        let state = self.state;
        Signal::derive(move || state.with(|scroll| scroll.items().to_vec()))
    }

    pub fn has_more(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(InfiniteScroll::has_more))
    }

    pub fn loading(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(InfiniteScroll::is_loading))
    }

    pub fn error(&self) -> Signal<Option<ErrorInfo>> {
        let state = self.state;
        Signal::derive(move || state.with(|scroll| scroll.error().cloned()))
    }

    fn spawn_fetch(&self, ticket: RequestTicket) {
        let Some(fetcher) = self.fetcher.try_get_value() else {
            return;
        };
        let state = self.state;
        spawn_local(async move {
            let resolution = fetch_ticket(fetcher.as_ref(), ticket).await;
            let sequence = resolution.ticket.sequence;
            let Some(mut scroll) = state.try_get_untracked() else {
                return;
            };
            let outcome = resolution.append_to(&mut scroll);
            if outcome.is_committed() {
                state.set(scroll);
            } else {
                logging::log!("infinite scroll discarded response #{sequence}: {outcome:?}");
            }
        });
    }

    fn update(&self, mutate: impl FnOnce(&mut InfiniteScroll<T>) -> bool) -> bool {
        commit(self.state, mutate)
    }
}

#[cfg(test)]
mod tests {
    use collection_host::{FilterValue, MemoryListFetcher, RequestDescriptor};
    use pretty_assertions::assert_eq;

    use super::*;

    fn catalog() -> Rc<dyn ListFetcher<String>> {
        let items = (0..40)
            .map(|n| format!("{}-{n:02}", if n % 2 == 0 { "hats" } else { "shoes" }))
            .collect();
        Rc::new(
            MemoryListFetcher::new(items).with_matcher(|item: &String, request: &RequestDescriptor| {
                request
                    .filters
                    .get("category")
                    .and_then(FilterValue::as_text)
                    .map_or(true, |category| item.starts_with(category))
            }),
        )
    }

    #[test]
    fn filter_change_restarts_from_the_first_page() {
        let _ = create_runtime();
        let filters = create_rw_signal(FilterState::new());
        let feed = use_infinite_scroll(
            InfiniteScrollConfig {
                page_size: 15,
                load_on_mount: true,
            },
            catalog(),
            Some(filters.into()),
        )
        .expect("feed");

        assert_eq!(feed.items().get_untracked().len(), 15);
        assert!(feed.load_more());
        assert_eq!(feed.items().get_untracked().len(), 30);

        let mut shoes = FilterState::new();
        shoes.set_filter("category", "shoes").expect("filter");
        filters.set(shoes);

        let items = feed.items().get_untracked();
        assert_eq!(items.len(), 15);
        assert!(items.iter().all(|item| item.starts_with("shoes")));
        assert!(feed.has_more().get_untracked());

        assert!(feed.load_more());
        assert_eq!(feed.items().get_untracked().len(), 20);
        assert!(!feed.has_more().get_untracked());
        assert!(!feed.load_more());
    }

    #[test]
    fn scrolling_near_the_end_loads_the_next_page() {
        let _ = create_runtime();
        let feed = use_infinite_scroll(
            InfiniteScrollConfig {
                page_size: 10,
                load_on_mount: false,
            },
            catalog(),
            None,
        )
        .expect("feed");
        assert!(feed.items().get_untracked().is_empty());

        let far = ScrollMetrics {
            scroll_top: 0.0,
            client_height: 400.0,
            scroll_height: 2_000.0,
            client_width: 300.0,
        };
        assert!(!feed.on_scroll(far, 200.0));
        assert!(feed.on_scroll(
            ScrollMetrics {
                scroll_top: 1_500.0,
                ..far
            },
            200.0
        ));
        assert_eq!(feed.items().get_untracked().len(), 10);
        assert!(!feed.loading().get_untracked());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let _ = create_runtime();
        let result = use_infinite_scroll(
            InfiniteScrollConfig {
                page_size: 0,
                load_on_mount: true,
            },
            catalog(),
            None,
        );
        assert!(matches!(result, Err(InvalidArgument::ZeroPageSize)));
    }
}
