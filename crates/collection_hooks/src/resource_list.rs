//! `use_resource_list`: the paginated fetch orchestrator bound to Leptos.
//!
//! Actions go through [`reduce_resource_list`]; the reducer's effects are executed here. Fetches run
//! on `spawn_local` and commit back through the ticket that started them, followed by a
//! re-evaluation so a page clamped by a shrinking total is fetched again.

use std::rc::Rc;

use collection_host::{ErrorInfo, FilterValue, ListFetcher, QueryParams, QueryStore, SortDirection};
use collection_state::{
    fetch_ticket, overlay_query, reduce_resource_list, FetchStatus, FilterState, InvalidArgument,
    ListAction, ListEffect, PaginationState, RequestTicket, ResourceList, ResourceListConfig,
};
use leptos::*;

struct ListRuntime<T> {
    fetcher: Rc<dyn ListFetcher<T>>,
    query_store: Option<Rc<dyn QueryStore>>,
}

impl<T> Clone for ListRuntime<T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Rc::clone(&self.fetcher),
            query_store: self.query_store.clone(),
        }
    }
}

/// Handle returned by [`use_resource_list`].
pub struct ResourceListHandle<T: 'static> {
    /// Orchestrator state. Written only when an action or commit changes it.
    pub state: RwSignal<ResourceList<T>>,
    runtime: StoredValue<ListRuntime<T>>,
}

impl<T: 'static> Clone for ResourceListHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for ResourceListHandle<T> {}

/// Creates a resource list that fetches through `fetcher`.
///
/// With `config.sync_url` set and a `query_store` given, filters are hydrated from the URL on
/// mount and written back on change. The first page is requested immediately; the list is
/// disposed when the owning scope is cleaned up.
///
/// # Errors
///
/// Returns [`InvalidArgument::ZeroPageSize`] for a zero configured page size.
pub fn use_resource_list<T: Clone + 'static>(
    config: ResourceListConfig,
    fetcher: Rc<dyn ListFetcher<T>>,
    query_store: Option<Rc<dyn QueryStore>>,
) -> Result<ResourceListHandle<T>, InvalidArgument> {
    let list = ResourceList::new(config)?;
    let sync_url = list.config().sync_url;

    let handle = ResourceListHandle {
        state: create_rw_signal(list),
        runtime: store_value(ListRuntime {
            fetcher,
            query_store,
        }),
    };

    let initial = match handle.query_store() {
        Some(store) if sync_url => ListAction::HydrateQuery(store.read_query()),
        _ => ListAction::Evaluate,
    };
    handle.dispatch(initial)?;

    on_cleanup(move || handle.dispatch_logged(ListAction::Dispose));

    Ok(handle)
}

impl<T: Clone + 'static> ResourceListHandle<T> {
    /// Runs one reducer action and executes its effects.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] when the action is rejected; state is unchanged then.
    pub fn dispatch(&self, action: ListAction) -> Result<(), InvalidArgument> {
        for effect in self.reduce(action)? {
            self.run_effect(effect);
        }
        Ok(())
    }

    fn reduce(&self, action: ListAction) -> Result<Vec<ListEffect>, InvalidArgument> {
        let Some(mut list) = self.state.try_get_untracked() else {
            return Ok(Vec::new());
        };
        let revision = list.revision();
        let effects = reduce_resource_list(&mut list, action)?;
        if list.revision() != revision {
            self.state.set(list);
        }
        Ok(effects)
    }

    fn run_effect(&self, effect: ListEffect) {
        match effect {
            ListEffect::Fetch(ticket) => self.spawn_fetch(ticket),
            ListEffect::WriteQuery(params) => self.write_query(&params),
        }
    }

    fn write_query(&self, params: &QueryParams) {
        let Some(store) = self.query_store() else {
            return;
        };
        let existing = store.read_query();
        let Some(merged) = self
            .state
            .try_with_untracked(|list| overlay_query(params, &list.config().filters, &existing))
        else {
            return;
        };
        if let Err(err) = store.write_query(&merged) {
            logging::warn!("resource list query write failed: {err}");
        }
    }

    /// Fetches `ticket` and commits the result. Follow-up tickets issued by the post-commit
    /// evaluation (a page clamped by a smaller total) are fetched on the same task.
    fn spawn_fetch(&self, ticket: RequestTicket) {
        let Some(runtime) = self.runtime.try_get_value() else {
            return;
        };
        let handle = *self;
        spawn_local(async move {
            let mut next = Some(ticket);
            while let Some(ticket) = next.take() {
                let resolution = fetch_ticket(runtime.fetcher.as_ref(), ticket).await;
                let sequence = resolution.ticket.sequence;
                let Some(mut list) = handle.state.try_get_untracked() else {
                    return;
                };
                let outcome = resolution.commit_to(&mut list);
                if !outcome.is_committed() {
                    logging::log!("resource list discarded response #{sequence}: {outcome:?}");
                    return;
                }
                handle.state.set(list);

                match handle.reduce(ListAction::Evaluate) {
                    Ok(effects) => {
                        for effect in effects {
                            match effect {
                                ListEffect::Fetch(follow_up) => next = Some(follow_up),
                                other => handle.run_effect(other),
                            }
                        }
                    }
                    Err(err) => logging::warn!("resource list re-evaluation failed: {err}"),
                }
            }
        });
    }

    fn query_store(&self) -> Option<Rc<dyn QueryStore>> {
        self.runtime
            .try_with_value(|runtime| runtime.query_store.clone())
            .flatten()
    }

    pub fn items(&self) -> Signal<Vec<T>> {
        let state = self.state;
        Signal::derive(move || state.with(|list| list.items().to_vec()))
    }

    pub fn total_items(&self) -> Signal<usize> {
        let state = self.state;
        Signal::derive(move || state.with(|list| list.result().total_items))
    }

    pub fn loading(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(ResourceList::is_loading))
    }

    pub fn error(&self) -> Signal<Option<ErrorInfo>> {
        let state = self.state;
        Signal::derive(move || state.with(|list| list.error().cloned()))
    }

    pub fn status(&self) -> Signal<FetchStatus> {
        let state = self.state;
        Signal::derive(move || state.with(ResourceList::status))
    }

    pub fn pagination(&self) -> Signal<PaginationState> {
        let state = self.state;
        Signal::derive(move || state.with(|list| list.pagination().clone()))
    }

    pub fn filters(&self) -> Signal<FilterState> {
        let state = self.state;
        Signal::derive(move || state.with(|list| list.filters().clone()))
    }

    pub fn set_page(&self, page: usize) {
        self.dispatch_logged(ListAction::SetPage(page));
    }

    pub fn next_page(&self) {
        self.dispatch_logged(ListAction::NextPage);
    }

    pub fn previous_page(&self) {
        self.dispatch_logged(ListAction::PreviousPage);
    }

    /// # Errors
    ///
    /// Returns [`InvalidArgument::ZeroPageSize`] for `size == 0`.
    pub fn set_page_size(&self, size: usize) -> Result<(), InvalidArgument> {
        self.dispatch(ListAction::SetPageSize(size))
    }

    /// # Errors
    ///
    /// Returns [`InvalidArgument`] for an empty or reserved key.
    pub fn set_filter(
        &self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Result<(), InvalidArgument> {
        self.dispatch(ListAction::SetFilter {
            key: key.into(),
            value: value.into(),
        })
    }

    pub fn clear_filter(&self, key: impl Into<String>) {
        self.dispatch_logged(ListAction::ClearFilter(key.into()));
    }

    pub fn clear_filters(&self) {
        self.dispatch_logged(ListAction::ClearFilters);
    }

    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptySortField`] for an empty field.
    pub fn set_sort(
        &self,
        field: impl Into<String>,
        direction: SortDirection,
    ) -> Result<(), InvalidArgument> {
        self.dispatch(ListAction::SetSort {
            field: field.into(),
            direction,
        })
    }

    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptySortField`] for an empty field.
    pub fn toggle_sort(&self, field: impl Into<String>) -> Result<(), InvalidArgument> {
        self.dispatch(ListAction::ToggleSort(field.into()))
    }

    pub fn clear_sort(&self) {
        self.dispatch_logged(ListAction::ClearSort);
    }

    pub fn refetch(&self) {
        self.dispatch_logged(ListAction::Refetch);
    }

    /// Re-reads the query store, e.g. after back/forward navigation.
    pub fn rehydrate(&self) {
        if let Some(store) = self.query_store() {
            self.dispatch_logged(ListAction::HydrateQuery(store.read_query()));
        }
    }

    fn dispatch_logged(&self, action: ListAction) {
        if let Err(err) = self.dispatch(action) {
            logging::warn!("resource list reducer error: {err}");
        }
    }
}
