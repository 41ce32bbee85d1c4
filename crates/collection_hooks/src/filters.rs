//! `use_filters` / `use_url_filters`: reactive filter and sort state, optionally mirrored to the URL.

use std::rc::Rc;

use collection_host::{FilterValue, QueryParams, QueryStore, SortDirection, SortSpec};
use collection_state::{from_query, merge_into_query, FilterConfig, FilterState, InvalidArgument};
use leptos::*;

use crate::commit::{commit, try_commit};

#[derive(Clone, Copy)]
/// Handle returned by [`use_filters`] and [`use_url_filters`].
pub struct FiltersHandle {
    /// Current filters and sort.
    pub state: RwSignal<FilterState>,
    config: StoredValue<FilterConfig>,
    query_store: Option<StoredValue<Rc<dyn QueryStore>>>,
    on_change: Option<Callback<FilterState>>,
}

/// Filter state without URL persistence, starting from the configured default sort.
///
/// Pass a pagination reset as `on_change` to return to page 1 whenever filters change.
pub fn use_filters(
    config: FilterConfig,
    on_change: Option<Callback<FilterState>>,
) -> FiltersHandle {
    FiltersHandle {
        state: create_rw_signal(FilterState::from_config(&config)),
        config: store_value(config),
        query_store: None,
        on_change,
    }
}

/// Filter state hydrated from `query_store` and written back to it after every change.
///
/// Parameters the filters do not own are preserved on write.
pub fn use_url_filters(
    config: FilterConfig,
    query_store: Rc<dyn QueryStore>,
    on_change: Option<Callback<FilterState>>,
) -> FiltersHandle {
    let initial = from_query(&query_store.read_query(), &config);
    FiltersHandle {
        state: create_rw_signal(initial),
        config: store_value(config),
        query_store: Some(store_value(query_store)),
        on_change,
    }
}

impl FiltersHandle {
    pub fn values(&self) -> Signal<Vec<(String, FilterValue)>> {
        let state = self.state;
        Signal::derive(move || {
            state.with(|s| {
                s.values()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
        })
    }

    /// Value of one filter key.
    pub fn get(&self, key: impl Into<String>) -> Signal<Option<FilterValue>> {
        let state = self.state;
        let key = key.into();
        Signal::derive(move || state.with(|s| s.get(&key).cloned()))
    }

    pub fn sort(&self) -> Signal<Option<SortSpec>> {
        let state = self.state;
        Signal::derive(move || state.with(FilterState::sort))
    }

    pub fn active_count(&self) -> Signal<usize> {
        let state = self.state;
        Signal::derive(move || state.with(FilterState::active_count))
    }

    pub fn config(&self) -> FilterConfig {
        self.config.get_value()
    }

    /// Sets one filter, coercing the value to the declared field kind.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] for an empty key or one reserved for sort parameters.
    pub fn set_filter(
        &self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Result<bool, InvalidArgument> {
        let key = key.into();
        let value = value.into();
        let config = self.config;
        self.apply_fallible(|s| config.with_value(|config| s.set_field(config, key, value)))
    }

    /// Shallow-merges several filters; nothing is applied if any key is invalid.
    ///
    /// # Errors
    ///
    /// See [`FiltersHandle::set_filter`].
    pub fn set_filters<I, K, V>(&self, partial: I) -> Result<bool, InvalidArgument>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FilterValue>,
    {
        let partial: Vec<(String, FilterValue)> = partial
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let config = self.config;
        self.apply_fallible(|s| config.with_value(|config| s.set_fields(config, partial)))
    }

    pub fn clear_filter(&self, key: &str) -> bool {
        self.apply(|s| s.clear_filter(key))
    }

    pub fn clear_all(&self) -> bool {
        self.apply(FilterState::clear_all)
    }

    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptySortField`] for an empty field.
    pub fn set_sort(
        &self,
        field: impl Into<String>,
        direction: SortDirection,
    ) -> Result<bool, InvalidArgument> {
        let field = field.into();
        self.apply_fallible(|s| s.set_sort(field, direction))
    }

    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptySortField`] for an empty field.
    pub fn toggle_sort(&self, field: impl Into<String>) -> Result<bool, InvalidArgument> {
        let field = field.into();
        self.apply_fallible(|s| s.toggle_sort(field))
    }

    pub fn clear_sort(&self) -> bool {
        self.apply(FilterState::clear_sort)
    }

    /// Replaces the state with what `params` encodes, e.g. after back/forward navigation.
    ///
    /// Hydration does not write the URL back.
    pub fn hydrate(&self, params: &QueryParams) -> bool {
        let hydrated = self.config.with_value(|config| from_query(params, config));
        let changed = commit(self.state, |s| {
            if *s == hydrated {
                return false;
            }
            *s = hydrated;
            true
        });
        if changed {
            self.notify();
        }
        changed
    }

    fn apply(&self, mutate: impl FnOnce(&mut FilterState) -> bool) -> bool {
        let changed = commit(self.state, mutate);
        if changed {
            self.persist();
            self.notify();
        }
        changed
    }

    fn apply_fallible(
        &self,
        mutate: impl FnOnce(&mut FilterState) -> Result<bool, InvalidArgument>,
    ) -> Result<bool, InvalidArgument> {
        let changed = try_commit(self.state, mutate)?;
        if changed {
            self.persist();
            self.notify();
        }
        Ok(changed)
    }

    fn persist(&self) {
        let Some(store) = self.query_store.and_then(|store| store.try_get_value()) else {
            return;
        };
        let Some(state) = self.state.try_get_untracked() else {
            return;
        };
        let merged = self
            .config
            .with_value(|config| merge_into_query(&state, config, &store.read_query()));
        if let Err(err) = store.write_query(&merged) {
            logging::warn!("filter query write failed: {err}");
        }
    }

    fn notify(&self) {
        if let (Some(on_change), Some(state)) = (self.on_change, self.state.try_get_untracked()) {
            on_change.call(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use collection_host::MemoryQueryStore;
    use collection_state::FilterField;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pagination::use_pagination_state;

    fn catalog_config() -> FilterConfig {
        FilterConfig::default()
            .with_field(FilterField::text("category"))
            .with_field(FilterField::list("tags"))
    }

    #[test]
    fn url_filters_hydrate_and_write_back() {
        let _ = create_runtime();
        let store = MemoryQueryStore::from_query_string("utm=mail&category=hats&sort=name&dir=desc");
        let filters = use_url_filters(catalog_config(), Rc::new(store.clone()), None);

        assert_eq!(
            filters.get("category").get_untracked(),
            Some(FilterValue::text("hats"))
        );
        assert_eq!(
            filters.sort().get_untracked(),
            Some(SortSpec::new("name", SortDirection::Desc))
        );

        filters.set_filter("category", "shoes").expect("filter");
        filters.set_sort("price", SortDirection::Asc).expect("sort");
        assert_eq!(
            store.query_string(),
            "utm=mail&category=shoes&sort=price&dir=asc"
        );
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn rejected_keys_leave_url_untouched() {
        let _ = create_runtime();
        let store = MemoryQueryStore::default();
        let filters = use_url_filters(catalog_config(), Rc::new(store.clone()), None);

        assert_eq!(
            filters.set_filter("sort", "x"),
            Err(InvalidArgument::ReservedFilterKey("sort".to_string()))
        );
        assert_eq!(
            filters.set_filters([("tags", "a"), ("", "b")]),
            Err(InvalidArgument::EmptyFilterKey)
        );
        assert_eq!(store.write_count(), 0);
        assert_eq!(filters.active_count().get_untracked(), 0);
    }

    #[test]
    fn on_change_resets_pagination() {
        let _ = create_runtime();
        let pagination = use_pagination_state(Default::default(), None);
        pagination.set_total(200);
        pagination.set_page(4);

        let reset = Callback::new(move |_: FilterState| {
            pagination.reset();
        });
        let filters = use_filters(catalog_config(), Some(reset));

        assert_eq!(filters.set_filter("category", "boots"), Ok(true));
        assert_eq!(pagination.page().get_untracked(), 1);

        pagination.set_page(3);
        assert_eq!(filters.set_filter("category", "boots"), Ok(false));
        assert_eq!(pagination.page().get_untracked(), 3);
    }

    #[test]
    fn runtime_keys_and_declared_kinds() {
        let _ = create_runtime();
        let filters = use_filters(catalog_config(), None);
        let key = format!("{}s", "tag");
        let tags = filters.get(key.clone());

        assert_eq!(filters.set_filter(key, "sale"), Ok(true));
        assert_eq!(tags.get_untracked(), Some(FilterValue::list(["sale"])));
    }

    #[test]
    fn hydrate_replaces_state_without_writing() {
        let _ = create_runtime();
        let store = MemoryQueryStore::default();
        let filters = use_url_filters(catalog_config(), Rc::new(store.clone()), None);

        assert!(filters.hydrate(&QueryParams::parse("tags=new,sale")));
        assert_eq!(
            filters.get("tags").get_untracked(),
            Some(FilterValue::list(["new", "sale"]))
        );
        assert!(!filters.hydrate(&QueryParams::parse("tags=new,sale")));
        assert_eq!(store.write_count(), 0);
        assert!(filters.clear_all());
        assert_eq!(store.query_string(), "");
    }
}
