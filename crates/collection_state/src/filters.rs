//! Filter values plus sort field/direction, with shallow-merge updates.
//!
//! Keys whose value is empty are never stored, which keeps the serialized form minimal and makes
//! structural equality a reliable "does this need a refetch" test.

mod url_sync;

use std::collections::BTreeMap;

use collection_host::{FilterValue, SortDirection, SortSpec};
use serde::{Deserialize, Serialize};

use crate::{config::FilterConfig, error::InvalidArgument};

pub use url_sync::{from_query, merge_into_query, overlay_query, to_query};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Active filters and sort.
pub struct FilterState {
    values: BTreeMap<String, FilterValue>,
    sort_field: Option<String>,
    sort_direction: SortDirection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty filters with the configured default sort applied.
    pub fn from_config(config: &FilterConfig) -> Self {
        let mut state = Self::default();
        if let Some(sort) = &config.default_sort {
            state.sort_field = Some(sort.field.clone());
            state.sort_direction = sort.direction;
        }
        state
    }

    pub fn values(&self) -> &BTreeMap<String, FilterValue> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values.get(key)
    }

    pub fn sort_field(&self) -> Option<&str> {
        self.sort_field.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Sort as a single value, when a sort field is set.
    pub fn sort(&self) -> Option<SortSpec> {
        self.sort_field
            .as_ref()
            .map(|field| SortSpec::new(field.clone(), self.sort_direction))
    }

    /// Number of active filter keys.
    pub fn active_count(&self) -> usize {
        self.values.len()
    }

    pub fn has_active(&self) -> bool {
        !self.values.is_empty()
    }

    /// Sets (or, for an empty value, removes) one filter.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptyFilterKey`] for an empty key.
    pub fn set_filter(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Result<bool, InvalidArgument> {
        let key = key.into();
        if key.is_empty() {
            return Err(InvalidArgument::EmptyFilterKey);
        }
        Ok(self.apply(key, value.into()))
    }

    /// Shallow-merges several filters at once. Validation happens before any key is applied.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptyFilterKey`] if any key is empty; nothing is applied then.
    pub fn set_filters<I, K, V>(&mut self, partial: I) -> Result<bool, InvalidArgument>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FilterValue>,
    {
        let partial: Vec<(String, FilterValue)> = partial
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        if partial.iter().any(|(key, _)| key.is_empty()) {
            return Err(InvalidArgument::EmptyFilterKey);
        }

        let mut changed = false;
        for (key, value) in partial {
            changed |= self.apply(key, value);
        }
        Ok(changed)
    }

    /// [`FilterState::set_filter`] against a configuration: the key is validated with
    /// [`validate_filter_key`] and the value coerced to the declared field kind.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptyFilterKey`] or [`InvalidArgument::ReservedFilterKey`].
    pub fn set_field(
        &mut self,
        config: &FilterConfig,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Result<bool, InvalidArgument> {
        let key = key.into();
        validate_filter_key(config, &key)?;
        let value = config.coerce(&key, value.into());
        Ok(self.apply(key, value))
    }

    /// [`FilterState::set_filters`] against a configuration. Every key is validated before any is
    /// applied.
    ///
    /// # Errors
    ///
    /// See [`FilterState::set_field`].
    pub fn set_fields<I, K, V>(
        &mut self,
        config: &FilterConfig,
        partial: I,
    ) -> Result<bool, InvalidArgument>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FilterValue>,
    {
        let partial: Vec<(String, FilterValue)> = partial
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        partial
            .iter()
            .try_for_each(|(key, _)| validate_filter_key(config, key))?;

        let mut changed = false;
        for (key, value) in partial {
            let value = config.coerce(&key, value);
            changed |= self.apply(key, value);
        }
        Ok(changed)
    }

    pub fn clear_filter(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    /// Removes every filter value. Sort is left as is; see [`FilterState::clear_sort`].
    pub fn clear_all(&mut self) -> bool {
        if self.values.is_empty() {
            return false;
        }
        self.values.clear();
        true
    }

    /// Sets the sort field and direction.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptySortField`] for an empty field name.
    pub fn set_sort(
        &mut self,
        field: impl Into<String>,
        direction: SortDirection,
    ) -> Result<bool, InvalidArgument> {
        let field = field.into();
        if field.is_empty() {
            return Err(InvalidArgument::EmptySortField);
        }
        if self.sort_field.as_deref() == Some(field.as_str()) && self.sort_direction == direction {
            return Ok(false);
        }
        self.sort_field = Some(field);
        self.sort_direction = direction;
        Ok(true)
    }

    /// Flips the direction when `field` is already the sort field, otherwise sorts ascending by it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::EmptySortField`] for an empty field name.
    pub fn toggle_sort(&mut self, field: impl Into<String>) -> Result<bool, InvalidArgument> {
        let field = field.into();
        let direction = if self.sort_field.as_deref() == Some(field.as_str()) {
            self.sort_direction.reversed()
        } else {
            SortDirection::Asc
        };
        self.set_sort(field, direction)
    }

    pub fn clear_sort(&mut self) -> bool {
        let changed = self.sort_field.is_some() || self.sort_direction != SortDirection::Asc;
        self.sort_field = None;
        self.sort_direction = SortDirection::Asc;
        changed
    }

    fn apply(&mut self, key: String, value: FilterValue) -> bool {
        if value.is_empty() {
            return self.values.remove(&key).is_some();
        }
        let value = value.normalized();
        if self.values.get(&key) == Some(&value) {
            return false;
        }
        self.values.insert(key, value);
        true
    }
}

/// Rejects keys that cannot be represented in the query string for `config`.
///
/// # Errors
///
/// Returns [`InvalidArgument::EmptyFilterKey`] or [`InvalidArgument::ReservedFilterKey`].
pub fn validate_filter_key(config: &FilterConfig, key: &str) -> Result<(), InvalidArgument> {
    if key.is_empty() {
        return Err(InvalidArgument::EmptyFilterKey);
    }
    if config.is_reserved(key) {
        return Err(InvalidArgument::ReservedFilterKey(key.to_string()));
    }
    Ok(())
}
