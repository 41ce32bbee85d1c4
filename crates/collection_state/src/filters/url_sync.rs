//! Query-string codec for [`FilterState`].
//!
//! Output order is fixed: filter keys in sorted order, then the sort field, then the direction.
//! The same state therefore always produces the same string.
//!
//! List entries are joined with the configured delimiter; a delimiter or backslash inside an entry
//! is escaped with a backslash. A sort cleared under a configured default is written as an empty
//! sort parameter so that hydration does not bring the default back.

use collection_host::{FilterValue, QueryParams, SortDirection};

use super::FilterState;
use crate::config::{FilterConfig, FilterFieldKind};

const ESCAPE: char = '\\';

fn join_list(values: &[String], delimiter: char) -> String {
    let mut joined = String::new();
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            joined.push(delimiter);
        }
        for ch in value.chars() {
            if delimiter != ESCAPE && (ch == delimiter || ch == ESCAPE) {
                joined.push(ESCAPE);
            }
            joined.push(ch);
        }
    }
    joined
}

fn split_list(raw: &str, delimiter: char) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE && delimiter != ESCAPE {
            // A trailing escape stands for itself.
            current.push(chars.next().unwrap_or(ESCAPE));
        } else if ch == delimiter {
            entries.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    entries.push(current);
    entries
}

/// Serializes `state` into query parameters.
///
/// Keys colliding with the sort/direction parameters are skipped. The direction is written only
/// alongside a sort field.
pub fn to_query(state: &FilterState, config: &FilterConfig) -> QueryParams {
    let mut params = QueryParams::new();

    for (key, value) in state.values() {
        if config.is_reserved(key) {
            continue;
        }
        match value {
            FilterValue::Text(text) => params.push(key.as_str(), text.as_str()),
            FilterValue::List(values) => {
                params.push(key.as_str(), join_list(values, config.list_delimiter))
            }
        }
    }

    match state.sort_field() {
        Some(field) => {
            params.push(config.sort_param.as_str(), field);
            params.push(config.direction_param.as_str(), state.sort_direction().as_str());
        }
        None if config.default_sort.is_some() => params.push(config.sort_param.as_str(), ""),
        None => {}
    }
    params
}

/// Hydrates a [`FilterState`] from query parameters.
///
/// Only fields declared in `config.fields` are read; anything else is ignored. List fields are
/// split on unescaped delimiters, repeated parameters are concatenated, and empty segments dropped.
/// An unrecognized direction falls back to ascending. An empty sort parameter clears the default
/// sort.
pub fn from_query(params: &QueryParams, config: &FilterConfig) -> FilterState {
    let mut state = FilterState::from_config(config);

    for field in &config.fields {
        if config.is_reserved(&field.key) {
            continue;
        }
        let value = match field.kind {
            FilterFieldKind::Text => params
                .get(&field.key)
                .map(|raw| FilterValue::text(raw)),
            FilterFieldKind::List => {
                let entries: Vec<String> = params
                    .get_all(&field.key)
                    .flat_map(|raw| split_list(raw, config.list_delimiter))
                    .filter(|entry| !entry.is_empty())
                    .collect();
                (!entries.is_empty()).then_some(FilterValue::List(entries))
            }
        };
        if let Some(value) = value {
            state.apply(field.key.clone(), value);
        }
    }

    match params.get(&config.sort_param) {
        Some("") => {
            state.sort_field = None;
            state.sort_direction = SortDirection::Asc;
        }
        Some(field) => {
            state.sort_field = Some(field.to_string());
            state.sort_direction = params
                .get(&config.direction_param)
                .and_then(SortDirection::parse)
                .unwrap_or_default();
        }
        None => {}
    }
    state
}

/// Writes `state` over `existing`, preserving parameters this state does not own.
///
/// Owned parameters are the declared fields, the sort/direction parameters, and any key currently
/// present in `state`. Foreign pairs keep their original order and come first.
pub fn merge_into_query(
    state: &FilterState,
    config: &FilterConfig,
    existing: &QueryParams,
) -> QueryParams {
    overlay_query(&to_query(state, config), config, existing)
}

/// Writes already-serialized filter parameters over `existing`.
///
/// Same ownership rules as [`merge_into_query`], with the keys of `owned` standing in for the
/// active filters.
pub fn overlay_query(
    owned: &QueryParams,
    config: &FilterConfig,
    existing: &QueryParams,
) -> QueryParams {
    let mut merged = existing.clone();
    merged.retain(|key, _| {
        config.field(key).is_none() && !config.is_reserved(key) && !owned.contains_key(key)
    });
    merged.extend_from(owned);
    merged
}
