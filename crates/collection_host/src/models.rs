//! Request/response models exchanged with fetch collaborators.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sort direction for a single sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Stable query-string token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parses a query-string token, returning `None` for anything unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    /// Returns the opposite direction.
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort field plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field name understood by the fetch collaborator.
    pub field: String,
    /// Direction to sort `field` in.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Builds a sort spec.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// A filter value: a single scalar or an ordered list of scalars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Single text value.
    Text(String),
    /// Multi-valued filter (for example a set of checked categories).
    List(Vec<String>),
}

impl FilterValue {
    /// Builds a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Builds a list value.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Returns `true` for values that should be treated as absent.
    ///
    /// Empty text, an empty list, and a list holding only empty strings are all absent.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(value) => value.is_empty(),
            Self::List(values) => values.iter().all(String::is_empty),
        }
    }

    /// Drops empty list entries so equal filters compare equal.
    pub fn normalized(self) -> Self {
        match self {
            Self::Text(value) => Self::Text(value),
            Self::List(values) => Self::List(values.into_iter().filter(|v| !v.is_empty()).collect()),
        }
    }

    /// Returns the text form for scalar values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::List(_) => None,
        }
    }

    /// Returns the entries of a list value, or the single scalar as a one-element slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Text(value) => std::slice::from_ref(value),
            Self::List(values) => values,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        Self::list(values)
    }
}

/// The request shape handed to a fetch collaborator.
///
/// Two descriptors are equal iff every field is equal; the orchestrator only issues a new fetch
/// when the derived descriptor differs from the last issued one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// 1-based page number.
    pub page: usize,
    /// Items per page.
    pub page_size: usize,
    /// Active filters, keyed and ordered by filter key.
    pub filters: BTreeMap<String, FilterValue>,
    /// Active sort, if any.
    pub sort: Option<SortSpec>,
}

impl RequestDescriptor {
    /// Zero-based index of the first item requested.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.page_size
    }

    /// Deterministic string form, suitable as a cache key.
    pub fn cache_key(&self) -> String {
        let mut key = format!("p={}&n={}", self.page, self.page_size);
        for (name, value) in &self.filters {
            key.push('&');
            key.push_str(name);
            key.push('=');
            key.push_str(&value.as_slice().join(","));
        }
        if let Some(sort) = &self.sort {
            key.push_str(&format!("&sort={}:{}", sort.field, sort.direction));
        }
        key
    }
}

/// One page of results returned by a fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPage<T> {
    /// Items on the requested page, in display order.
    pub items: Vec<T>,
    /// Total number of items matching the request across all pages.
    pub total_items: usize,
}

impl<T> ListPage<T> {
    /// Builds a page.
    pub fn new(items: Vec<T>, total_items: usize) -> Self {
        Self { items, total_items }
    }
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
        }
    }
}

/// Failure payload reported by a fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ErrorInfo {
    /// Human-readable message.
    pub message: String,
    /// Optional machine-readable code (HTTP status, backend error id, ...).
    #[serde(default)]
    pub code: Option<String>,
}

impl ErrorInfo {
    /// Builds an error with no code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Attaches a machine-readable code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl From<String> for ErrorInfo {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ErrorInfo {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn filter_value_emptiness_covers_blank_lists() {
        assert!(FilterValue::text("").is_empty());
        assert!(FilterValue::List(Vec::new()).is_empty());
        assert!(FilterValue::list(["", ""]).is_empty());
        assert!(!FilterValue::list(["", "a"]).is_empty());
        assert_eq!(
            FilterValue::list(["", "a"]).normalized(),
            FilterValue::list(["a"])
        );
    }

    #[test]
    fn filter_value_serializes_untagged() {
        let value = serde_json::to_value(FilterValue::list(["red", "blue"])).expect("serialize");
        assert_eq!(value, json!(["red", "blue"]));
        let parsed: FilterValue = serde_json::from_value(json!("shoes")).expect("deserialize");
        assert_eq!(parsed, FilterValue::text("shoes"));
    }

    #[test]
    fn descriptor_cache_key_is_deterministic() {
        let mut filters = BTreeMap::new();
        filters.insert("tags".to_string(), FilterValue::list(["a", "b"]));
        filters.insert("category".to_string(), FilterValue::text("shoes"));
        let descriptor = RequestDescriptor {
            page: 2,
            page_size: 10,
            filters,
            sort: Some(SortSpec::new("price", SortDirection::Desc)),
        };

        assert_eq!(
            descriptor.cache_key(),
            "p=2&n=10&category=shoes&tags=a,b&sort=price:desc"
        );
        assert_eq!(descriptor.offset(), 10);
    }

    #[test]
    fn sort_direction_parses_known_tokens_only() {
        assert_eq!(SortDirection::parse("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse(" asc "), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("up"), None);
        assert_eq!(SortDirection::Asc.reversed(), SortDirection::Desc);
    }

    #[test]
    fn error_info_displays_message() {
        let err = ErrorInfo::new("backend unavailable").with_code("503");
        assert_eq!(err.to_string(), "backend unavailable");
        assert_eq!(err.code.as_deref(), Some("503"));
    }
}
