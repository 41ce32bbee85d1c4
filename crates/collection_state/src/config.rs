//! Explicit configuration structs for every state machine.
//!
//! All structs deserialize with `#[serde(default)]`, so a partial JSON document (or none at all)
//! yields the documented defaults.

use collection_host::{FilterValue, SortSpec};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_SORT_PARAM: &str = "sort";
pub const DEFAULT_DIRECTION_PARAM: &str = "dir";
pub const DEFAULT_LIST_DELIMITER: char = ',';
pub const DEFAULT_ITEM_SIZE: f64 = 40.0;
pub const DEFAULT_OVERSCAN: usize = 3;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Pagination defaults.
pub struct PaginationConfig {
    /// Initial items per page.
    pub page_size: usize,
    /// Page sizes offered to the user by page-size pickers.
    pub page_size_options: Vec<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 20, 50, 100],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// How a filter field is read back from the query string.
pub enum FilterFieldKind {
    /// Single value; the first occurrence wins.
    #[default]
    Text,
    /// Multi-valued; split on the list delimiter and concatenated across repeats.
    List,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A filter key recognized during URL hydration.
pub struct FilterField {
    /// Query parameter / filter key.
    pub key: String,
    /// Value shape.
    #[serde(default)]
    pub kind: FilterFieldKind,
}

impl FilterField {
    pub fn text(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: FilterFieldKind::Text,
        }
    }

    pub fn list(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: FilterFieldKind::List,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Filter/sort state options, including the URL codec.
pub struct FilterConfig {
    /// Keys hydrated from the URL. Keys not listed here are ignored on hydration.
    pub fields: Vec<FilterField>,
    /// Query parameter carrying the sort field.
    pub sort_param: String,
    /// Query parameter carrying the sort direction.
    pub direction_param: String,
    /// Delimiter joining list values in a single query parameter.
    pub list_delimiter: char,
    /// Sort applied when neither the caller nor the URL provides one.
    pub default_sort: Option<SortSpec>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            sort_param: DEFAULT_SORT_PARAM.to_string(),
            direction_param: DEFAULT_DIRECTION_PARAM.to_string(),
            list_delimiter: DEFAULT_LIST_DELIMITER,
            default_sort: None,
        }
    }
}

impl FilterConfig {
    /// Adds a recognized field.
    pub fn with_field(mut self, field: FilterField) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the default sort.
    pub fn with_default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = Some(sort);
        self
    }

    /// Looks up a recognized field by key.
    pub fn field(&self, key: &str) -> Option<&FilterField> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Converts `value` to the shape declared for `key`. Undeclared keys keep their value.
    ///
    /// Text on a list field becomes a one-entry list; a list on a text field is joined with the
    /// list delimiter.
    pub fn coerce(&self, key: &str, value: FilterValue) -> FilterValue {
        match (self.field(key).map(|field| field.kind), value) {
            (Some(FilterFieldKind::List), FilterValue::Text(text)) => FilterValue::List(vec![text]),
            (Some(FilterFieldKind::Text), FilterValue::List(values)) => {
                let entries: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
                FilterValue::Text(entries.join(&self.list_delimiter.to_string()))
            }
            (_, value) => value,
        }
    }

    /// Returns `true` for query parameters reserved for sorting.
    pub fn is_reserved(&self, key: &str) -> bool {
        key == self.sort_param || key == self.direction_param
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Resource-list orchestrator options.
pub struct ResourceListConfig {
    pub pagination: PaginationConfig,
    pub filters: FilterConfig,
    /// Reset to page 1 whenever filters or sort change.
    pub reset_page_on_filter_change: bool,
    /// Emit query writes whenever filters or sort change.
    pub sync_url: bool,
}

impl Default for ResourceListConfig {
    fn default() -> Self {
        Self {
            pagination: PaginationConfig::default(),
            filters: FilterConfig::default(),
            reset_page_on_filter_change: true,
            sync_url: false,
        }
    }
}

impl ResourceListConfig {
    /// Parses a JSON configuration document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw` is not valid JSON for this shape.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Infinite-scroll controller options.
pub struct InfiniteScrollConfig {
    /// Items requested per load.
    pub page_size: usize,
    /// Load the first page as soon as the controller is mounted.
    pub load_on_mount: bool,
}

impl Default for InfiniteScrollConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            load_on_mount: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Virtualized list options.
pub struct VirtualListConfig {
    /// Estimated size of one item along the scroll axis, in pixels.
    pub estimated_item_size: f64,
    /// Items rendered beyond each edge of the viewport.
    pub overscan: usize,
}

impl Default for VirtualListConfig {
    fn default() -> Self {
        Self {
            estimated_item_size: DEFAULT_ITEM_SIZE,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Debounce options.
pub struct DebounceConfig {
    pub delay_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}
