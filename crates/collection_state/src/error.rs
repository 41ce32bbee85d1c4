//! Synchronous input-validation errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
/// Invalid input rejected at the call site. Fetch failures never use this type; they are captured
/// into list state as [`collection_host::ErrorInfo`].
pub enum InvalidArgument {
    /// Page size must be strictly positive.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// Filter keys must be non-empty.
    #[error("filter key must not be empty")]
    EmptyFilterKey,
    /// Filter key collides with a query parameter reserved for sorting.
    #[error("filter key `{0}` is reserved for sort parameters")]
    ReservedFilterKey(String),
    /// Sort field names must be non-empty.
    #[error("sort field must not be empty")]
    EmptySortField,
    /// Item sizes used for virtualization must be positive and finite.
    #[error("item size must be a positive finite number, got {0}")]
    InvalidItemSize(f64),
    /// Grids need at least one column.
    #[error("column count must be greater than zero")]
    ZeroColumns,
}
