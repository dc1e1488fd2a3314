use crate::common::DESCENDING_PREFIX;
use std::cmp::Ordering;

/// Specifies the direction for sorting documents.
///
/// # Variants
/// - `Ascending`: Sort from smallest to largest value (A to Z, oldest to newest)
/// - `Descending`: Sort from largest to smallest value (Z to A, newest to oldest)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z, oldest to newest)
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A, newest to oldest)
    Descending,
}

impl SortOrder {
    /// Orients an ascending comparison result to this direction.
    #[inline]
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// A single `order_by` entry: a field name and its direction.
///
/// Parsed from the `"field"` / `"-field"` notation used by search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    field: String,
    order: SortOrder,
}

impl SortField {
    pub fn new(field: &str, order: SortOrder) -> Self {
        SortField {
            field: field.to_string(),
            order,
        }
    }

    /// Parses `"-date"` as descending on `date` and `"title"` as ascending on `title`.
    pub fn parse(text: &str) -> Self {
        match text.strip_prefix(DESCENDING_PREFIX) {
            Some(field) => SortField::new(field, SortOrder::Descending),
            None => SortField::new(text, SortOrder::Ascending),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }
}
