use std::cmp::Ordering;

use crate::collection::Document;
use crate::common::SortField;

/// Multi-field comparator over documents, built from `order_by`.
///
/// Fields are compared in order with plain string comparison. A field that is
/// missing from either document (or a document that is missing altogether) is
/// incomparable and the next field decides. When no field decides, the two
/// documents compare equal.
#[derive(Debug, Clone, Default)]
pub struct SortComparator {
    fields: Vec<SortField>,
}

impl SortComparator {
    pub fn new(fields: Vec<SortField>) -> Self {
        SortComparator { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn compare(&self, a: Option<&Document>, b: Option<&Document>) -> Ordering {
        let (Some(a), Some(b)) = (a, b) else {
            return Ordering::Equal;
        };

        for sort_field in &self.fields {
            let field = sort_field.field();
            if let (Some(left), Some(right)) = (a.get(field), b.get(field)) {
                let ordering = left.cmp(right);
                if ordering != Ordering::Equal {
                    return sort_field.order().apply(ordering);
                }
            }
        }
        Ordering::Equal
    }
}

/// Stable merge sort.
///
/// [SortComparator] is not a total order once fields go missing, which the
/// standard library sort is allowed to reject with a panic. This sort only relies
/// on the comparator answering, and keeps equal items in input order.
pub(crate) fn merge_sort_by<T, F>(items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = merge_sort_by(left, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (None, Some(_)) => true,
            (Some(_), None) => false,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged
}
