mod engine;
mod match_strategy;
mod search_options;
mod sort_comparator;

pub use engine::*;
pub use match_strategy::*;
pub use search_options::*;
pub use sort_comparator::SortComparator;
pub(crate) use sort_comparator::merge_sort_by;
