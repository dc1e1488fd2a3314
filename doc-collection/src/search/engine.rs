use std::collections::HashMap;

use regex::Regex;

use crate::collection::Document;
use crate::common::parallel_map;
use crate::errors::CollectionResult;
use crate::search::{merge_sort_by, MatchStrategy, SearchOptions, SortComparator};

/// Transient `id -> document` snapshot a backend sorts against.
pub type CollectionUnit = HashMap<String, Document>;

/// Raw document access a backend hands to the [SearchEngine].
pub trait RawStorage {
    /// Fetches a stored document. Failures read as absent.
    fn raw_get(&self, id: &str) -> Option<Document>;

    /// Visits search candidates in the backend's search order until `visitor`
    /// returns `false`.
    fn raw_iterate(&self, visitor: &mut dyn FnMut(&str, &Document) -> bool);
}

/// Match, exclusion and sort logic shared by every backend.
///
/// The engine is compiled once from [SearchOptions]: the match strategy is fixed,
/// the comparator is built from `order_by` and exclusion patterns are compiled to
/// regular expressions.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    strategy: MatchStrategy,
    comparator: SortComparator,
    limit: Option<usize>,
    exclusions: Vec<Regex>,
}

impl SearchEngine {
    pub fn new(options: &SearchOptions) -> CollectionResult<Self> {
        options.validate()?;

        let mut exclusions = Vec::with_capacity(options.get_exclude().len());
        for pattern in options.get_exclude() {
            exclusions.push(Regex::new(pattern)?);
        }

        Ok(SearchEngine {
            strategy: MatchStrategy::from_fuzzy(options.is_fuzzy()),
            comparator: SortComparator::new(options.sort_fields()),
            limit: options.get_limit(),
            exclusions,
        })
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// A value is excluded if any exclusion pattern matches it.
    pub fn is_excluded(&self, value: &str) -> bool {
        self.exclusions.iter().any(|pattern| pattern.is_match(value))
    }

    /// Whether any searchable, non-excluded field of `document` matches `query`.
    pub fn matches(&self, query: &str, document: &Document) -> bool {
        document
            .searchable_fields()
            .any(|(_, value)| !self.is_excluded(value) && self.strategy.matches(query, value))
    }

    /// Ids of matching documents, in the storage's search order, at most `limit`.
    ///
    /// An empty query matches nothing.
    pub fn search<S: RawStorage + ?Sized>(&self, query: &str, storage: &S) -> Vec<String> {
        let mut found = Vec::new();
        if query.is_empty() {
            return found;
        }

        storage.raw_iterate(&mut |id, document| {
            if self.matches(query, document) {
                found.push(id.to_string());
            }
            !self.is_full(found.len())
        });
        found
    }

    /// Stable sort of `ids` by the configured order, truncated to `limit`.
    pub fn sort<'a, L>(&self, ids: Vec<String>, lookup: L) -> Vec<String>
    where
        L: Fn(&str) -> Option<&'a Document>,
    {
        self.truncate(self.arrange(ids, lookup))
    }

    /// Stable sort of every id of `ids` by the configured order.
    pub fn arrange<'a, L>(&self, ids: Vec<String>, lookup: L) -> Vec<String>
    where
        L: Fn(&str) -> Option<&'a Document>,
    {
        if self.comparator.is_empty() {
            return ids;
        }
        merge_sort_by(ids, &mut |a: &String, b: &String| {
            self.comparator.compare(lookup(a), lookup(b))
        })
    }

    pub fn truncate(&self, mut ids: Vec<String>) -> Vec<String> {
        if let Some(limit) = self.limit {
            ids.truncate(limit);
        }
        ids
    }

    /// Fetches every id of `ids` from `storage` on worker threads.
    ///
    /// Costs one point read per id; ids that cannot be read are left out.
    pub fn materialize<S: RawStorage + Sync + ?Sized>(
        &self,
        ids: &[String],
        storage: &S,
    ) -> CollectionUnit {
        parallel_map(ids, |id| storage.raw_get(id).map(|doc| (id.clone(), doc)))
            .into_iter()
            .flatten()
            .collect()
    }

    #[inline]
    fn is_full(&self, count: usize) -> bool {
        self.limit.is_some_and(|limit| count >= limit)
    }
}
