use std::collections::HashSet;

const MIN_COMPACT_THRESHOLD: usize = 64;

/// Insertion-order index of a collection.
///
/// Internally an append-only log of ids: every `set` appends, even for an id that
/// is already present. Readers never see the duplicates, [OrderIndex::resolve]
/// keeps each id at its last position and drops ids that are no longer stored.
/// Removing a document purges its id from the log.
///
/// The log compacts itself to the resolved order once it has doubled in size
/// since the last compaction.
#[derive(Debug, Clone)]
pub struct OrderIndex {
    log: Vec<String>,
    compact_threshold: usize,
}

impl Default for OrderIndex {
    fn default() -> Self {
        OrderIndex::new()
    }
}

impl OrderIndex {
    pub fn new() -> Self {
        OrderIndex {
            log: Vec::new(),
            compact_threshold: MIN_COMPACT_THRESHOLD,
        }
    }

    pub fn append(&mut self, id: &str) {
        self.log.push(id.to_string());
        if self.log.len() >= self.compact_threshold {
            self.compact();
        }
    }

    /// Drops every occurrence of `id`.
    pub fn purge(&mut self, id: &str) {
        self.log.retain(|it| it != id);
    }

    /// Rewrites the log as `sorted`.
    ///
    /// Ids of `sorted` that are no longer in the log are skipped, and ids logged
    /// since `sorted` was taken follow it in their resolved order.
    pub fn reorder(&mut self, sorted: &[String]) {
        let logged: HashSet<&str> = self.log.iter().map(String::as_str).collect();
        let placed: HashSet<&str> = sorted.iter().map(String::as_str).collect();

        let mut log: Vec<String> = sorted
            .iter()
            .filter(|id| logged.contains(id.as_str()))
            .cloned()
            .collect();
        log.extend(self.resolve(|id| !placed.contains(id)));

        self.compact_threshold = (log.len() * 2).max(MIN_COMPACT_THRESHOLD);
        self.log = log;
    }

    pub fn reset(&mut self) {
        self.log.clear();
        self.compact_threshold = MIN_COMPACT_THRESHOLD;
    }

    /// Number of raw log entries, duplicates included.
    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// The order readers see: last occurrence wins, ids rejected by `is_stored`
    /// are dropped.
    pub fn resolve<F>(&self, is_stored: F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        let mut seen = HashSet::with_capacity(self.log.len());
        let mut resolved: Vec<String> = self
            .log
            .iter()
            .rev()
            .filter(|id| seen.insert(id.as_str()) && is_stored(id.as_str()))
            .cloned()
            .collect();
        resolved.reverse();
        resolved
    }

    fn compact(&mut self) {
        self.log = self.resolve(|_| true);
        self.compact_threshold = (self.log.len() * 2).max(MIN_COMPACT_THRESHOLD);
        log::debug!("Compacted order index to {} entries", self.log.len());
    }
}
