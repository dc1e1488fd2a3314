/// How a search query is compared against a field value.
///
/// The strategy is picked once, when a collection is built, from
/// [SearchOptions::is_fuzzy](crate::search::SearchOptions::is_fuzzy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// The value contains the query as a contiguous, case-sensitive substring.
    #[default]
    Literal,
    /// Every character of the query occurs in the value, in order, ignoring case.
    Fuzzy,
}

impl MatchStrategy {
    pub fn from_fuzzy(fuzzy: bool) -> Self {
        if fuzzy {
            MatchStrategy::Fuzzy
        } else {
            MatchStrategy::Literal
        }
    }

    #[inline]
    pub fn matches(&self, query: &str, value: &str) -> bool {
        match self {
            MatchStrategy::Literal => value.contains(query),
            MatchStrategy::Fuzzy => fuzzy_match(query, value),
        }
    }
}

/// Case-insensitive subsequence test. An empty query matches everything.
fn fuzzy_match(query: &str, value: &str) -> bool {
    let mut candidates = value.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .flat_map(char::to_lowercase)
        .all(|needle| candidates.any(|c| c == needle))
}
