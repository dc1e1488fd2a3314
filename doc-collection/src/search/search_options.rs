use serde::{Deserialize, Serialize};

use crate::common::SortField;
use crate::errors::{CollectionError, CollectionResult, ErrorKind};

/// Search and sort configuration of a collection.
///
/// Options are fixed for the lifetime of a collection: they are validated and
/// compiled once when the collection is opened.
///
/// - `order_by`: field names, a leading `-` sorts that field descending.
/// - `fuzzy`: use case-insensitive subsequence matching instead of substrings.
/// - `limit`: maximum number of ids returned by `search` and `sort`.
/// - `exclude`: regular expressions; a field value matching any of them is
///   ignored by search.
///
/// Options can be built fluently or read from JSON using the option names
/// `orderBy`, `fuzzy`, `limit` and `exclude`.
///
/// # Examples
///
/// ```rust
/// use doc_collection::search::SearchOptions;
///
/// let options = SearchOptions::new()
///     .order_by(["-date", "title"])
///     .fuzzy(true)
///     .limit(20)
///     .exclude(["^secret"]);
/// assert!(options.validate().is_ok());
///
/// let parsed = SearchOptions::from_json(r#"{"orderBy": ["-date"], "limit": 5}"#).unwrap();
/// assert_eq!(parsed.get_limit(), Some(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    order_by: Vec<String>,
    fuzzy: bool,
    limit: Option<usize>,
    exclude: Vec<String>,
}

impl SearchOptions {
    pub fn new() -> Self {
        SearchOptions::default()
    }

    pub fn from_json(text: &str) -> CollectionResult<Self> {
        let options: SearchOptions = serde_json::from_str(text).map_err(|e| {
            log::error!("Failed to parse search options: {}", e);
            CollectionError::new(
                &format!("Invalid search options: {}", e),
                ErrorKind::InvalidConfiguration,
            )
        })?;
        Ok(options)
    }

    pub fn order_by<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn no_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn get_order_by(&self) -> &[String] {
        &self.order_by
    }

    pub fn is_fuzzy(&self) -> bool {
        self.fuzzy
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn get_exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Parsed `order_by` entries.
    pub fn sort_fields(&self) -> Vec<SortField> {
        self.order_by.iter().map(|it| SortField::parse(it)).collect()
    }

    /// Checks that the options can be compiled.
    ///
    /// # Errors
    ///
    /// * `limit` is zero
    /// * an `order_by` entry names no field
    /// * an `exclude` pattern is not a valid regular expression
    pub fn validate(&self) -> CollectionResult<()> {
        if self.limit == Some(0) {
            log::error!("Search limit must be positive");
            return Err(CollectionError::new(
                "Search limit must be positive",
                ErrorKind::InvalidConfiguration,
            ));
        }

        if let Some(field) = self.sort_fields().iter().find(|it| it.field().is_empty()) {
            log::error!("Empty field name in order by clause {:?}", self.order_by);
            return Err(CollectionError::new(
                &format!("Empty field name in order by clause ({:?})", field),
                ErrorKind::InvalidFieldName,
            ));
        }

        for pattern in &self.exclude {
            regex::Regex::new(pattern)?;
        }
        Ok(())
    }
}
