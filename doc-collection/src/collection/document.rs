use im::OrdMap;

use crate::common::{DOC_ID, RESERVED_FIELD_PREFIX};
use crate::errors::{CollectionResult, CollectionError, ErrorKind};
use std::borrow::Cow;
use std::fmt::{Debug, Display};

/// A schemaless document: a mapping from field name to text value.
///
/// Documents are plain values. Fields are kept in name order, not in the order
/// they were put: iteration, [Document::to_json] and equality all see the fields
/// sorted by name, whatever the key order of the JSON text a document was parsed
/// from. One field is reserved: `_id`, which always equals the id the document
/// is stored under.
/// Every field whose name starts with `_` is reserved and is never matched by
/// search.
///
/// The backing map is an `im::OrdMap`, so cloning a document (for example when a
/// snapshot is materialized for sorting) is O(1) and shares structure.
///
/// # Examples
///
/// ```rust
/// use doc_collection::doc;
///
/// let doc = doc!{ title: "Rust", date: "2021" };
/// assert_eq!(doc.get("title"), Some("Rust"));
/// assert!(doc.id().is_none());
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Default, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Document {
    data: OrdMap<String, String>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of fields, the reserved ones included.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates `value` with `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is empty.
    pub fn put<'a>(&mut self, key: impl Into<Cow<'a, str>>, value: impl Into<String>) -> CollectionResult<()> {
        let key = key.into();
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(CollectionError::new(
                "Document does not support empty key",
                ErrorKind::InvalidFieldName,
            ));
        }
        self.data = self.data.update(key.into_owned(), value.into());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// The document id, if the document has been stored.
    pub fn id(&self) -> Option<&str> {
        self.get(DOC_ID)
    }

    pub fn has_id(&self) -> bool {
        self.data.contains_key(DOC_ID)
    }

    /// Forces the reserved `_id` field to `id`.
    pub(crate) fn set_id(&mut self, id: &str) {
        self.data = self.data.update(DOC_ID.to_string(), id.to_string());
    }

    /// Returns a copy of this document with `_id` set to `id`.
    pub(crate) fn with_id(mut self, id: &str) -> Self {
        self.set_id(id);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.data.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Copies every field of `other` onto this document; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Document) {
        for (key, value) in other.data.iter() {
            self.data = self.data.update(key.clone(), value.clone());
        }
    }

    /// Iterates over all fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over the fields search looks at: everything but the reserved ones.
    pub fn searchable_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter(|(field, _)| !field.starts_with(RESERVED_FIELD_PREFIX))
    }

    /// Parses a document from JSON text.
    ///
    /// The top level must be an object. String values are kept verbatim, numbers and
    /// booleans are stored as their JSON text, nested arrays and objects as compact
    /// JSON text, and `null` fields are dropped.
    pub fn from_json(text: &str) -> CollectionResult<Document> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Document::from_json_value(value)
    }

    pub fn from_json_value(value: serde_json::Value) -> CollectionResult<Document> {
        let serde_json::Value::Object(object) = value else {
            return Err(CollectionError::new(
                "Document text must be a JSON object",
                ErrorKind::EncodingError,
            ));
        };

        let mut document = Document::new();
        for (key, value) in object {
            let text = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            document.put(key, text)?;
        }
        Ok(document)
    }

    /// Renders the document as a JSON object with string values.
    pub fn to_json(&self) -> String {
        // a map of strings always serializes
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Document {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut data = OrdMap::new();
        for (key, value) in iter {
            let key = key.into();
            if !key.is_empty() {
                data.insert(key, value.into());
            }
        }
        Document { data }
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// Keys may be bare identifiers or string literals; values are any expression
/// implementing `ToString`.
///
/// ```rust
/// use doc_collection::doc;
///
/// let empty = doc!{};
/// let note = doc!{ title: "Groceries", "due-date": "2024-05-01", priority: 2 };
/// assert_eq!(note.get("priority"), Some("2"));
/// assert_eq!(note.get("due-date"), Some("2024-05-01"));
/// ```
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::collection::Document::new()
    };

    () => {
        $crate::collection::Document::new()
    };

    ({ $($key:tt : $value:expr),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    ($($key:tt : $value:expr),* $(,)?) => {
        {
            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), ToString::to_string(&$value))
                    .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}
