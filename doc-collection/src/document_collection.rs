use crate::collection::{Collection, Document};
use crate::collection_config::BackendType;
use crate::common::new_id;
use crate::document_collection_builder::DocumentCollectionBuilder;
use crate::errors::CollectionResult;

/// Content handed to [DocumentCollection::set_document]: a document, or JSON
/// text describing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    Document(Document),
    Json(String),
}

impl DocumentContent {
    /// The content as a document; `None` when JSON text does not describe one.
    pub fn into_document(self) -> Option<Document> {
        match self {
            DocumentContent::Document(document) => Some(document),
            DocumentContent::Json(text) => match Document::from_json(&text) {
                Ok(document) => Some(document),
                Err(err) => {
                    log::warn!("Ignoring malformed document content: {}", err);
                    None
                }
            },
        }
    }
}

impl From<Document> for DocumentContent {
    fn from(document: Document) -> Self {
        DocumentContent::Document(document)
    }
}

impl From<&str> for DocumentContent {
    fn from(text: &str) -> Self {
        DocumentContent::Json(text.to_string())
    }
}

impl From<String> for DocumentContent {
    fn from(text: String) -> Self {
        DocumentContent::Json(text)
    }
}

/// Entry point of the crate: a document collection on a configured backend.
///
/// Handles are cheap to clone and share the same collection.
///
/// # Examples
///
/// ```rust
/// use doc_collection::{doc, DocumentCollection};
/// use doc_collection::search::SearchOptions;
///
/// let notes = DocumentCollection::builder()
///     .search_options(SearchOptions::new().order_by(["title"]).fuzzy(true))
///     .open()
///     .unwrap();
///
/// let stored = notes.set_document(None, doc!{ title: "Groceries" }).unwrap();
/// let id = stored.id().unwrap().to_string();
/// notes.set_document(None, r#"{"title": "Chores", "priority": 2}"#);
///
/// assert_eq!(notes.search("grcs"), vec![id.clone()]);
/// assert_eq!(notes.search("").len(), 2);
/// assert!(notes.remove_document(&id));
/// ```
#[derive(Clone, Debug)]
pub struct DocumentCollection {
    collection: Collection,
}

impl DocumentCollection {
    pub(crate) fn new(collection: Collection) -> Self {
        DocumentCollection { collection }
    }

    pub fn builder() -> DocumentCollectionBuilder {
        DocumentCollectionBuilder::new()
    }

    /// A fresh random document id.
    pub fn new_id(&self) -> String {
        new_id()
    }

    pub fn get_document(&self, id: &str) -> Option<Document> {
        self.collection.get(id)
    }

    /// All stored ids, in the backend's native order.
    pub fn get_all_documents(&self) -> Vec<String> {
        self.collection.keys()
    }

    /// All stored ids, in insertion order.
    pub fn get_documents_order(&self) -> Vec<String> {
        self.collection.order()
    }

    /// Stores `content` under `id`, or under a new id when `id` is absent or empty.
    ///
    /// JSON content must be an object; malformed content stores nothing and
    /// returns `None`.
    pub fn set_document<C: Into<DocumentContent>>(
        &self,
        id: Option<&str>,
        content: C,
    ) -> Option<Document> {
        let document = content.into().into_document()?;
        match id {
            Some(id) if !id.is_empty() => self.collection.set(id, Some(document)),
            _ => self.collection.set(&new_id(), Some(document)),
        }
    }

    /// Merges `content` over the document stored under `id`.
    pub fn update_document<C: Into<DocumentContent>>(
        &self,
        id: &str,
        content: C,
    ) -> Option<Document> {
        let patch = content.into().into_document()?;
        self.collection.update(id, Some(patch))
    }

    /// Ids of documents matching `query`; an empty query lists every document in
    /// sort order instead.
    pub fn search(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            self.collection.sort()
        } else {
            self.collection.search(query)
        }
    }

    pub fn remove_document(&self, id: &str) -> bool {
        self.collection.remove(id)
    }

    pub fn clear(&self) -> bool {
        self.collection.clear()
    }

    pub fn backend_type(&self) -> BackendType {
        self.collection.backend_type()
    }

    /// Releases the backend. Persistent stores flush pending writes.
    pub fn close(&self) -> CollectionResult<()> {
        self.collection.close()
    }

    /// The underlying collection.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }
}
