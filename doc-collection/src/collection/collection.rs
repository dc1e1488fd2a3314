use std::fmt::Debug;
use std::ops::Deref;
use std::sync::Arc;

use crate::collection::Document;
use crate::collection_config::BackendType;
use crate::errors::CollectionResult;

/// Contract every backend implements.
///
/// Collection calls never fail with an error: an unknown or empty id, a missing
/// document or a storage failure is reported as an absent document, `false` or an
/// empty list. Every document handed back carries `_id` equal to its id.
///
/// # Thread Safety
/// Implementers must be `Send + Sync`. Sequential calls on one collection read
/// their own writes; concurrent calls are memory-safe but not coordinated.
pub trait CollectionProvider: Send + Sync {
    /// Stored ids in the backend's native enumeration order.
    fn keys(&self) -> Vec<String>;

    /// The document stored under `id`, or `None` for an unknown or empty id.
    fn get(&self, id: &str) -> Option<Document>;

    /// Stores `document` under `id` and records `id` in the order index.
    ///
    /// Returns the stored document, with `_id` set to `id`. An empty id or a
    /// missing document is a no-op returning `None`.
    fn set(&self, id: &str, document: Option<Document>) -> Option<Document>;

    /// Merges `patch` over the document stored under `id` and stores the result.
    ///
    /// Fields of the patch win, `_id` is forced to `id`. When nothing is stored
    /// under `id` this behaves as [set](CollectionProvider::set).
    fn update(&self, id: &str, patch: Option<Document>) -> Option<Document> {
        let patch = patch?;
        match self.get(id) {
            Some(mut existing) => {
                existing.merge(&patch);
                self.set(id, Some(existing))
            }
            None => self.set(id, Some(patch)),
        }
    }

    /// Deletes the document stored under `id`. `true` iff one existed.
    fn remove(&self, id: &str) -> bool;

    /// Deletes every document and resets the order index.
    fn clear(&self) -> bool;

    /// The order index sorted by the configured `order_by`, at most `limit` ids.
    fn sort(&self) -> Vec<String>;

    /// Ids of documents with a searchable field matching `query`, at most `limit`.
    ///
    /// An empty query matches nothing.
    fn search(&self, query: &str) -> Vec<String>;

    /// The order index: stored ids, each at the position of its latest `set`.
    fn order(&self) -> Vec<String>;

    fn backend_type(&self) -> BackendType;

    /// Releases the backend's resources. Further calls answer as for a failed store.
    fn close(&self) -> CollectionResult<()> {
        Ok(())
    }
}

/// Cloneable handle to a [CollectionProvider].
#[derive(Clone)]
pub struct Collection {
    inner: Arc<dyn CollectionProvider>,
}

impl Collection {
    pub fn new<T: CollectionProvider + 'static>(inner: T) -> Self {
        Collection {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for Collection {
    type Target = Arc<dyn CollectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("backend_type", &self.inner.backend_type())
            .finish()
    }
}
