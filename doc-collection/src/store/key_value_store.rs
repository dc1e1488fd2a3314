use crate::collection::Document;
use crate::errors::CollectionResult;
use std::ops::Deref;
use std::sync::Arc;

/// Iterator over `(id, document)` pairs in the store's native order.
pub type EntryIterator<'a> = Box<dyn Iterator<Item = CollectionResult<(String, Document)>> + 'a>;

/// Contract of a key-value store holding documents by id.
///
/// Every call may fail. Once [close](KeyValueStoreProvider::close)d, a store
/// rejects further operations with [ErrorKind::StoreAlreadyClosed](crate::errors::ErrorKind::StoreAlreadyClosed).
///
/// # Thread Safety
/// Implementers must be `Send + Sync`; one store may be shared by several
/// collections and read from worker threads.
pub trait KeyValueStoreProvider: Send + Sync {
    /// Name of the store, for diagnostics.
    fn name(&self) -> String;

    /// Retrieves the document stored under `key`.
    ///
    /// # Returns
    /// * `Ok(Some(document))` if the key exists
    /// * `Ok(None)` if the key does not exist
    /// * `Err(CollectionError)` if the operation fails
    fn get(&self, key: &str) -> CollectionResult<Option<Document>>;

    /// Inserts or replaces the document stored under `key`.
    fn put(&self, key: &str, document: Document) -> CollectionResult<()>;

    fn contains_key(&self, key: &str) -> CollectionResult<bool>;

    /// All keys, in the store's native order.
    fn keys(&self) -> CollectionResult<Vec<String>>;

    /// Iterates all entries in the store's native order.
    ///
    /// The iterator is lazy: stopping early avoids reading the rest of the store.
    fn entries(&self) -> CollectionResult<EntryIterator<'_>>;

    /// Removes `key`, returning the document that was stored under it.
    fn remove(&self, key: &str) -> CollectionResult<Option<Document>>;

    fn clear(&self) -> CollectionResult<()>;

    fn size(&self) -> CollectionResult<u64>;

    /// Closes the store. Persistent stores flush pending writes.
    fn close(&self) -> CollectionResult<()>;

    fn is_closed(&self) -> bool;
}

/// Cloneable handle to a [KeyValueStoreProvider].
#[derive(Clone)]
pub struct KeyValueStore {
    inner: Arc<dyn KeyValueStoreProvider>,
}

impl KeyValueStore {
    pub fn new<T: KeyValueStoreProvider + 'static>(inner: T) -> Self {
        KeyValueStore {
            inner: Arc::new(inner),
        }
    }

    /// Whether both handles point at the same store.
    pub fn same_store(&self, other: &KeyValueStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Deref for KeyValueStore {
    type Target = Arc<dyn KeyValueStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl std::fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueStore")
            .field("name", &self.inner.name())
            .field("closed", &self.inner.is_closed())
            .finish()
    }
}
