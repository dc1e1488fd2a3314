use crate::errors::CollectionResult;
use crate::store::KeyValueStore;

/// Factory of key-value stores.
///
/// `name` identifies the database and `collection_name` the document space
/// inside it, the way a keyspace holds partitions.
pub trait StoreModule: Send + Sync {
    fn open_store(&self, name: &str, collection_name: &str) -> CollectionResult<KeyValueStore>;
}
