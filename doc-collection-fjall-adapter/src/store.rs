use crate::codec::DocumentCodec;
use crate::config::FjallConfig;
use crate::error::{FjallAdapterError, FjallResult};
use doc_collection::collection::Document;
use doc_collection::errors::CollectionResult;
use doc_collection::store::{EntryIterator, KeyValueStoreProvider};
use fjall::{Keyspace, PartitionHandle, PersistMode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A document store backed by one fjall partition.
///
/// The partition lives in a keyspace that may be shared with other stores of the
/// same database (see [FjallModule](crate::FjallModule)). Ids are stored as UTF-8
/// keys and documents as bincode-encoded values, so iteration follows the byte
/// order of the ids.
///
/// Closing the store persists the keyspace journal (unless disabled in
/// [FjallConfig]) and rejects every later call.
#[derive(Clone)]
pub struct FjallStore {
    inner: Arc<FjallStoreInner>,
}

impl FjallStore {
    /// Opens (or creates) the partition `collection_name` in `keyspace`.
    ///
    /// # Errors
    ///
    /// Fails if `collection_name` is not a valid partition name or the engine
    /// cannot open the partition.
    pub(crate) fn open(
        config: FjallConfig,
        keyspace: Keyspace,
        name: &str,
        collection_name: &str,
    ) -> FjallResult<FjallStore> {
        validate_name(collection_name)?;
        let partition = keyspace.open_partition(collection_name, config.partition_config())?;
        log::debug!("Opened fjall partition {}/{}", name, collection_name);

        Ok(FjallStore {
            inner: Arc::new(FjallStoreInner {
                name: format!("{}/{}", name, collection_name),
                config,
                keyspace,
                partition,
                closed: AtomicBool::new(false),
            }),
        })
    }

    /// Flushes the keyspace journal to disk without closing the store.
    pub fn commit(&self) -> CollectionResult<()> {
        self.inner.check_opened()?;
        Ok(self.inner.persist()?)
    }
}

impl KeyValueStoreProvider for FjallStore {
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    fn get(&self, key: &str) -> CollectionResult<Option<Document>> {
        Ok(self.inner.get(key)?)
    }

    fn put(&self, key: &str, document: Document) -> CollectionResult<()> {
        Ok(self.inner.put(key, &document)?)
    }

    fn contains_key(&self, key: &str) -> CollectionResult<bool> {
        Ok(self.inner.contains_key(key)?)
    }

    fn keys(&self) -> CollectionResult<Vec<String>> {
        Ok(self.inner.keys()?)
    }

    fn entries(&self) -> CollectionResult<EntryIterator<'_>> {
        self.inner.check_opened()?;
        let entries = self.inner.partition.iter().map(|entry| -> CollectionResult<(String, Document)> {
            let (key, value) = entry.map_err(FjallAdapterError::from)?;
            let id = DocumentCodec::decode_key(&key)?;
            let document = DocumentCodec::decode_document(&value)?;
            Ok((id, document))
        });
        Ok(Box::new(entries))
    }

    fn remove(&self, key: &str) -> CollectionResult<Option<Document>> {
        Ok(self.inner.remove(key)?)
    }

    fn clear(&self) -> CollectionResult<()> {
        Ok(self.inner.clear()?)
    }

    fn size(&self) -> CollectionResult<u64> {
        self.inner.check_opened()?;
        let len = self
            .inner
            .partition
            .len()
            .map_err(FjallAdapterError::from)?;
        Ok(len as u64)
    }

    fn close(&self) -> CollectionResult<()> {
        Ok(self.inner.close()?)
    }

    fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Relaxed)
    }
}

struct FjallStoreInner {
    name: String,
    config: FjallConfig,
    keyspace: Keyspace,
    partition: PartitionHandle,
    closed: AtomicBool,
}

impl FjallStoreInner {
    #[inline]
    fn check_opened(&self) -> FjallResult<()> {
        if self.closed.load(Ordering::Relaxed) {
            log::error!("Fjall store {} is closed", self.name);
            return Err(FjallAdapterError::Closed(self.name.clone()));
        }
        Ok(())
    }

    fn get(&self, key: &str) -> FjallResult<Option<Document>> {
        self.check_opened()?;
        let key = DocumentCodec::encode_key(key)?;
        match self.partition.get(key)? {
            Some(bytes) => Ok(Some(DocumentCodec::decode_document(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, document: &Document) -> FjallResult<()> {
        self.check_opened()?;
        let key = DocumentCodec::encode_key(key)?;
        let value = DocumentCodec::encode_document(document)?;
        self.partition.insert(key, value)?;
        Ok(())
    }

    fn contains_key(&self, key: &str) -> FjallResult<bool> {
        self.check_opened()?;
        let key = DocumentCodec::encode_key(key)?;
        Ok(self.partition.contains_key(key)?)
    }

    fn keys(&self) -> FjallResult<Vec<String>> {
        self.check_opened()?;
        self.partition
            .keys()
            .map(|key| DocumentCodec::decode_key(&key?))
            .collect()
    }

    fn remove(&self, key: &str) -> FjallResult<Option<Document>> {
        self.check_opened()?;
        let encoded = DocumentCodec::encode_key(key)?;
        let previous = match self.partition.get(encoded)? {
            Some(bytes) => DocumentCodec::decode_document(&bytes)?,
            None => return Ok(None),
        };
        self.partition.remove(encoded)?;
        Ok(Some(previous))
    }

    // one batch, so a failed clear leaves the partition untouched
    fn clear(&self) -> FjallResult<()> {
        self.check_opened()?;
        let mut batch = self.keyspace.batch();
        for key in self.partition.keys() {
            batch.remove(&self.partition, key?);
        }
        batch.commit()?;
        Ok(())
    }

    fn persist(&self) -> FjallResult<()> {
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }

    fn close(&self) -> FjallResult<()> {
        if self.closed.swap(true, Ordering::Relaxed) {
            return Ok(());
        }

        if self.config.persist_on_close() {
            if let Err(err) = self.persist() {
                log::error!("Failed to persist fjall store {}: {}", self.name, err);
                return Err(err);
            }
        }
        log::debug!("Closed fjall store {}", self.name);
        Ok(())
    }
}

impl Drop for FjallStoreInner {
    fn drop(&mut self) {
        if !self.closed.load(Ordering::Relaxed) && self.config.persist_on_close() {
            if let Err(err) = self.persist() {
                // never panic in drop
                log::error!("Failed to persist fjall store {} on drop: {}", self.name, err);
            }
        }
    }
}

/// Checks a keyspace or partition name against the engine's rules: 1 to 255
/// characters, each alphanumeric or one of `_-#$`.
pub(crate) fn validate_name(name: &str) -> FjallResult<()> {
    let valid = !name.is_empty()
        && name.len() <= 255
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '#' | '$'));

    if valid {
        Ok(())
    } else {
        log::error!("Invalid fjall name: {:?}", name);
        Err(FjallAdapterError::InvalidName(name.to_string()))
    }
}
