use crate::collection::Document;
use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use crate::store::{EntryIterator, KeyValueStoreProvider};
use crossbeam_skiplist::SkipMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory key-value store using a concurrent skip list.
///
/// Keys are kept in sorted order, so this store's native iteration order is the
/// id order. Clones share the same data.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<InMemoryStoreInner>,
}

impl InMemoryStore {
    pub fn new(name: &str) -> Self {
        InMemoryStore {
            inner: Arc::new(InMemoryStoreInner::new(name)),
        }
    }
}

impl KeyValueStoreProvider for InMemoryStore {
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    fn get(&self, key: &str) -> CollectionResult<Option<Document>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, document: Document) -> CollectionResult<()> {
        self.inner.put(key, document)
    }

    fn contains_key(&self, key: &str) -> CollectionResult<bool> {
        self.inner.contains_key(key)
    }

    fn keys(&self) -> CollectionResult<Vec<String>> {
        self.inner.keys()
    }

    fn entries(&self) -> CollectionResult<EntryIterator<'_>> {
        self.inner.entries()
    }

    fn remove(&self, key: &str) -> CollectionResult<Option<Document>> {
        self.inner.remove(key)
    }

    fn clear(&self) -> CollectionResult<()> {
        self.inner.clear()
    }

    fn size(&self) -> CollectionResult<u64> {
        self.inner.size()
    }

    fn close(&self) -> CollectionResult<()> {
        self.inner.close()
    }

    fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Relaxed)
    }
}

struct InMemoryStoreInner {
    backing_map: SkipMap<String, Document>,
    closed: AtomicBool,
    name: String,
}

impl InMemoryStoreInner {
    fn new(name: &str) -> InMemoryStoreInner {
        InMemoryStoreInner {
            backing_map: SkipMap::new(),
            closed: AtomicBool::from(false),
            name: name.to_string(),
        }
    }

    fn check_opened(&self) -> CollectionResult<()> {
        if self.closed.load(Ordering::Relaxed) {
            log::error!("Store {} is closed", self.name);
            return Err(CollectionError::new(
                &format!("Store {} is closed", self.name),
                ErrorKind::StoreAlreadyClosed,
            ));
        }
        Ok(())
    }

    fn get(&self, key: &str) -> CollectionResult<Option<Document>> {
        self.check_opened()?;
        Ok(self.backing_map.get(key).map(|entry| entry.value().clone()))
    }

    fn put(&self, key: &str, document: Document) -> CollectionResult<()> {
        self.check_opened()?;
        self.backing_map.insert(key.to_string(), document);
        Ok(())
    }

    fn contains_key(&self, key: &str) -> CollectionResult<bool> {
        self.check_opened()?;
        Ok(self.backing_map.contains_key(key))
    }

    fn keys(&self) -> CollectionResult<Vec<String>> {
        self.check_opened()?;
        Ok(self.backing_map.iter().map(|entry| entry.key().clone()).collect())
    }

    fn entries(&self) -> CollectionResult<EntryIterator<'_>> {
        self.check_opened()?;
        let iter = self
            .backing_map
            .iter()
            .map(|entry| Ok((entry.key().clone(), entry.value().clone())));
        Ok(Box::new(iter))
    }

    fn remove(&self, key: &str) -> CollectionResult<Option<Document>> {
        self.check_opened()?;
        Ok(self.backing_map.remove(key).map(|entry| entry.value().clone()))
    }

    fn clear(&self) -> CollectionResult<()> {
        self.check_opened()?;
        self.backing_map.clear();
        Ok(())
    }

    fn size(&self) -> CollectionResult<u64> {
        self.check_opened()?;
        Ok(self.backing_map.len() as u64)
    }

    fn close(&self) -> CollectionResult<()> {
        self.closed.store(true, Ordering::Relaxed);
        self.backing_map.clear();
        log::debug!("Closed in-memory store {}", self.name);
        Ok(())
    }
}
