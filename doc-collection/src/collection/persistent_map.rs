use std::collections::HashSet;
use std::sync::Arc;

use crate::collection::{CollectionProvider, Document, OrderIndex};
use crate::collection_config::{BackendType, PersistentMapConfig};
use crate::common::{atomic, Atomic, ReadExecutor, WriteExecutor};
use crate::errors::CollectionResult;
use crate::search::{RawStorage, SearchEngine, SearchOptions};
use crate::store::KeyValueStore;

/// Collection over a [KeyValueStore].
///
/// Store failures never reach the caller: they are logged and answered with an
/// absent document, `false` or an empty list.
///
/// Sorting fetches every id of the order index from the store (in parallel) into
/// a transient snapshot first, so each `sort` costs one point read per document.
/// Search walks the store's native iteration instead of the order index, so
/// search results follow store order. `sort` writes its full result back into
/// the order index, so [order](CollectionProvider::order) follows the last sort.
///
/// When the store already holds documents, the order index starts out with
/// their ids in store order.
#[derive(Clone)]
pub struct PersistentMapCollection {
    inner: Arc<PersistentMapCollectionInner>,
}

impl PersistentMapCollection {
    /// Opens the store described by `config` and builds a collection over it.
    pub fn new(config: PersistentMapConfig, options: &SearchOptions) -> CollectionResult<Self> {
        config.validate()?;
        let store = config
            .get_store_module()
            .open_store(config.get_name(), config.get_collection_name())?;
        Self::with_store(store, options)
    }

    /// Builds a collection over an already opened store.
    pub fn with_store(store: KeyValueStore, options: &SearchOptions) -> CollectionResult<Self> {
        let engine = SearchEngine::new(options)?;

        let mut order = OrderIndex::new();
        for id in store.keys()? {
            order.append(&id);
        }
        log::debug!(
            "Opened persistent-map collection over {} with {} documents",
            store.name(),
            order.log_len()
        );

        Ok(PersistentMapCollection {
            inner: Arc::new(PersistentMapCollectionInner {
                store,
                order: atomic(order),
                engine,
            }),
        })
    }

    pub fn store(&self) -> KeyValueStore {
        self.inner.store.clone()
    }
}

impl CollectionProvider for PersistentMapCollection {
    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    fn get(&self, id: &str) -> Option<Document> {
        self.inner.raw_get(id)
    }

    fn set(&self, id: &str, document: Option<Document>) -> Option<Document> {
        self.inner.set(id, document)
    }

    fn remove(&self, id: &str) -> bool {
        self.inner.remove(id)
    }

    fn clear(&self) -> bool {
        self.inner.clear()
    }

    fn sort(&self) -> Vec<String> {
        self.inner.sort()
    }

    fn search(&self, query: &str) -> Vec<String> {
        self.inner.engine.search(query, self.inner.as_ref())
    }

    fn order(&self) -> Vec<String> {
        self.inner.order()
    }

    fn backend_type(&self) -> BackendType {
        BackendType::PersistentMap
    }

    fn close(&self) -> CollectionResult<()> {
        self.inner.store.close()
    }
}

struct PersistentMapCollectionInner {
    store: KeyValueStore,
    order: Atomic<OrderIndex>,
    engine: SearchEngine,
}

impl PersistentMapCollectionInner {
    fn keys(&self) -> Vec<String> {
        self.store.keys().unwrap_or_else(|err| {
            log::error!("Failed to list keys of {}: {}", self.store.name(), err);
            Vec::new()
        })
    }

    fn set(&self, id: &str, document: Option<Document>) -> Option<Document> {
        if id.is_empty() {
            return None;
        }
        let document = document?.with_id(id);

        match self.store.put(id, document.clone()) {
            Ok(()) => {
                self.order.write_with(|order| order.append(id));
                Some(document)
            }
            Err(err) => {
                log::error!("Failed to store document {} in {}: {}", id, self.store.name(), err);
                None
            }
        }
    }

    fn remove(&self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }

        match self.store.remove(id) {
            Ok(removed) => {
                self.order.write_with(|order| order.purge(id));
                removed.is_some()
            }
            Err(err) => {
                log::error!("Failed to remove document {} from {}: {}", id, self.store.name(), err);
                false
            }
        }
    }

    fn clear(&self) -> bool {
        match self.store.clear() {
            Ok(()) => {
                self.order.write_with(|order| order.reset());
                true
            }
            Err(err) => {
                log::error!("Failed to clear {}: {}", self.store.name(), err);
                false
            }
        }
    }

    fn order(&self) -> Vec<String> {
        let stored: HashSet<String> = match self.store.keys() {
            Ok(keys) => keys.into_iter().collect(),
            Err(err) => {
                log::error!("Failed to list keys of {}: {}", self.store.name(), err);
                return Vec::new();
            }
        };
        self.order
            .read_with(|order| order.resolve(|id| stored.contains(id)))
    }

    fn sort(&self) -> Vec<String> {
        let ids = self.order.read_with(|order| order.resolve(|_| true));
        let unit = self.engine.materialize(&ids, self);
        let ids = ids.into_iter().filter(|id| unit.contains_key(id)).collect();
        let sorted = self.engine.arrange(ids, |id| unit.get(id));
        self.order.write_with(|order| order.reorder(&sorted));
        self.engine.truncate(sorted)
    }
}

impl RawStorage for PersistentMapCollectionInner {
    fn raw_get(&self, id: &str) -> Option<Document> {
        if id.is_empty() {
            return None;
        }

        match self.store.get(id) {
            Ok(document) => document.map(|doc| doc.with_id(id)),
            Err(err) => {
                log::error!("Failed to read document {} from {}: {}", id, self.store.name(), err);
                None
            }
        }
    }

    fn raw_iterate(&self, visitor: &mut dyn FnMut(&str, &Document) -> bool) {
        let entries = match self.store.entries() {
            Ok(entries) => entries,
            Err(err) => {
                log::error!("Failed to iterate {}: {}", self.store.name(), err);
                return;
            }
        };

        for entry in entries {
            match entry {
                Ok((id, document)) => {
                    if !visitor(&id, &document) {
                        break;
                    }
                }
                Err(err) => {
                    log::error!("Failed to read entry of {}: {}", self.store.name(), err);
                    break;
                }
            }
        }
    }
}
