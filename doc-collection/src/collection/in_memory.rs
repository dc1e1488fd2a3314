use indexmap::IndexMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::collection::{CollectionProvider, Document, OrderIndex};
use crate::collection_config::{BackendType, InMemoryConfig};
use crate::common::{atomic, Atomic, ReadExecutor, WriteExecutor};
use crate::errors::CollectionResult;
use crate::search::{RawStorage, SearchEngine, SearchOptions};

/// Collection kept entirely in process memory.
///
/// Documents live in an insertion-ordered map, so [keys](CollectionProvider::keys)
/// lists ids in the order they were first stored. Search and sort run directly
/// against the live map and the order index, and `sort` leaves the order index
/// sorted, so later searches scan in sorted order.
#[derive(Clone)]
pub struct InMemoryCollection {
    inner: Arc<InMemoryCollectionInner>,
}

impl InMemoryCollection {
    pub fn new(config: InMemoryConfig, options: &SearchOptions) -> CollectionResult<Self> {
        let engine = SearchEngine::new(options)?;
        log::debug!(
            "Opened in-memory collection {}",
            config.get_collection_name()
        );
        Ok(InMemoryCollection {
            inner: Arc::new(InMemoryCollectionInner {
                name: config.get_collection_name().to_string(),
                documents: atomic(IndexMap::new()),
                order: atomic(OrderIndex::new()),
                engine,
                closed: AtomicBool::new(false),
            }),
        })
    }

    /// Number of stored documents.
    pub fn size(&self) -> usize {
        self.inner.documents.read_with(|docs| docs.len())
    }
}

impl CollectionProvider for InMemoryCollection {
    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    fn get(&self, id: &str) -> Option<Document> {
        self.inner.get(id)
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
        self.inner.search(query)
    }

    fn order(&self) -> Vec<String> {
        self.inner.order()
    }

    fn backend_type(&self) -> BackendType {
        BackendType::InMemory
    }

    fn close(&self) -> CollectionResult<()> {
        self.inner.close();
        Ok(())
    }
}

// Lock order: `documents` before `order`.
struct InMemoryCollectionInner {
    name: String,
    documents: Atomic<IndexMap<String, Document>>,
    order: Atomic<OrderIndex>,
    engine: SearchEngine,
    closed: AtomicBool,
}

impl InMemoryCollectionInner {
    fn is_open(&self) -> bool {
        if self.closed.load(Ordering::Relaxed) {
            log::warn!("Collection {} is closed", self.name);
            return false;
        }
        true
    }

    fn keys(&self) -> Vec<String> {
        if !self.is_open() {
            return Vec::new();
        }
        self.documents.read_with(|docs| docs.keys().cloned().collect())
    }

    fn get(&self, id: &str) -> Option<Document> {
        if id.is_empty() || !self.is_open() {
            return None;
        }
        self.documents.read_with(|docs| docs.get(id).cloned())
    }

    fn set(&self, id: &str, document: Option<Document>) -> Option<Document> {
        if id.is_empty() || !self.is_open() {
            return None;
        }
        let document = document?.with_id(id);

        let mut documents = self.documents.write();
        documents.insert(id.to_string(), document.clone());
        self.order.write_with(|order| order.append(id));
        Some(document)
    }

    fn remove(&self, id: &str) -> bool {
        if id.is_empty() || !self.is_open() {
            return false;
        }
        let mut documents = self.documents.write();
        let removed = documents.shift_remove(id).is_some();
        if removed {
            self.order.write_with(|order| order.purge(id));
        }
        removed
    }

    fn clear(&self) -> bool {
        if !self.is_open() {
            return false;
        }
        let mut documents = self.documents.write();
        documents.clear();
        self.order.write_with(|order| order.reset());
        true
    }

    fn order(&self) -> Vec<String> {
        if !self.is_open() {
            return Vec::new();
        }
        let documents = self.documents.read();
        self.order
            .read_with(|order| order.resolve(|id| documents.contains_key(id)))
    }

    fn sort(&self) -> Vec<String> {
        if !self.is_open() {
            return Vec::new();
        }
        let documents = self.documents.read();
        let ids = self
            .order
            .read_with(|order| order.resolve(|id| documents.contains_key(id)));
        let sorted = self.engine.arrange(ids, |id| documents.get(id));
        self.order.write_with(|order| order.reorder(&sorted));
        self.engine.truncate(sorted)
    }

    fn search(&self, query: &str) -> Vec<String> {
        if !self.is_open() {
            return Vec::new();
        }
        let documents = self.documents.read();
        let view = LiveView {
            documents: &*documents,
            order: self
                .order
                .read_with(|order| order.resolve(|id| documents.contains_key(id))),
        };
        self.engine.search(query, &view)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
        self.documents.write_with(|docs| docs.clear());
        self.order.write_with(|order| order.reset());
        log::debug!("Closed in-memory collection {}", self.name);
    }
}

/// Search candidates of the in-memory backend: the live map, in order-index order.
struct LiveView<'a> {
    documents: &'a IndexMap<String, Document>,
    order: Vec<String>,
}

impl RawStorage for LiveView<'_> {
    fn raw_get(&self, id: &str) -> Option<Document> {
        self.documents.get(id).cloned()
    }

    fn raw_iterate(&self, visitor: &mut dyn FnMut(&str, &Document) -> bool) {
        for id in &self.order {
            if let Some(document) = self.documents.get(id) {
                if !visitor(id, document) {
                    break;
                }
            }
        }
    }
}
