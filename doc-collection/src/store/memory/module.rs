use crate::common::{atomic, Atomic, ReadExecutor, WriteExecutor};
use crate::errors::CollectionResult;
use crate::store::memory::InMemoryStore;
use crate::store::{KeyValueStore, StoreModule};
use std::collections::HashMap;

/// Opens in-memory stores.
///
/// The module remembers the stores it opened: opening the same
/// `(name, collection_name)` pair again returns the same store until it is closed.
/// Clones of the module share that registry.
#[derive(Clone, Default)]
pub struct InMemoryStoreModule {
    stores: Atomic<HashMap<(String, String), KeyValueStore>>,
}

impl InMemoryStoreModule {
    pub fn new() -> InMemoryStoreModule {
        InMemoryStoreModule {
            stores: atomic(HashMap::new()),
        }
    }

    /// Number of open stores.
    pub fn open_count(&self) -> usize {
        self.stores
            .read_with(|stores| stores.values().filter(|it| !it.is_closed()).count())
    }
}

impl StoreModule for InMemoryStoreModule {
    fn open_store(&self, name: &str, collection_name: &str) -> CollectionResult<KeyValueStore> {
        let key = (name.to_string(), collection_name.to_string());
        let store = self.stores.write_with(|stores| {
            match stores.get(&key) {
                Some(store) if !store.is_closed() => store.clone(),
                _ => {
                    let store = KeyValueStore::new(InMemoryStore::new(&format!(
                        "{}/{}",
                        name, collection_name
                    )));
                    stores.insert(key.clone(), store.clone());
                    log::debug!("Opened in-memory store {}/{}", name, collection_name);
                    store
                }
            }
        });
        Ok(store)
    }
}
