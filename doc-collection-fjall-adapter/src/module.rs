use crate::config::FjallConfig;
use crate::error::{FjallAdapterError, FjallResult};
use crate::store::{validate_name, FjallStore};
use doc_collection::common::{atomic, Atomic, WriteExecutor};
use doc_collection::errors::{CollectionError, CollectionResult, ErrorKind};
use doc_collection::store::{KeyValueStore, StoreModule};
use fjall::{CompressionType, Keyspace};
use std::collections::HashMap;

/// Opens document stores on fjall, an embedded LSM-tree key-value engine.
///
/// Each store name maps to a keyspace directory under the configured `db_path`,
/// and each collection name to a partition in that keyspace. Stores opened for
/// the same name share one keyspace, so several collections of one database
/// live side by side in one directory.
///
/// # Examples
///
/// ```rust,no_run
/// use doc_collection::{DocumentCollection, PersistentMapConfig};
/// use doc_collection_fjall_adapter::FjallModule;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let module = FjallModule::with_config()
///     .db_path("/path/to/db")
///     .build();
///
/// let collection = DocumentCollection::builder()
///     .backend(PersistentMapConfig::new().name("notes").store_module(module))
///     .open()?;
/// # Ok(())
/// # }
/// ```
///
/// # Configuration Presets
///
/// - `production_preset()` - periodic fsync, bloom filters and a larger cache
/// - `low_memory_preset()` - small cache and buffers, single workers
#[derive(Clone)]
pub struct FjallModule {
    store_config: FjallConfig,
    keyspaces: Atomic<HashMap<String, Keyspace>>,
}

impl FjallModule {
    /// Creates a new builder for configuring a fjall module.
    #[inline]
    pub fn with_config() -> FjallModuleBuilder {
        FjallModuleBuilder::new()
    }

    pub fn config(&self) -> &FjallConfig {
        &self.store_config
    }

    fn keyspace(&self, name: &str) -> FjallResult<Keyspace> {
        validate_name(name)?;
        self.keyspaces.write_with(|keyspaces| {
            if let Some(keyspace) = keyspaces.get(name) {
                return Ok(keyspace.clone());
            }

            let keyspace = Keyspace::open(self.store_config.keyspace_config(name))
                .map_err(|err| {
                    log::error!("Failed to open or create keyspace {}: {}", name, err);
                    FjallAdapterError::from(err)
                })?;
            keyspaces.insert(name.to_string(), keyspace.clone());
            log::debug!(
                "Opened fjall keyspace at {}",
                self.store_config.keyspace_path(name).display()
            );
            Ok(keyspace)
        })
    }
}

impl StoreModule for FjallModule {
    fn open_store(&self, name: &str, collection_name: &str) -> CollectionResult<KeyValueStore> {
        if self.store_config.db_path().is_empty() {
            log::error!("Fjall module has no db path");
            return Err(CollectionError::new(
                "Fjall module requires a db path",
                ErrorKind::InvalidConfiguration,
            ));
        }

        let keyspace = self.keyspace(name)?;
        let store = FjallStore::open(self.store_config.clone(), keyspace, name, collection_name)?;
        Ok(KeyValueStore::new(store))
    }
}

/// Builder of [FjallModule].
pub struct FjallModuleBuilder {
    store_config: FjallConfig,
}

impl Default for FjallModuleBuilder {
    fn default() -> Self {
        FjallModuleBuilder::new()
    }
}

impl FjallModuleBuilder {
    #[inline]
    pub fn new() -> FjallModuleBuilder {
        FjallModuleBuilder {
            store_config: FjallConfig::new(),
        }
    }

    /// Durable defaults for long-running services.
    #[inline]
    pub fn production_preset(self) -> Self {
        let cpus = doc_collection::get_cpu_count();

        self
            .cache_size(256 * 1024 * 1024)
            .max_write_buffer_size(128 * 1024 * 1024)
            .max_memtable_size(32 * 1024 * 1024)
            .flush_workers(cpus)
            .compaction_workers((cpus / 2).max(1))
            .bloom_filter_bits(10)
            // 100ms
            .fsync_frequency(100)
            .compression_type(CompressionType::Lz4)
    }

    #[inline]
    pub fn low_memory_preset(self) -> Self {
        self
            .cache_size(16 * 1024 * 1024)
            .max_write_buffer_size(32 * 1024 * 1024)
            .max_memtable_size(8 * 1024 * 1024)
            .flush_workers(1)
            .compaction_workers(1)
            .bloom_filter_bits(10)
    }

    /// Base directory; keyspaces are created below it.
    #[inline]
    pub fn db_path(self, db_path: &str) -> Self {
        self.store_config.set_db_path(db_path);
        self
    }

    #[inline]
    pub fn manual_journal_persist(self, manual_journal_persist: bool) -> Self {
        self.store_config.set_manual_journal_persist(manual_journal_persist);
        self
    }

    #[inline]
    pub fn flush_workers(self, flush_workers_count: usize) -> Self {
        self.store_config.set_flush_workers(flush_workers_count);
        self
    }

    #[inline]
    pub fn compaction_workers(self, compaction_workers_count: usize) -> Self {
        self.store_config.set_compaction_workers(compaction_workers_count);
        self
    }

    #[inline]
    pub fn cache_size(self, cache_size: u64) -> Self {
        self.store_config.set_cache_size(cache_size);
        self
    }

    #[inline]
    pub fn max_journaling_size(self, max_journaling_size: u64) -> Self {
        self.store_config.set_max_journaling_size(max_journaling_size);
        self
    }

    #[inline]
    pub fn max_write_buffer_size(self, max_write_buffer_size: u64) -> Self {
        self.store_config.set_max_write_buffer_size(max_write_buffer_size);
        self
    }

    #[inline]
    pub fn fsync_frequency(self, fsync_frequency: u16) -> Self {
        self.store_config.set_fsync_frequency(fsync_frequency);
        self
    }

    #[inline]
    pub fn persist_on_close(self, persist_on_close: bool) -> Self {
        self.store_config.set_persist_on_close(persist_on_close);
        self
    }

    #[inline]
    pub fn bloom_filter_bits(self, bloom_filter_bits: u8) -> Self {
        self.store_config.set_bloom_filter_bits(bloom_filter_bits as i8);
        self
    }

    #[inline]
    pub fn compression_type(self, compression_type: CompressionType) -> Self {
        self.store_config.set_compression_type(compression_type);
        self
    }

    #[inline]
    pub fn max_memtable_size(self, max_memtable_size: u32) -> Self {
        self.store_config.set_max_memtable_size(max_memtable_size);
        self
    }

    #[inline]
    pub fn build(self) -> FjallModule {
        FjallModule {
            store_config: self.store_config,
            keyspaces: atomic(HashMap::new()),
        }
    }
}
