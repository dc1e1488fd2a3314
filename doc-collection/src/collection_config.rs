//! Backend selection and per-backend configuration.

use itertools::Itertools;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use crate::common::{DEFAULT_COLLECTION_NAME, DEFAULT_STORE_NAME};
use crate::errors::{CollectionError, CollectionResult, ErrorKind};
use crate::store::memory::InMemoryStoreModule;
use crate::store::StoreModule;

/// Kind of backend a collection runs on.
///
/// Parsed case-insensitively from a tag. Besides the canonical tags, the legacy
/// names `json`, `indexeddb` and `firestore` are accepted.
///
/// ```rust
/// use doc_collection::BackendType;
///
/// assert_eq!("IndexedDB".parse::<BackendType>().unwrap(), BackendType::PersistentMap);
/// assert_eq!(BackendType::InMemory.to_string(), "in-memory");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    InMemory,
    PersistentMap,
    RemoteStub,
}

impl FromStr for BackendType {
    type Err = CollectionError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_lowercase().as_str() {
            "in-memory" | "json" => Ok(BackendType::InMemory),
            "persistent-map" | "indexeddb" => Ok(BackendType::PersistentMap),
            "remote-stub" | "firestore" => Ok(BackendType::RemoteStub),
            _ => {
                log::error!("Invalid storage type: {}", tag);
                Err(CollectionError::new(
                    &format!("Invalid storage type: {}", tag),
                    ErrorKind::InvalidConfiguration,
                ))
            }
        }
    }
}

impl Display for BackendType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::InMemory => write!(f, "in-memory"),
            BackendType::PersistentMap => write!(f, "persistent-map"),
            BackendType::RemoteStub => write!(f, "remote-stub"),
        }
    }
}

/// Configuration of the in-memory backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryConfig {
    collection_name: String,
}

impl Default for InMemoryConfig {
    fn default() -> Self {
        InMemoryConfig {
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
        }
    }
}

impl InMemoryConfig {
    pub fn new() -> Self {
        InMemoryConfig::default()
    }

    pub fn collection_name(mut self, collection_name: &str) -> Self {
        self.collection_name = collection_name.to_string();
        self
    }

    pub fn get_collection_name(&self) -> &str {
        &self.collection_name
    }
}

/// Configuration of the persistent-map backend.
///
/// The store module opens the key-value store for `(name, collection_name)`.
/// Without an explicit module the store is kept in memory, shared by every
/// collection opened from clones of this configuration.
#[derive(Clone)]
pub struct PersistentMapConfig {
    name: String,
    collection_name: String,
    module: Arc<dyn StoreModule>,
}

impl Default for PersistentMapConfig {
    fn default() -> Self {
        PersistentMapConfig {
            name: DEFAULT_STORE_NAME.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            module: Arc::new(InMemoryStoreModule::new()),
        }
    }
}

impl PersistentMapConfig {
    pub fn new() -> Self {
        PersistentMapConfig::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn collection_name(mut self, collection_name: &str) -> Self {
        self.collection_name = collection_name.to_string();
        self
    }

    pub fn store_module<M: StoreModule + 'static>(mut self, module: M) -> Self {
        self.module = Arc::new(module);
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn get_store_module(&self) -> Arc<dyn StoreModule> {
        self.module.clone()
    }

    pub fn validate(&self) -> CollectionResult<()> {
        if self.name.trim().is_empty() {
            log::error!("Store name cannot be empty");
            return Err(CollectionError::new(
                "Store name cannot be empty",
                ErrorKind::InvalidConfiguration,
            ));
        }
        if self.collection_name.trim().is_empty() {
            log::error!("Collection name cannot be empty");
            return Err(CollectionError::new(
                "Collection name cannot be empty",
                ErrorKind::InvalidConfiguration,
            ));
        }
        Ok(())
    }
}

impl Debug for PersistentMapConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentMapConfig")
            .field("name", &self.name)
            .field("collection_name", &self.collection_name)
            .finish_non_exhaustive()
    }
}

/// Configuration of the remote-stub backend.
///
/// All three credentials are required, even though the stub never connects.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RemoteStubConfig {
    api_key: String,
    auth_domain: String,
    project_id: String,
    collection_name: String,
}

impl RemoteStubConfig {
    pub fn new(api_key: &str, auth_domain: &str, project_id: &str) -> Self {
        RemoteStubConfig {
            api_key: api_key.to_string(),
            auth_domain: auth_domain.to_string(),
            project_id: project_id.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
        }
    }

    pub fn collection_name(mut self, collection_name: &str) -> Self {
        self.collection_name = collection_name.to_string();
        self
    }

    pub fn get_api_key(&self) -> &str {
        &self.api_key
    }

    pub fn get_auth_domain(&self) -> &str {
        &self.auth_domain
    }

    pub fn get_project_id(&self) -> &str {
        &self.project_id
    }

    pub fn get_collection_name(&self) -> &str {
        if self.collection_name.is_empty() {
            DEFAULT_COLLECTION_NAME
        } else {
            &self.collection_name
        }
    }

    pub fn validate(&self) -> CollectionResult<()> {
        let missing = [
            ("api_key", &self.api_key),
            ("auth_domain", &self.auth_domain),
            ("project_id", &self.project_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .join(", ");

        if !missing.is_empty() {
            log::error!("Remote configuration is missing {}", missing);
            return Err(CollectionError::new(
                &format!("Remote configuration is missing {}", missing),
                ErrorKind::InvalidConfiguration,
            ));
        }
        Ok(())
    }
}

impl Debug for RemoteStubConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStubConfig")
            .field("api_key", &"***")
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("collection_name", &self.get_collection_name())
            .finish()
    }
}

/// Backend a collection is opened with, together with its configuration.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    InMemory(InMemoryConfig),
    PersistentMap(PersistentMapConfig),
    RemoteStub(RemoteStubConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::InMemory(InMemoryConfig::default())
    }
}

impl BackendConfig {
    /// Default configuration for a backend type.
    ///
    /// The remote stub defaults to empty credentials and will not validate.
    pub fn for_type(backend_type: BackendType) -> Self {
        match backend_type {
            BackendType::InMemory => BackendConfig::InMemory(InMemoryConfig::default()),
            BackendType::PersistentMap => {
                BackendConfig::PersistentMap(PersistentMapConfig::default())
            }
            BackendType::RemoteStub => BackendConfig::RemoteStub(RemoteStubConfig::default()),
        }
    }

    pub fn backend_type(&self) -> BackendType {
        match self {
            BackendConfig::InMemory(_) => BackendType::InMemory,
            BackendConfig::PersistentMap(_) => BackendType::PersistentMap,
            BackendConfig::RemoteStub(_) => BackendType::RemoteStub,
        }
    }

    pub fn validate(&self) -> CollectionResult<()> {
        match self {
            BackendConfig::InMemory(_) => Ok(()),
            BackendConfig::PersistentMap(config) => config.validate(),
            BackendConfig::RemoteStub(config) => config.validate(),
        }
    }
}

impl From<InMemoryConfig> for BackendConfig {
    fn from(config: InMemoryConfig) -> Self {
        BackendConfig::InMemory(config)
    }
}

impl From<PersistentMapConfig> for BackendConfig {
    fn from(config: PersistentMapConfig) -> Self {
        BackendConfig::PersistentMap(config)
    }
}

impl From<RemoteStubConfig> for BackendConfig {
    fn from(config: RemoteStubConfig) -> Self {
        BackendConfig::RemoteStub(config)
    }
}
