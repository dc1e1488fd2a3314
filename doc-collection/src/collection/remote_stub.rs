use crate::collection::{CollectionProvider, Document};
use crate::collection_config::{BackendType, RemoteStubConfig};
use crate::errors::CollectionResult;
use crate::search::{SearchEngine, SearchOptions};

/// Placeholder for a hosted document database.
///
/// The configuration is checked when the collection is built; afterwards every
/// call answers with an absent document, `false` or an empty list.
pub struct RemoteStubCollection {
    config: RemoteStubConfig,
}

impl RemoteStubCollection {
    pub fn new(config: RemoteStubConfig, options: &SearchOptions) -> CollectionResult<Self> {
        config.validate()?;
        SearchEngine::new(options)?;
        log::debug!(
            "Opened remote stub collection {} for project {}",
            config.get_collection_name(),
            config.get_project_id()
        );
        Ok(RemoteStubCollection { config })
    }

    pub fn config(&self) -> &RemoteStubConfig {
        &self.config
    }

    fn unsupported(&self, operation: &str) {
        log::warn!(
            "{} is not supported by the remote stub ({})",
            operation,
            self.config.get_collection_name()
        );
    }
}

impl CollectionProvider for RemoteStubCollection {
    fn keys(&self) -> Vec<String> {
        self.unsupported("keys");
        Vec::new()
    }

    fn get(&self, _id: &str) -> Option<Document> {
        self.unsupported("get");
        None
    }

    fn set(&self, _id: &str, _document: Option<Document>) -> Option<Document> {
        self.unsupported("set");
        None
    }

    fn update(&self, _id: &str, _patch: Option<Document>) -> Option<Document> {
        self.unsupported("update");
        None
    }

    fn remove(&self, _id: &str) -> bool {
        self.unsupported("remove");
        false
    }

    fn clear(&self) -> bool {
        self.unsupported("clear");
        false
    }

    fn sort(&self) -> Vec<String> {
        self.unsupported("sort");
        Vec::new()
    }

    fn search(&self, _query: &str) -> Vec<String> {
        self.unsupported("search");
        Vec::new()
    }

    fn order(&self) -> Vec<String> {
        self.unsupported("order");
        Vec::new()
    }

    fn backend_type(&self) -> BackendType {
        BackendType::RemoteStub
    }
}
