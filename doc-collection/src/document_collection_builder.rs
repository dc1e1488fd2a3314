use crate::collection::{Collection, InMemoryCollection, PersistentMapCollection, RemoteStubCollection};
use crate::collection_config::{BackendConfig, BackendType};
use crate::document_collection::DocumentCollection;
use crate::errors::{CollectionError, CollectionResult};
use crate::search::SearchOptions;

/// Builder for [DocumentCollection].
///
/// Setter failures are kept until [open](DocumentCollectionBuilder::open), which
/// reports the first one. The whole configuration is validated there as well.
///
/// # Examples
///
/// ```rust
/// use doc_collection::{DocumentCollection, BackendType};
/// use doc_collection::search::SearchOptions;
///
/// let collection = DocumentCollection::builder()
///     .backend_type("json")
///     .search_options(SearchOptions::new().order_by(["-date"]).limit(10))
///     .open()
///     .unwrap();
/// assert_eq!(collection.backend_type(), BackendType::InMemory);
///
/// let err = DocumentCollection::builder().backend_type("sqlite").open();
/// assert!(err.is_err());
/// ```
#[derive(Default)]
pub struct DocumentCollectionBuilder {
    error: Option<CollectionError>,
    backend: BackendConfig,
    search_options: SearchOptions,
}

impl DocumentCollectionBuilder {
    pub fn new() -> Self {
        DocumentCollectionBuilder::default()
    }

    /// Selects a backend by tag, with that backend's default configuration.
    ///
    /// Tags are matched case-insensitively: `in-memory` (or `json`),
    /// `persistent-map` (or `indexeddb`), `remote-stub` (or `firestore`).
    pub fn backend_type(mut self, tag: &str) -> Self {
        if self.error.is_none() {
            match tag.parse::<BackendType>() {
                Ok(backend_type) => self.backend = BackendConfig::for_type(backend_type),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Selects a backend together with its configuration.
    pub fn backend<C: Into<BackendConfig>>(mut self, config: C) -> Self {
        self.backend = config.into();
        self
    }

    pub fn search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    /// Reads search options from JSON (`orderBy`, `fuzzy`, `limit`, `exclude`).
    pub fn search_options_json(mut self, text: &str) -> Self {
        if self.error.is_none() {
            match SearchOptions::from_json(text) {
                Ok(options) => self.search_options = options,
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Validates the configuration and opens the collection.
    ///
    /// # Errors
    ///
    /// * an earlier setter failed (unknown backend tag, malformed options)
    /// * the search options are invalid (zero limit, bad exclusion pattern)
    /// * the backend configuration is incomplete
    /// * the store cannot be opened
    pub fn open(self) -> CollectionResult<DocumentCollection> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.search_options.validate()?;
        self.backend.validate()?;

        let backend_type = self.backend.backend_type();
        let collection = match self.backend {
            BackendConfig::InMemory(config) => {
                Collection::new(InMemoryCollection::new(config, &self.search_options)?)
            }
            BackendConfig::PersistentMap(config) => {
                Collection::new(PersistentMapCollection::new(config, &self.search_options)?)
            }
            BackendConfig::RemoteStub(config) => {
                Collection::new(RemoteStubCollection::new(config, &self.search_options)?)
            }
        };
        log::debug!("Opened document collection on {} backend", backend_type);
        Ok(DocumentCollection::new(collection))
    }
}
