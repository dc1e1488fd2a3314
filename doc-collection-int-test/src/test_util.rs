use doc_collection::errors::CollectionResult;
use doc_collection::search::SearchOptions;
use doc_collection::store::memory::InMemoryStoreModule;
use doc_collection::{BackendType, DocumentCollection, PersistentMapConfig};
use doc_collection_fjall_adapter::FjallModule;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, thread};

/// Storage a test context runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    InMemory,
    /// persistent-map backend over the in-memory store module
    MemoryStore,
    /// persistent-map backend over fjall
    Fjall,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::InMemory, Backend::MemoryStore, Backend::Fjall];

    pub fn backend_type(&self) -> BackendType {
        match self {
            Backend::InMemory => BackendType::InMemory,
            Backend::MemoryStore | Backend::Fjall => BackendType::PersistentMap,
        }
    }
}

#[derive(Clone)]
pub struct TestContext {
    path: Option<String>,
    backend: Backend,
    collection: DocumentCollection,
}

impl TestContext {
    pub fn new(path: Option<String>, backend: Backend, collection: DocumentCollection) -> Self {
        Self {
            path,
            backend,
            collection,
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn collection(&self) -> DocumentCollection {
        self.collection.clone()
    }
}

pub fn random_path() -> String {
    let id = uuid::Uuid::new_v4();
    env::temp_dir()
        .join("doc-collection-int-test")
        .join(id.to_string())
        .to_string_lossy()
        .to_string()
}

/// Opens a fjall-backed collection rooted at `path`.
pub fn open_fjall_collection(
    path: &str,
    options: SearchOptions,
) -> CollectionResult<DocumentCollection> {
    let module = FjallModule::with_config().db_path(path).build();
    DocumentCollection::builder()
        .backend(PersistentMapConfig::new().store_module(module))
        .search_options(options)
        .open()
}

pub fn create_context(backend: Backend, options: SearchOptions) -> CollectionResult<TestContext> {
    match backend {
        Backend::InMemory => {
            let collection = DocumentCollection::builder()
                .backend_type("in-memory")
                .search_options(options)
                .open()?;
            Ok(TestContext::new(None, backend, collection))
        }
        Backend::MemoryStore => {
            let collection = DocumentCollection::builder()
                .backend(PersistentMapConfig::new().store_module(InMemoryStoreModule::new()))
                .search_options(options)
                .open()?;
            Ok(TestContext::new(None, backend, collection))
        }
        Backend::Fjall => {
            let path = random_path();
            let collection = open_fjall_collection(&path, options)?;
            Ok(TestContext::new(Some(path), backend, collection))
        }
    }
}

pub fn cleanup(ctx: TestContext) -> CollectionResult<()> {
    ctx.collection.close()?;
    let path = ctx.path.clone().map(PathBuf::from);
    // the keyspace has to be released before its directory goes away
    drop(ctx);

    if let Some(path) = path {
        remove_dir(&path);
    }
    Ok(())
}

/// Deletes a test directory, retrying while the engine releases its files.
pub fn remove_dir<P: AsRef<Path>>(path: P) {
    let path = path.as_ref();
    let mut retry = 0;
    while path.exists() && fs::remove_dir_all(path).is_err() && retry < 3 {
        thread::sleep(Duration::from_millis(100));
        retry += 1;
    }
}

/// Runs `test` between `before` and `after`. `after` runs even when the test
/// fails; the first failure is reported as a panic.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> CollectionResult<()>,
    B: Fn() -> CollectionResult<TestContext>,
    A: Fn(TestContext) -> CollectionResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };
    let backend = ctx.backend();

    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| test(ctx.clone())));
    let after_result = after(ctx);

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test failed on {:?}: {:?}", backend, e),
        Err(panic) => {
            let message = if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            panic!("Test panicked on {:?}: {}", backend, message);
        }
    }

    if let Err(e) = after_result {
        panic!("After run failed on {:?}: {:?}", backend, e);
    }
}

/// Runs `test` once per [Backend], each time on a fresh collection opened with
/// `options`.
pub fn run_on_all_backends<T>(options: SearchOptions, test: T)
where
    T: Fn(TestContext) -> CollectionResult<()>,
{
    for backend in Backend::ALL {
        run_test(|| create_context(backend, options.clone()), &test, cleanup);
    }
}
