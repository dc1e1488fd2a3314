//! # doc-collection-fjall-adapter
//!
//! Durable storage for `doc-collection` on [fjall](https://docs.rs/fjall), an
//! embedded LSM-tree key-value engine.
//!
//! [FjallModule] implements `StoreModule`: hand it to a `PersistentMapConfig` and
//! the persistent-map backend keeps its documents on disk, one keyspace per
//! database name and one partition per collection.
//!
//! ```rust,no_run
//! use doc_collection::{doc, DocumentCollection, PersistentMapConfig};
//! use doc_collection_fjall_adapter::FjallModule;
//!
//! let module = FjallModule::with_config()
//!     .db_path("/var/lib/notes")
//!     .production_preset()
//!     .build();
//!
//! let collection = DocumentCollection::builder()
//!     .backend(PersistentMapConfig::new().store_module(module))
//!     .open()
//!     .unwrap();
//!
//! collection.set_document(Some("id1"), doc!{ title: "X" });
//! collection.close().unwrap();
//! ```

mod codec;
mod config;
mod error;
mod module;
mod store;
mod version;

pub use config::*;
pub use error::*;
pub use module::*;
pub use store::FjallStore;
pub use version::store_version;
