//! Key-value storage behind the persistent-map backend.
//!
//! A store maps document ids to documents and may fail on any call. Stores are
//! opened through a [StoreModule], which lets the persistent-map backend stay
//! agnostic of where the data lives:
//!
//! - **In-memory store**: [memory::InMemoryStoreModule], a concurrent skip list,
//!   useful for tests and for sharing one store between collections.
//! - **Fjall store**: `doc_collection_fjall_adapter`, durable LSM-tree storage.
//!
//! Store implementations provide [KeyValueStoreProvider] and are handed around as
//! the cheap, cloneable [KeyValueStore] handle.

mod key_value_store;
pub mod memory;
mod store_module;

pub use key_value_store::*;
pub use store_module::*;
