//! Documents and the collections that store them.
//!
//! A [Document] is a flat mapping from field name to text. A collection stores
//! documents by id and answers two queries: the documents matching a text
//! fragment, and all documents in the configured sort order.
//!
//! Every backend implements [CollectionProvider]:
//!
//! - [InMemoryCollection]: documents live in process memory.
//! - [PersistentMapCollection]: documents live in a [KeyValueStore](crate::store::KeyValueStore).
//! - [RemoteStubCollection]: validates its configuration, stores nothing.
//!
//! ```rust
//! use doc_collection::collection::{CollectionProvider, InMemoryCollection};
//! use doc_collection::search::SearchOptions;
//! use doc_collection::{doc, InMemoryConfig};
//!
//! let notes = InMemoryCollection::new(
//!     InMemoryConfig::default(),
//!     &SearchOptions::new().order_by(["-date"]),
//! ).unwrap();
//!
//! notes.set("id1", Some(doc!{ title: "X", date: "2020" }));
//! notes.set("id2", Some(doc!{ title: "Y", date: "2021" }));
//! assert_eq!(notes.sort(), vec!["id2", "id1"]);
//! assert_eq!(notes.search("X"), vec!["id1"]);
//! ```

#[allow(clippy::module_inception)]
mod collection;
mod document;
mod in_memory;
mod order_index;
mod persistent_map;
mod remote_stub;

pub use collection::*;
pub use document::*;
pub use in_memory::*;
pub use order_index::*;
pub use persistent_map::*;
pub use remote_stub::*;
