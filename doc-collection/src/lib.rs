//! # doc-collection - embeddable document collection
//!
//! A small document store: it keeps schemaless documents under stable ids,
//! remembers the order they were stored in and answers two questions, "which
//! documents match this text fragment" and "all documents in the configured sort
//! order".
//!
//! ## Key Features
//!
//! - **Pluggable storage**: the same API over process memory, any key-value
//!   store opened through a [store::StoreModule] (for example the fjall adapter
//!   in `doc-collection-fjall-adapter`), or a remote placeholder
//! - **Text search**: literal substring or fuzzy subsequence matching, with
//!   regular-expression field exclusion
//! - **Multi-field sorting**: ascending and descending fields, stable on ties
//! - **Soft failures**: collection calls answer with absent values instead of
//!   errors; only opening a collection can fail
//!
//! ## Quick Start
//!
//! ```rust
//! use doc_collection::{doc, DocumentCollection};
//! use doc_collection::search::SearchOptions;
//!
//! let collection = DocumentCollection::builder()
//!     .backend_type("in-memory")
//!     .search_options(SearchOptions::new().order_by(["-date"]).exclude(["^secret"]))
//!     .open()
//!     .unwrap();
//!
//! collection.set_document(Some("id1"), doc!{ title: "X", date: "2020" });
//! collection.set_document(Some("id2"), r#"{"title": "Y", "date": "2021"}"#);
//!
//! assert_eq!(collection.search(""), vec!["id2", "id1"]);
//! assert_eq!(collection.search("X"), vec!["id1"]);
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - documents, the collection contract and its backends
//! - [`common`] - constants, id generation and shared utilities
//! - [`errors`] - error types and result definitions
//! - [`search`] - search options, matching and sorting
//! - [`store`] - key-value store abstractions and the in-memory store
//! - [`collection_config`] - backend selection and configuration
//! - [`document_collection`] - the collection façade
//! - [`document_collection_builder`] - façade builder

use std::thread::available_parallelism;

pub mod collection;
pub mod collection_config;
pub mod common;
pub mod document_collection;
pub mod document_collection_builder;
pub mod errors;
pub mod search;
pub mod store;

pub use collection_config::*;
pub use common::new_id;
pub use document_collection::*;
pub use document_collection_builder::*;

/// Returns the number of available CPU cores.
///
/// If detection fails, it defaults to 1.
///
/// ```rust
/// use doc_collection::get_cpu_count;
///
/// assert!(get_cpu_count() > 0);
/// ```
pub fn get_cpu_count() -> usize {
    available_parallelism()
        .map(|p| p.get())
        .unwrap_or_else(|err| {
            log::warn!("Failed to detect available parallelism: {}. Defaulting to single thread.", err);
            1
        })
}
