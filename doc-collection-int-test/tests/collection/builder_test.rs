use doc_collection::doc;
use doc_collection::errors::ErrorKind;
use doc_collection::search::SearchOptions;
use doc_collection::{BackendType, DocumentCollection, InMemoryConfig, PersistentMapConfig};

#[test]
fn test_default_backend_is_in_memory() {
    let collection = DocumentCollection::builder().open().unwrap();
    assert_eq!(collection.backend_type(), BackendType::InMemory);
}

#[test]
fn test_backend_tags() {
    let cases = [
        ("in-memory", BackendType::InMemory),
        ("JSON", BackendType::InMemory),
        ("persistent-map", BackendType::PersistentMap),
        ("IndexedDB", BackendType::PersistentMap),
    ];
    for (tag, expected) in cases {
        let collection = DocumentCollection::builder().backend_type(tag).open().unwrap();
        assert_eq!(collection.backend_type(), expected, "tag {}", tag);
    }
}

#[test]
fn test_unknown_tag_fails_at_open() {
    let err = DocumentCollection::builder()
        .backend_type("sqlite")
        .search_options(SearchOptions::new().limit(5))
        .open()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidConfiguration);
}

#[test]
fn test_zero_limit_is_rejected() {
    let err = DocumentCollection::builder()
        .search_options(SearchOptions::new().limit(0))
        .open()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidConfiguration);
}

#[test]
fn test_invalid_exclusion_pattern_is_rejected() {
    let err = DocumentCollection::builder()
        .search_options(SearchOptions::new().exclude(["(unclosed"]))
        .open()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidConfiguration);
}

#[test]
fn test_search_options_from_json() {
    let collection = DocumentCollection::builder()
        .search_options_json(r#"{"orderBy": ["-date"], "fuzzy": true, "exclude": ["^x"]}"#)
        .open()
        .unwrap();
    collection.set_document(Some("id1"), doc!{ title: "Rust", date: "2020" });
    collection.set_document(Some("id2"), doc!{ title: "Ruby", date: "2021" });

    assert_eq!(collection.search(""), vec!["id2", "id1"]);
    assert_eq!(collection.search("rst"), vec!["id1"]);
}

#[test]
fn test_malformed_search_options_json() {
    let err = DocumentCollection::builder()
        .search_options_json(r#"{"limit": "ten"}"#)
        .open()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidConfiguration);
}

#[test]
fn test_empty_store_names_are_rejected() {
    let err = DocumentCollection::builder()
        .backend(PersistentMapConfig::new().name(""))
        .open()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidConfiguration);

    let err = DocumentCollection::builder()
        .backend(PersistentMapConfig::new().collection_name("  "))
        .open()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidConfiguration);
}

#[test]
fn test_explicit_in_memory_config() {
    let collection = DocumentCollection::builder()
        .backend(InMemoryConfig::new().collection_name("notes"))
        .open()
        .unwrap();
    collection.set_document(Some("id1"), doc!{ title: "X" });
    assert_eq!(collection.get_all_documents(), vec!["id1"]);
}
