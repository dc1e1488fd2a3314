use doc_collection::doc;
use doc_collection::search::SearchOptions;
use doc_collection::store::memory::InMemoryStoreModule;
use doc_collection::store::StoreModule;
use doc_collection::{DocumentCollection, PersistentMapConfig};

fn open(module: &InMemoryStoreModule) -> DocumentCollection {
    DocumentCollection::builder()
        .backend(PersistentMapConfig::new().store_module(module.clone()))
        .search_options(SearchOptions::new().order_by(["title"]))
        .open()
        .unwrap()
}

#[test]
fn test_collections_on_one_store_share_documents() {
    let module = InMemoryStoreModule::new();
    let first = open(&module);
    let second = open(&module);

    first.set_document(Some("id1"), doc!{ title: "X" });
    assert_eq!(second.get_document("id1").unwrap().get("title"), Some("X"));
    assert_eq!(second.search("X"), vec!["id1"]);
    assert_eq!(module.open_count(), 1);
}

#[test]
fn test_second_collection_seeds_order_from_store() {
    let module = InMemoryStoreModule::new();
    let first = open(&module);
    first.set_document(Some("b"), doc!{ title: "B" });
    first.set_document(Some("a"), doc!{ title: "A" });

    let second = open(&module);
    // seeded in store order, then sorted by title
    assert_eq!(second.get_documents_order(), vec!["a", "b"]);
    assert_eq!(second.search(""), vec!["a", "b"]);
}

#[test]
fn test_documents_added_by_another_collection_are_searchable_but_unsorted() {
    let module = InMemoryStoreModule::new();
    let first = open(&module);
    let second = open(&module);

    first.set_document(Some("id1"), doc!{ title: "X" });
    // search walks the store; sort walks this instance's order index
    assert_eq!(second.search("X"), vec!["id1"]);
    assert!(second.search("").is_empty());
}

#[test]
fn test_closed_store_is_replaced_on_next_open() {
    let module = InMemoryStoreModule::new();
    let first = open(&module);
    first.set_document(Some("id1"), doc!{ title: "X" });
    first.close().unwrap();
    assert_eq!(module.open_count(), 0);

    let second = open(&module);
    assert_eq!(second.get_document("id1"), None);
    assert!(!module.open_store("dc", "documents").unwrap().is_closed());
}
