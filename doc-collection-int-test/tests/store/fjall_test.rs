use doc_collection::doc;
use doc_collection::errors::ErrorKind;
use doc_collection::search::SearchOptions;
use doc_collection::{DocumentCollection, PersistentMapConfig};
use doc_collection_fjall_adapter::{store_version, FjallModule};
use doc_collection_int_test::test_util::{
    cleanup, create_context, open_fjall_collection, random_path, remove_dir, run_test, Backend,
};
use std::collections::HashSet;

// Each collection below is dropped before the path is opened again: one keyspace
// directory is never held by two engines at once.

#[test]
fn test_reopen_sees_stored_documents() {
    let path = random_path();
    let options = SearchOptions::new().order_by(["-date"]);
    {
        let collection = open_fjall_collection(&path, options.clone()).unwrap();
        collection.set_document(Some("id1"), doc!{ title: "X", date: "2020" });
        collection.set_document(Some("id2"), doc!{ title: "Y", date: "2021" });
        collection.close().unwrap();
    }
    {
        let reopened = open_fjall_collection(&path, options).unwrap();
        assert_eq!(
            reopened.get_document("id1"),
            Some(doc!{ title: "X", date: "2020", "_id": "id1" })
        );
        let ids: HashSet<String> = reopened.get_documents_order().into_iter().collect();
        assert_eq!(ids, HashSet::from(["id1".to_string(), "id2".to_string()]));
        assert_eq!(reopened.search(""), vec!["id2", "id1"]);
        assert_eq!(reopened.search("Y"), vec!["id2"]);
        reopened.close().unwrap();
    }
    remove_dir(&path);
}

#[test]
fn test_removal_survives_reopen() {
    let path = random_path();
    {
        let collection = open_fjall_collection(&path, SearchOptions::new()).unwrap();
        collection.set_document(Some("id1"), doc!{ title: "X" });
        collection.set_document(Some("id2"), doc!{ title: "Y" });
        assert!(collection.remove_document("id1"));
        collection.close().unwrap();
    }
    {
        let reopened = open_fjall_collection(&path, SearchOptions::new()).unwrap();
        assert_eq!(reopened.get_document("id1"), None);
        assert_eq!(reopened.get_all_documents(), vec!["id2"]);
        reopened.close().unwrap();
    }
    remove_dir(&path);
}

#[test]
fn test_closed_collection_answers_softly() {
    run_test(
        || create_context(Backend::Fjall, SearchOptions::new().order_by(["-date"])),
        |ctx| {
            let collection = ctx.collection();
            collection.set_document(Some("id1"), doc!{ title: "X" });
            collection.close()?;

            assert_eq!(collection.get_document("id1"), None);
            assert_eq!(collection.set_document(Some("id2"), doc!{ title: "Y" }), None);
            assert_eq!(collection.update_document("id1", doc!{ title: "Z" }), None);
            assert!(collection.get_all_documents().is_empty());
            assert!(collection.get_documents_order().is_empty());
            assert!(collection.search("X").is_empty());
            assert!(collection.search("").is_empty());
            assert!(!collection.remove_document("id1"));
            assert!(!collection.clear());
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_collections_in_one_database_are_isolated() {
    let path = random_path();
    {
        let module = FjallModule::with_config().db_path(&path).build();
        let notes = DocumentCollection::builder()
            .backend(
                PersistentMapConfig::new()
                    .collection_name("notes")
                    .store_module(module.clone()),
            )
            .open()
            .unwrap();
        let tasks = DocumentCollection::builder()
            .backend(
                PersistentMapConfig::new()
                    .collection_name("tasks")
                    .store_module(module),
            )
            .open()
            .unwrap();

        notes.set_document(Some("id1"), doc!{ title: "note" });
        tasks.set_document(Some("id1"), doc!{ title: "task" });

        assert_eq!(notes.get_document("id1").unwrap().get("title"), Some("note"));
        assert_eq!(tasks.get_document("id1").unwrap().get("title"), Some("task"));
        assert!(tasks.clear());
        assert_eq!(notes.get_all_documents(), vec!["id1"]);

        notes.close().unwrap();
        tasks.close().unwrap();
    }
    remove_dir(&path);
}

#[test]
fn test_invalid_collection_name_fails_at_open() {
    let path = random_path();
    let module = FjallModule::with_config().db_path(&path).build();
    let err = DocumentCollection::builder()
        .backend(
            PersistentMapConfig::new()
                .collection_name("my notes")
                .store_module(module),
        )
        .open()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidConfiguration);
    remove_dir(&path);
}

#[test]
fn test_store_version() {
    assert!(store_version().starts_with("Fjall/"));
}
