use doc_collection::doc;
use doc_collection::search::SearchOptions;
use doc_collection_int_test::test_util::run_on_all_backends;
use std::collections::HashSet;

#[test]
fn test_set_then_get_returns_document_with_id() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        let stored = collection.set_document(Some("id1"), doc!{ title: "X", date: "2020" });
        assert_eq!(stored, Some(doc!{ title: "X", date: "2020", "_id": "id1" }));
        assert_eq!(collection.get_document("id1"), stored);
        assert_eq!(collection.backend_type(), ctx.backend().backend_type());
        Ok(())
    });
}

#[test]
fn test_set_overwrites_existing_document() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("id1"), doc!{ title: "X", date: "2020" });
        collection.set_document(Some("id1"), doc!{ title: "Y" });

        let document = collection.get_document("id1").unwrap();
        assert_eq!(document.get("title"), Some("Y"));
        assert!(!document.contains_key("date"));
        assert_eq!(collection.get_all_documents(), vec!["id1"]);
        Ok(())
    });
}

#[test]
fn test_set_with_empty_id_or_absent_document_is_noop() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        let inner = collection.collection();
        assert_eq!(inner.set("", Some(doc!{ title: "X" })), None);
        assert_eq!(inner.set("id1", None), None);
        assert!(inner.keys().is_empty());
        assert!(inner.order().is_empty());
        Ok(())
    });
}

#[test]
fn test_set_document_without_id_generates_one() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        let first = collection.set_document(None, doc!{ title: "X" }).unwrap();
        let second = collection.set_document(Some(""), doc!{ title: "Y" }).unwrap();

        let first_id = first.id().unwrap();
        let second_id = second.id().unwrap();
        assert_eq!(first_id.len(), 22);
        assert_ne!(first_id, second_id);
        assert_eq!(collection.get_document(first_id), Some(first.clone()));
        Ok(())
    });
}

#[test]
fn test_set_document_from_json() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        let stored = collection
            .set_document(Some("id1"), r#"{"title": "X", "count": 3, "tags": ["a"], "gone": null}"#)
            .unwrap();
        assert_eq!(stored.get("title"), Some("X"));
        assert_eq!(stored.get("count"), Some("3"));
        assert_eq!(stored.get("tags"), Some(r#"["a"]"#));
        assert!(!stored.contains_key("gone"));
        Ok(())
    });
}

#[test]
fn test_set_document_with_malformed_json_stores_nothing() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        assert_eq!(collection.set_document(Some("id1"), "{\"title\": "), None);
        assert_eq!(collection.set_document(Some("id2"), "[1, 2, 3]"), None);
        assert!(collection.get_all_documents().is_empty());
        Ok(())
    });
}

#[test]
fn test_get_unknown_or_empty_id() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("id1"), doc!{ title: "X" });
        assert_eq!(collection.get_document("missing"), None);
        assert_eq!(collection.get_document(""), None);
        Ok(())
    });
}

#[test]
fn test_remove_document() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("id1"), doc!{ title: "X" });
        collection.set_document(Some("id2"), doc!{ title: "Y" });

        assert!(collection.remove_document("id1"));
        assert!(!collection.remove_document("id1"));
        assert!(!collection.remove_document(""));
        assert_eq!(collection.get_document("id1"), None);
        assert_eq!(collection.get_documents_order(), vec!["id2"]);
        assert_eq!(collection.search(""), vec!["id2"]);
        assert!(collection.search("X").is_empty());
        Ok(())
    });
}

#[test]
fn test_clear_empties_everything() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        for i in 0..10 {
            collection.set_document(Some(&format!("id{}", i)), doc!{ title: "X", n: i });
        }

        assert!(collection.clear());
        assert!(collection.get_all_documents().is_empty());
        assert!(collection.get_documents_order().is_empty());
        assert!(collection.search("").is_empty());
        assert!(collection.search("X").is_empty());

        // the collection stays usable
        collection.set_document(Some("id1"), doc!{ title: "X" });
        assert_eq!(collection.get_documents_order(), vec!["id1"]);
        Ok(())
    });
}

#[test]
fn test_get_all_documents_lists_every_id() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        for id in ["c", "a", "b"] {
            collection.set_document(Some(id), doc!{ title: id });
        }
        let ids: HashSet<String> = collection.get_all_documents().into_iter().collect();
        assert_eq!(ids, HashSet::from(["a".to_string(), "b".to_string(), "c".to_string()]));
        Ok(())
    });
}

#[test]
fn test_order_keeps_last_position_of_each_id() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("id1"), doc!{ title: "X" });
        collection.set_document(Some("id2"), doc!{ title: "Y" });
        collection.set_document(Some("id3"), doc!{ title: "Z" });
        collection.set_document(Some("id1"), doc!{ title: "X2" });

        assert_eq!(collection.get_documents_order(), vec!["id2", "id3", "id1"]);
        // no order_by: sort is the order index itself
        assert_eq!(collection.search(""), vec!["id2", "id3", "id1"]);
        Ok(())
    });
}

#[test]
fn test_new_id() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        let id = collection.new_id();
        assert_eq!(id.len(), 22);
        assert_ne!(id, collection.new_id());
        assert_eq!(collection.get_document(&id), None);
        Ok(())
    });
}
