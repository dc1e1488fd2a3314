use doc_collection::doc;
use doc_collection::search::SearchOptions;
use doc_collection_int_test::test_util::run_on_all_backends;

#[test]
fn test_update_unknown_id_behaves_as_set() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        let stored = collection.update_document("id1", doc!{ title: "X" });
        assert_eq!(stored, Some(doc!{ title: "X", "_id": "id1" }));
        assert_eq!(collection.get_document("id1"), stored);
        assert_eq!(collection.get_documents_order(), vec!["id1"]);
        Ok(())
    });
}

#[test]
fn test_update_merges_patch_over_existing() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("id1"), doc!{ title: "X", date: "2020" });

        let updated = collection
            .update_document("id1", doc!{ date: "2021", tag: "new" })
            .unwrap();
        assert_eq!(updated.get("title"), Some("X"));
        assert_eq!(updated.get("date"), Some("2021"));
        assert_eq!(updated.get("tag"), Some("new"));
        assert_eq!(collection.get_document("id1"), Some(updated));
        Ok(())
    });
}

#[test]
fn test_update_cannot_change_id() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("id1"), doc!{ title: "X" });

        let updated = collection.update_document("id1", doc!{ "_id": "other" }).unwrap();
        assert_eq!(updated.id(), Some("id1"));
        assert_eq!(collection.get_document("other"), None);
        Ok(())
    });
}

#[test]
fn test_update_from_json_text() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("id1"), doc!{ title: "X", done: "false" });

        let updated = collection.update_document("id1", r#"{"done": true}"#).unwrap();
        assert_eq!(updated.get("done"), Some("true"));
        assert_eq!(updated.get("title"), Some("X"));

        assert_eq!(collection.update_document("id1", "not json"), None);
        assert_eq!(collection.get_document("id1"), Some(updated));
        Ok(())
    });
}

#[test]
fn test_update_moves_id_to_end_of_order() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("id1"), doc!{ title: "X" });
        collection.set_document(Some("id2"), doc!{ title: "Y" });
        collection.update_document("id1", doc!{ title: "X2" });
        assert_eq!(collection.get_documents_order(), vec!["id2", "id1"]);
        Ok(())
    });
}

#[test]
fn test_update_with_empty_id_is_noop() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        assert_eq!(collection.update_document("", doc!{ title: "X" }), None);
        assert!(collection.get_all_documents().is_empty());
        Ok(())
    });
}
