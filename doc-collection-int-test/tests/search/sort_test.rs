use doc_collection::doc;
use doc_collection::search::SearchOptions;
use doc_collection_int_test::test_util::run_on_all_backends;

#[test]
fn test_sort_ascending() {
    run_on_all_backends(SearchOptions::new().order_by(["title"]), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("a"), doc!{ title: "B" });
        collection.set_document(Some("b"), doc!{ title: "A" });
        assert_eq!(collection.search(""), vec!["b", "a"]);
        Ok(())
    });
}

#[test]
fn test_sort_descending() {
    run_on_all_backends(SearchOptions::new().order_by(["-title"]), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("a"), doc!{ title: "B" });
        collection.set_document(Some("b"), doc!{ title: "A" });
        assert_eq!(collection.search(""), vec!["a", "b"]);
        Ok(())
    });
}

#[test]
fn test_sort_by_several_fields() {
    let options = SearchOptions::new().order_by(["-date", "title"]);
    run_on_all_backends(options, |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("a"), doc!{ title: "C", date: "2020" });
        collection.set_document(Some("b"), doc!{ title: "B", date: "2021" });
        collection.set_document(Some("c"), doc!{ title: "A", date: "2020" });
        collection.set_document(Some("d"), doc!{ title: "A", date: "2021" });

        assert_eq!(collection.search(""), vec!["d", "b", "c", "a"]);
        Ok(())
    });
}

#[test]
fn test_sort_keeps_insertion_order_on_ties() {
    run_on_all_backends(SearchOptions::new().order_by(["group"]), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("z"), doc!{ group: "1" });
        collection.set_document(Some("y"), doc!{ group: "2" });
        collection.set_document(Some("x"), doc!{ group: "1" });
        collection.set_document(Some("w"), doc!{ group: "2" });

        assert_eq!(collection.search(""), vec!["z", "x", "y", "w"]);
        Ok(())
    });
}

#[test]
fn test_sort_with_missing_field_does_not_fail() {
    run_on_all_backends(SearchOptions::new().order_by(["-date"]), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("a"), doc!{ date: "2020" });
        collection.set_document(Some("b"), doc!{ title: "no date" });
        collection.set_document(Some("c"), doc!{ date: "2021" });

        // b ties with both neighbours, so a and c are never compared
        let mut sorted = collection.search("");
        sorted.sort();
        assert_eq!(sorted, vec!["a", "b", "c"]);
        Ok(())
    });
}

#[test]
fn test_sort_orders_adjacent_comparable_documents() {
    run_on_all_backends(SearchOptions::new().order_by(["-date"]), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("a"), doc!{ date: "2020" });
        collection.set_document(Some("c"), doc!{ date: "2021" });
        collection.set_document(Some("b"), doc!{ title: "no date" });

        assert_eq!(collection.search(""), vec!["c", "a", "b"]);
        Ok(())
    });
}

#[test]
fn test_sort_reorders_documents_order() {
    run_on_all_backends(SearchOptions::new().order_by(["title"]), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("a"), doc!{ title: "B" });
        collection.set_document(Some("b"), doc!{ title: "A" });
        assert_eq!(collection.get_documents_order(), vec!["a", "b"]);

        assert_eq!(collection.search(""), vec!["b", "a"]);
        assert_eq!(collection.get_documents_order(), vec!["b", "a"]);
        Ok(())
    });
}

#[test]
fn test_sort_truncates_to_limit() {
    let options = SearchOptions::new().order_by(["-n"]).limit(2);
    run_on_all_backends(options, |ctx| {
        let collection = ctx.collection();
        for i in 1..=5 {
            collection.set_document(Some(&format!("id{}", i)), doc!{ n: i });
        }
        assert_eq!(collection.search(""), vec!["id5", "id4"]);
        Ok(())
    });
}

#[test]
fn test_sort_compares_text_not_numbers() {
    run_on_all_backends(SearchOptions::new().order_by(["n"]), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("ten"), doc!{ n: 10 });
        collection.set_document(Some("nine"), doc!{ n: 9 });
        assert_eq!(collection.search(""), vec!["ten", "nine"]);
        Ok(())
    });
}

#[test]
fn test_options_from_json() {
    let options = SearchOptions::from_json(r#"{"orderBy": ["title"], "limit": 1}"#).unwrap();
    run_on_all_backends(options, |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("a"), doc!{ title: "B" });
        collection.set_document(Some("b"), doc!{ title: "A" });
        assert_eq!(collection.search(""), vec!["b"]);
        Ok(())
    });
}
