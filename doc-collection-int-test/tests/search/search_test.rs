use doc_collection::doc;
use doc_collection::search::SearchOptions;
use doc_collection_int_test::test_util::run_on_all_backends;

#[test]
fn test_literal_search_is_case_sensitive_substring() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("id1"), doc!{ title: "abc" });

        assert_eq!(collection.search("bc"), vec!["id1"]);
        assert!(collection.search("bC").is_empty());
        assert!(collection.search("ac").is_empty());
        Ok(())
    });
}

#[test]
fn test_fuzzy_search_matches_subsequence() {
    run_on_all_backends(SearchOptions::new().fuzzy(true), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("id1"), doc!{ title: "abc" });

        assert_eq!(collection.search("ac"), vec!["id1"]);
        assert_eq!(collection.search("AC"), vec!["id1"]);
        assert!(collection.search("ca").is_empty());
        Ok(())
    });
}

#[test]
fn test_search_matches_any_field_once() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("a"), doc!{ title: "rust", body: "rust book" });
        collection.set_document(Some("b"), doc!{ title: "go", body: "no rust here" });
        collection.set_document(Some("c"), doc!{ title: "zig" });

        assert_eq!(collection.search("rust"), vec!["a", "b"]);
        Ok(())
    });
}

#[test]
fn test_search_skips_reserved_fields() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("needle"), doc!{ title: "hay", _meta: "needle" });
        assert!(collection.search("needle").is_empty());
        assert_eq!(collection.search("hay"), vec!["needle"]);
        Ok(())
    });
}

#[test]
fn test_excluded_values_do_not_match() {
    let options = SearchOptions::new().exclude(["^secret"]);
    run_on_all_backends(options, |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("a"), doc!{ note: "secret plan" });
        collection.set_document(Some("b"), doc!{ note: "plan secret" });

        assert_eq!(collection.search("plan"), vec!["b"]);
        // exclusion only affects matching; sort still lists both
        assert_eq!(collection.search("").len(), 2);
        Ok(())
    });
}

#[test]
fn test_exclusion_is_per_field() {
    let options = SearchOptions::new().exclude(["^secret"]);
    run_on_all_backends(options, |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("a"), doc!{ note: "secret plan", title: "plan" });
        assert_eq!(collection.search("plan"), vec!["a"]);
        Ok(())
    });
}

#[test]
fn test_search_respects_limit() {
    run_on_all_backends(SearchOptions::new().limit(3), |ctx| {
        let collection = ctx.collection();
        for i in 0..5 {
            collection.set_document(Some(&format!("id{}", i)), doc!{ title: "match" });
        }

        assert_eq!(collection.search("match"), vec!["id0", "id1", "id2"]);
        assert_eq!(collection.search("").len(), 3);
        Ok(())
    });
}

#[test]
fn test_search_without_matches() {
    run_on_all_backends(SearchOptions::new(), |ctx| {
        let collection = ctx.collection();
        assert!(collection.search("anything").is_empty());
        collection.set_document(Some("id1"), doc!{ title: "X" });
        assert!(collection.search("Y").is_empty());
        Ok(())
    });
}

#[test]
fn test_round_trip_example() {
    let options = SearchOptions::new().order_by(["-date"]);
    run_on_all_backends(options, |ctx| {
        let collection = ctx.collection();
        collection.set_document(Some("id1"), doc!{ title: "X", date: "2020" });
        collection.set_document(Some("id2"), doc!{ title: "Y", date: "2021" });

        assert_eq!(collection.search(""), vec!["id2", "id1"]);
        assert_eq!(collection.search("X"), vec!["id1"]);
        Ok(())
    });
}
