use tempfile::tempdir;
use vicinity_core::persist::{load_index, save_index, IndexPaths};
use vicinity_core::{IndexBuilder, Normalizer};
use vicinity_searcher::search;

fn build_tiny_index(dir: &std::path::Path) {
    let normalizer = Normalizer::new();
    let mut builder = IndexBuilder::new();
    builder.add_document("doc1.txt", normalizer.normalize("the cat sat"));
    builder.add_document("doc2.txt", normalizer.normalize("the dog sat on the cat"));
    let (index, stats) = builder.finish();
    assert_eq!(stats.document_count, 2);
    save_index(&IndexPaths::new(dir), &index).unwrap();
}

#[test]
fn search_returns_ranked_results_from_a_saved_index() {
    let dir = tempdir().unwrap();
    build_tiny_index(dir.path());

    let index = load_index(&IndexPaths::new(dir.path())).unwrap();
    let normalizer = Normalizer::new();

    let results = search(&index, &normalizer, "cat sat");
    assert_eq!(results, vec!["doc1.txt".to_string(), "doc2.txt".to_string()]);
}

#[test]
fn query_terms_normalize_like_indexed_documents() {
    let dir = tempdir().unwrap();
    build_tiny_index(dir.path());

    let index = load_index(&IndexPaths::new(dir.path())).unwrap();
    let normalizer = Normalizer::new();

    // Inflection and case fold to the indexed form.
    let results = search(&index, &normalizer, "CATS sat!");
    assert_eq!(results[0], "doc1.txt");
}

#[test]
fn missing_terms_report_not_found() {
    let dir = tempdir().unwrap();
    build_tiny_index(dir.path());

    let index = load_index(&IndexPaths::new(dir.path())).unwrap();
    let normalizer = Normalizer::new();

    assert!(search(&index, &normalizer, "zebra").is_empty());
}

#[test]
fn loading_a_malformed_index_fails_without_partial_data() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("index.txt"), "ok,n d1:0\nbadkey d1:0\n").unwrap();

    let err = load_index(&IndexPaths::new(dir.path())).unwrap_err();
    assert!(matches!(err, vicinity_core::Error::Parse { line: 2, .. }), "{err}");
}
