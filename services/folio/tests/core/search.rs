// Integration tests for search functionality

use folio::core::types::SearchParams;

use crate::common::{assert_ids, indexed_services, BlogRepo};

fn term(query: &str) -> SearchParams {
    SearchParams {
        query: Some(query.to_string()),
        ..Default::default()
    }
}

fn category(name: &str) -> SearchParams {
    SearchParams {
        category: Some(name.to_string()),
        ..Default::default()
    }
}

/// Twenty dated posts in one category, newest last on disk
fn notes_repo() -> BlogRepo {
    let mut repo = BlogRepo::empty();
    for day in 1..=20 {
        repo.add_post(
            &format!("note-{day:02}.md"),
            &format!("---\ntitle: Note {day}\ndate: 2024-01-{day:02}\ncategory: Notes\n---\nShort note.\n"),
        );
    }
    repo
}

#[test]
fn test_search_exact_title() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = services.search(term("kafka")).expect("Search failed");

    assert!(!result.items.is_empty(), "Expected at least one result");
    let top = &result.items[0];
    assert_eq!(top.document.id, "intro-to-kafka");
    assert_eq!(top.relevance_score, Some(1.0));
}

#[test]
fn test_search_tolerates_transposition() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = services.search(term("kafak")).expect("Search failed");

    let top = &result.items[0];
    assert_eq!(top.document.id, "intro-to-kafka");
    let score = top.relevance_score.expect("term searches carry a score");
    assert!((score - 0.8).abs() < 1e-9, "Expected 0.8, got {score}");
}

#[test]
fn test_search_tolerates_missing_letter() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = services.search(term("redx")).expect("Search failed");

    assert_ids(&result, &["redux-for-beginners"]);
}

#[test]
fn test_search_tolerates_substitution() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = services.search(term("rist")).expect("Search failed");

    assert_eq!(result.items[0].document.id, "rust-ownership");
}

#[test]
fn test_search_is_case_insensitive() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let lower = services.search(term("css grid")).unwrap();
    let upper = services.search(term("CSS GRID")).unwrap();

    assert_eq!(lower, upper);
    assert_eq!(lower.items[0].document.id, "css-grid");
}

#[test]
fn test_search_unrelated_term_has_no_results() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = services.search(term("zzzzqqqq")).unwrap();

    assert!(result.items.is_empty());
    assert_eq!(result.total_matches, 0);
    assert_eq!(result.page, 1);
    assert_eq!(result.total_pages, 0);
}

#[test]
fn test_search_too_short_term_has_no_results() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = services.search(term("a")).unwrap();

    assert!(result.items.is_empty());
}

#[test]
fn test_blank_query_returns_nothing() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = services.search(SearchParams::default()).unwrap();
    assert!(result.items.is_empty());
    assert_eq!(result.total_matches, 0);

    let result = services.search(term("   \t ")).unwrap();
    assert!(result.items.is_empty());
}

#[test]
fn test_category_filter_orders_by_date() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = services.search(category("Backend")).unwrap();

    assert_ids(&result, &["intro-to-kafka", "rust-ownership"]);
    assert!(result.items.iter().all(|hit| hit.relevance_score.is_none()));
}

#[test]
fn test_category_filter_is_case_insensitive_and_exact() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = services.search(category("frontend")).unwrap();
    assert_ids(&result, &["redux-for-beginners", "css-grid"]);

    let result = services.search(category("Front")).unwrap();
    assert!(result.items.is_empty());
}

#[test]
fn test_tag_filter() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = services
        .search(SearchParams {
            tag: Some("BACKEND".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_ids(&result, &["intro-to-kafka", "rust-ownership"]);
}

#[test]
fn test_filters_apply_before_term() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = services
        .search(SearchParams {
            query: Some("kafka".to_string()),
            category: Some("Frontend".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(result.items.is_empty());

    let result = services
        .search(SearchParams {
            query: Some("redux".to_string()),
            tag: Some("frontend".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_ids(&result, &["redux-for-beginners"]);
}

#[test]
fn test_equal_scores_keep_corpus_order() {
    let repo = BlogRepo::with_posts(&[
        ("b-kafka.md", "---\ntitle: Kafka Advanced\n---\n"),
        ("a-kafka.md", "---\ntitle: Kafka Basics\n---\n"),
    ]);
    let services = indexed_services(&repo);

    let result = services.search(term("kafka")).unwrap();

    assert_ids(&result, &["a-kafka", "b-kafka"]);
    assert_eq!(result.items[0].relevance_score, result.items[1].relevance_score);
}

#[test]
fn test_title_outranks_body() {
    let repo = BlogRepo::with_posts(&[
        ("body.md", "---\ntitle: Streams\n---\nAll about kafka.\n"),
        ("title.md", "---\ntitle: Kafka\n---\nNothing else.\n"),
    ]);
    let services = indexed_services(&repo);

    let result = services.search(term("kafka")).unwrap();

    assert_ids(&result, &["title", "body"]);
    assert!(result.items[0].relevance_score > result.items[1].relevance_score);
}

#[test]
fn test_pagination_first_page() {
    let repo = notes_repo();
    let services = indexed_services(&repo);

    let result = services.search(category("Notes")).unwrap();

    assert_eq!(result.total_matches, 20);
    assert_eq!(result.total_pages, 3);
    assert_eq!(result.page, 1);
    assert_eq!(result.items.len(), 9);
    assert_eq!(result.items[0].document.id, "note-20");
}

#[test]
fn test_pagination_clamps_to_last_page() {
    let repo = notes_repo();
    let services = indexed_services(&repo);

    let result = services
        .search(SearchParams {
            category: Some("Notes".to_string()),
            page: Some("5".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(result.page, 3);
    assert_ids(&result, &["note-02", "note-01"]);
}

#[test]
fn test_pagination_coerces_bad_numbers() {
    let repo = notes_repo();
    let services = indexed_services(&repo);

    let result = services
        .search(SearchParams {
            category: Some("Notes".to_string()),
            page: Some("abc".to_string()),
            limit: Some("-4".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(result.page, 1);
    assert_eq!(result.items.len(), 9);

    let result = services
        .search(SearchParams {
            category: Some("Notes".to_string()),
            limit: Some("5000".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(result.total_pages, 1);
    assert_eq!(result.items.len(), 20);
}

#[test]
fn test_unicode_term() {
    let repo = BlogRepo::with_posts(&[(
        "surprises.md",
        "---\ntitle: \"Rust 🦀 und Überraschungen\"\n---\n",
    )]);
    let services = indexed_services(&repo);

    let result = services.search(term("ÜBERRASCHUNGEN")).unwrap();
    assert_ids(&result, &["surprises"]);

    let result = services.search(term("uberraschungen")).unwrap();
    assert_ids(&result, &["surprises"]);
}

#[test]
fn test_same_query_is_deterministic() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let first = services.search(term("backend")).unwrap();
    let second = services.search(term("backend")).unwrap();

    assert!(!first.items.is_empty());
    assert_eq!(first, second);
}
