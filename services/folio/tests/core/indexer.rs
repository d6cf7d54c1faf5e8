// Integration tests for the index build

use chrono::{TimeZone, Utc};
use folio::core::config::ContentConfig;
use folio::core::indexer::{DirectorySource, IndexBuilder, MemorySource};

use crate::common::{memory_source, BlogRepo};

fn builder() -> IndexBuilder {
    IndexBuilder::new(&ContentConfig::default())
}

#[test]
fn test_build_sample_posts() {
    let (corpus, stats) = builder().build(&memory_source());

    assert_eq!(stats.items_seen, 5);
    assert_eq!(stats.documents_indexed, 5);
    assert_eq!(stats.items_failed, 0);
    assert_eq!(corpus.len(), 5);

    let kafka = corpus.get("intro-to-kafka").expect("kafka post indexed");
    assert_eq!(kafka.title, "Intro to Kafka");
    assert_eq!(kafka.description, "Event streaming for backend services");
    assert_eq!(kafka.category.as_deref(), Some("Backend"));
    assert_eq!(kafka.tags, vec!["kafka", "backend"]);
    assert_eq!(
        kafka.published_at,
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    );
    assert!(kafka.reading_time_minutes >= 1);
}

#[test]
fn test_body_is_plain_text_excerpt() {
    let (corpus, _) = builder().build(&memory_source());

    let kafka = corpus.get("intro-to-kafka").unwrap();
    assert!(!kafka.body.contains('#'), "Heading markers stripped");
    assert!(kafka.body.contains("Kafka is a distributed log"));

    let redux = corpus.get("redux-for-beginners").unwrap();
    assert!(redux.body.contains("application state"));
    assert!(!redux.body.contains('\n'), "Line breaks folded");
}

#[test]
fn test_thumbnail_defaults() {
    let (corpus, _) = builder().build(&memory_source());

    assert_eq!(
        corpus.get("rust-ownership").unwrap().thumbnail,
        "/images/rust.png"
    );
    assert_eq!(
        corpus.get("css-grid").unwrap().thumbnail,
        ContentConfig::default().default_thumbnail
    );
}

#[test]
fn test_malformed_posts_do_not_abort_build() {
    let source = memory_source()
        .with_item("broken.md", "---\ntitle: [unclosed\n---\nBody")
        .with_item("unterminated.md", "---\ntitle: Never closed\nBody")
        .with_item("bad-date.md", "---\ntitle: Bad date\ndate: not a date\n---\n");

    let (corpus, stats) = builder().build(&source);

    assert_eq!(stats.items_failed, 3);
    assert_eq!(stats.documents_indexed, 5);
    assert_eq!(corpus.len(), 5);
    assert!(corpus.get("broken").is_none());
}

#[test]
fn test_untitled_and_duplicate_posts_dropped() {
    let source = MemorySource::new()
        .with_item("first.md", "---\ntitle: First\n---\n")
        .with_item("untitled.md", "---\ndescription: No title here\n---\nBody")
        .with_item("blank.md", "---\ntitle: \"   \"\n---\nBody")
        .with_item("first.MD", "---\ntitle: Shadowed\n---\n");

    let (corpus, stats) = builder().build(&source);

    assert_eq!(stats.items_untitled, 2);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.get("first").unwrap().title, "First");
}

#[test]
fn test_undated_post_uses_build_time() {
    let built_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let source = MemorySource::new().with_item("undated.md", "---\ntitle: Undated\n---\n");

    let (corpus, stats) = builder().with_build_time(built_at).build(&source);

    assert_eq!(stats.built_at, built_at);
    assert_eq!(corpus.get("undated").unwrap().published_at, built_at);
}

#[test]
fn test_non_content_files_skipped() {
    let repo = BlogRepo::with_posts(&[
        ("hello.md", "---\ntitle: Hello\n---\nHi"),
        ("notes.txt", "not a post"),
        ("image.png", "binary"),
    ]);
    let source = DirectorySource::new(repo.posts_dir(), false, &[], 1024).unwrap();

    let (corpus, stats) = builder().build(&source);

    assert_eq!(stats.items_seen, 3);
    assert_eq!(stats.items_skipped, 2);
    assert_eq!(corpus.len(), 1);
}

#[test]
fn test_directory_build_is_deterministic() {
    let repo = BlogRepo::sample();
    let source = DirectorySource::new(repo.posts_dir(), false, &[], 1024).unwrap();
    let built_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let builder = builder().with_build_time(built_at);

    let (first, _) = builder.build(&source);
    let (second, _) = builder.build(&source);

    assert_eq!(first, second);
    let ids: Vec<&str> = first.documents().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "css-grid",
            "intro-to-kafka",
            "redux-for-beginners",
            "rust-ownership",
            "year-in-review"
        ]
    );
}

#[test]
fn test_recursive_ids_keep_relative_path() {
    let repo = BlogRepo::with_posts(&[
        ("top.md", "---\ntitle: Top\n---\n"),
        ("2024/nested.md", "---\ntitle: Nested\n---\n"),
    ]);

    let flat = DirectorySource::new(repo.posts_dir(), false, &[], 1024).unwrap();
    let (corpus, _) = builder().build(&flat);
    assert_eq!(corpus.len(), 1);

    let recursive = DirectorySource::new(repo.posts_dir(), true, &[], 1024).unwrap();
    let (corpus, _) = builder().build(&recursive);
    assert_eq!(corpus.len(), 2);
    assert!(corpus.get("2024/nested").is_some());
}

#[test]
fn test_exclude_patterns() {
    let repo = BlogRepo::with_posts(&[
        ("keep.md", "---\ntitle: Keep\n---\n"),
        ("draft-idea.md", "---\ntitle: Draft\n---\n"),
    ]);
    let excludes = vec!["draft-*".to_string()];
    let source = DirectorySource::new(repo.posts_dir(), false, &excludes, 1024).unwrap();

    let (corpus, _) = builder().build(&source);

    assert_eq!(corpus.len(), 1);
    assert!(corpus.get("keep").is_some());
}

#[test]
fn test_missing_directory_yields_empty_corpus() {
    let repo = BlogRepo::empty();
    let source = DirectorySource::new(repo.path().join("nope"), false, &[], 1024).unwrap();

    let (corpus, stats) = builder().build(&source);

    assert!(corpus.is_empty());
    assert!(stats.source_unavailable);
}

#[test]
fn test_unicode_posts() {
    let source = MemorySource::new().with_item(
        "unicode.md",
        "---\ntitle: \"Rust 🦀 und Überraschungen\"\ntags: [日本語]\n---\nПривет мир 👋",
    );

    let (corpus, _) = builder().build(&source);

    let doc = corpus.get("unicode").unwrap();
    assert_eq!(doc.title, "Rust 🦀 und Überraschungen");
    assert_eq!(doc.tags, vec!["日本語"]);
    assert!(doc.body.starts_with("Привет мир"));
}
