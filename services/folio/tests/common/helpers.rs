// Test helper functions

use folio::core::config::Config;
use folio::core::indexer::MemorySource;
use folio::core::services::Services;
use folio::core::types::SearchResult;

use super::fixtures::{BlogRepo, SAMPLE_POSTS};

/// Create services reading from and writing into the repo's temp dir
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services(repo: &BlogRepo) -> Services {
    let mut config = Config::default();
    config.content.posts_dir = repo.posts_dir();
    config.storage.index_file = repo.index_file();
    Services::new(config)
}

/// Services with the repo already indexed and loaded
#[allow(dead_code)] // Used in integration tests
pub fn indexed_services(repo: &BlogRepo) -> Services {
    let services = create_test_services(repo);
    services.rebuild().expect("Failed to build index");
    services
}

/// In-memory source holding [`SAMPLE_POSTS`]
#[allow(dead_code)] // Used in integration tests
pub fn memory_source() -> MemorySource {
    SAMPLE_POSTS.iter().copied().collect()
}

/// Assert the ids of a result page, in order
#[allow(dead_code)] // Used in integration tests
pub fn assert_ids(result: &SearchResult, expected: &[&str]) {
    let ids: Vec<&str> = result
        .items
        .iter()
        .map(|hit| hit.document.id.as_str())
        .collect();
    assert_eq!(ids, expected, "Unexpected result ids");
}
