//! Tests for the build-index CLI command

use folio::cli::commands::build_index::{execute, BuildIndexArgs};
use folio::cli::OutputFormat;
use folio::core::config::Config;
use folio::core::services::Services;

use crate::common::{create_test_services, BlogRepo};

fn args() -> BuildIndexArgs {
    BuildIndexArgs {
        content_dir: None,
        output: None,
        recursive: false,
        quiet: true,
    }
}

/// Build the sample blog (human format)
#[test]
fn test_build_index_human() {
    let repo = BlogRepo::sample();
    let services = create_test_services(&repo);

    let result = execute(args(), &services, OutputFormat::Human);
    assert!(result.is_ok(), "Build should succeed: {:?}", result.err());

    assert!(repo.index_file().exists());
    assert_eq!(services.store.current().unwrap().len(), 5);
}

/// Build the sample blog (JSON format)
#[test]
fn test_build_index_json() {
    let repo = BlogRepo::sample();
    let services = create_test_services(&repo);

    let result = execute(args(), &services, OutputFormat::Json);
    assert!(result.is_ok(), "JSON build should succeed");
}

/// A missing posts directory still writes an (empty) index
#[test]
fn test_build_index_missing_directory() {
    let repo = BlogRepo::empty();
    let mut config = Config::default();
    config.content.posts_dir = repo.path().join("missing");
    config.storage.index_file = repo.index_file();
    let services = Services::new(config);

    let result = execute(args(), &services, OutputFormat::Human);
    assert!(result.is_ok());
    assert!(services.store.current().unwrap().is_empty());
}

/// Command-line flags override the loaded configuration
#[test]
fn test_build_index_overrides() {
    let repo = BlogRepo::empty();
    let mut config = Config::default();

    let args = BuildIndexArgs {
        content_dir: Some(repo.posts_dir()),
        output: Some(repo.index_file()),
        recursive: true,
        quiet: false,
    };
    args.apply(&mut config);

    assert_eq!(config.content.posts_dir, repo.posts_dir());
    assert_eq!(config.storage.index_file, repo.index_file());
    assert!(config.content.recursive);
}

/// Without flags the configuration is left alone
#[test]
fn test_build_index_no_overrides() {
    let mut config = Config::default();
    config.content.recursive = true;

    args().apply(&mut config);

    assert!(config.content.recursive);
    assert_eq!(
        config.content.posts_dir,
        Config::default().content.posts_dir
    );
}
