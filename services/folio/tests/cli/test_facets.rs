//! Tests for the list-facets CLI command

use folio::cli::commands::facets::{execute, FacetsArgs};
use folio::cli::OutputFormat;
use folio::core::config::Config;

use crate::common::{create_test_services, indexed_services, BlogRepo};

#[test]
fn test_facets_human() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = execute(FacetsArgs { index: None }, &services, OutputFormat::Human);
    assert!(result.is_ok(), "Facets should succeed: {:?}", result.err());
}

#[test]
fn test_facets_json() {
    let repo = BlogRepo::sample();
    let services = indexed_services(&repo);

    let result = execute(FacetsArgs { index: None }, &services, OutputFormat::Json);
    assert!(result.is_ok());

    let facets = services.facets().unwrap();
    let categories: Vec<(&str, usize)> = facets
        .categories
        .iter()
        .map(|f| (f.name.as_str(), f.count))
        .collect();
    assert_eq!(categories, vec![("Backend", 2), ("Frontend", 2)]);
    assert_eq!(facets.tags[0].name, "backend");
    assert_eq!(facets.tags[1].name, "frontend");
}

#[test]
fn test_facets_without_index() {
    let repo = BlogRepo::sample();
    let services = create_test_services(&repo);

    let result = execute(FacetsArgs { index: None }, &services, OutputFormat::Human);
    assert!(result.is_err());
}

#[test]
fn test_facets_index_override() {
    let repo = BlogRepo::empty();
    let mut config = Config::default();

    FacetsArgs {
        index: Some(repo.index_file()),
    }
    .apply(&mut config);

    assert_eq!(config.storage.index_file, repo.index_file());
}
