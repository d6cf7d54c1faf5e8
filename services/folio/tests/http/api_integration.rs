//! Integration tests for the Folio REST API
//!
//! Tests the complete workflow: missing index, rebuild, search,
//! facets and health.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use folio::core::services::Services;
use folio::core::types::*;
use folio::http;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt as TowerServiceExt;

use crate::common::{create_test_services, indexed_services, BlogRepo};

fn app(services: Services) -> Router {
    http::router(Arc::new(services))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn ids(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|hit| hit["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_endpoint() {
    let repo = BlogRepo::sample();
    let app = app(indexed_services(&repo));

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(body).unwrap();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
    assert_eq!(health.documents, Some(5));
}

#[tokio::test]
async fn test_health_without_index() {
    let repo = BlogRepo::sample();
    let app = app(create_test_services(&repo));

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("documents").is_none());
}

#[tokio::test]
async fn test_search_without_index_is_404() {
    let repo = BlogRepo::sample();
    let app = app(create_test_services(&repo));

    let (status, body) = get(&app, "/api/search?query=kafka").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "search index not found");
    assert_eq!(body["results"], serde_json::json!([]));
    assert_eq!(body["totalResults"], 0);
}

#[tokio::test]
async fn test_search_zero_matches_is_200() {
    let repo = BlogRepo::sample();
    let app = app(indexed_services(&repo));

    let (status, body) = get(&app, "/api/search?query=zzzzqqqq").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalResults"], 0);
    assert_eq!(body["totalPages"], 0);
    assert_eq!(body["page"], 1);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_search_typo_returns_scored_hits() {
    let repo = BlogRepo::sample();
    let app = app(indexed_services(&repo));

    let (status, body) = get(&app, "/api/search?term=kafak").await;

    assert_eq!(status, StatusCode::OK);
    let response: SearchResponse = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(response.results[0].document.id, "intro-to-kafka");
    assert!(response.results[0].relevance_score.is_some());

    let hit = &body["results"][0];
    assert_eq!(hit["title"], "Intro to Kafka");
    assert_eq!(hit["category"], "Backend");
    assert!(hit["publishedAt"].is_string());
    assert!(hit["readingTimeMinutes"].is_u64());
    assert!(hit["readingTime"].as_str().unwrap().ends_with(" min read"));
}

#[tokio::test]
async fn test_search_filters_and_encoding() {
    let repo = BlogRepo::sample();
    let app = app(indexed_services(&repo));

    let (status, body) = get(&app, "/api/search?category=frontend").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["redux-for-beginners", "css-grid"]);
    assert!(body["results"][0].get("relevanceScore").is_none());

    let (_, body) = get(&app, "/api/search?query=css%20grid&tag=frontend").await;
    assert_eq!(ids(&body)[0], "css-grid");
}

#[tokio::test]
async fn test_search_bad_numbers_are_coerced() {
    let repo = BlogRepo::sample();
    let app = app(indexed_services(&repo));

    let (status, body) = get(
        &app,
        "/api/search?category=Backend&page=-2&limit=abc&pageSize=7",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["totalResults"], 2);
}

#[tokio::test]
async fn test_search_page_clamped() {
    let repo = BlogRepo::sample();
    let app = app(indexed_services(&repo));

    let (status, body) = get(&app, "/api/search?tag=backend&limit=1&page=40").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(ids(&body), vec!["rust-ownership"]);
}

#[tokio::test]
async fn test_blank_search_is_empty() {
    let repo = BlogRepo::sample();
    let app = app(indexed_services(&repo));

    let (status, body) = get(&app, "/api/search?query=%20%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalResults"], 0);
}

#[tokio::test]
async fn test_facets_endpoint() {
    let repo = BlogRepo::sample();
    let app = app(indexed_services(&repo));

    let (status, body) = get(&app, "/api/facets").await;

    assert_eq!(status, StatusCode::OK);
    let facets: Facets = serde_json::from_value(body).unwrap();
    assert_eq!(facets.categories.len(), 2);
    assert_eq!(facets.tags[0].name, "backend");
    assert_eq!(facets.tags[0].count, 2);
}

#[tokio::test]
async fn test_facets_without_index_is_404() {
    let repo = BlogRepo::sample();
    let app = app(create_test_services(&repo));

    let (status, body) = get(&app, "/api/facets").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_end_to_end_rebuild() {
    let mut repo = BlogRepo::sample();
    let app = app(create_test_services(&repo));

    // Step 1: nothing indexed yet
    let (status, _) = get(&app, "/api/search?query=kafka").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Step 2: rebuild through the API
    let request = Request::builder()
        .method("POST")
        .uri("/api/index")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let stats: BuildStats = serde_json::from_value(body).unwrap();
    assert_eq!(stats.documents_indexed, 5);

    // Step 3: search works
    let (status, body) = get(&app, "/api/search?query=kafka").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body)[0], "intro-to-kafka");

    // Step 4: a new post shows up after the next rebuild
    repo.add_post(
        "graphql-intro.md",
        "---\ntitle: GraphQL Intro\n---\nSchemas.\n",
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/index")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/search?query=graphql").await;
    assert_eq!(ids(&body), vec!["graphql-intro"]);
}

#[tokio::test]
async fn test_cors_headers_present() {
    let repo = BlogRepo::sample();
    let app = app(indexed_services(&repo));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "https://blog.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let repo = BlogRepo::sample();
    let app = app(indexed_services(&repo));

    let (status, _) = get(&app, "/api/v1/search").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
