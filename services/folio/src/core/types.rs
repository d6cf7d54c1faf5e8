//! Core data types for the Folio search service.
//!
//! This module defines the data structures shared by the index
//! builder, the query engine and the adapters: documents, the corpus,
//! queries, results and their wire forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One indexed blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    /// Relative path of the source item without its extension
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Search excerpt: markup stripped and truncated, not the full post
    #[serde(default)]
    pub body: String,

    pub published_at: DateTime<Utc>,

    /// Authored order and case
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub category: Option<String>,

    pub thumbnail: String,

    /// Display-only estimate, never searched
    #[serde(default)]
    pub reading_time_minutes: u32,

    /// `reading_time_minutes` as display text, e.g. "4 min read"
    #[serde(default)]
    pub reading_time: String,
}

/// "N min read"
pub fn reading_time_label(minutes: u32) -> String {
    format!("{minutes} min read")
}

impl ContentDocument {
    /// Human-readable reading time, e.g. "4 min read"
    pub fn reading_time_label(&self) -> String {
        reading_time_label(self.reading_time_minutes)
    }

    /// Case-insensitive exact category match
    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.to_lowercase() == category.to_lowercase())
    }

    /// Case-insensitive exact match against any tag
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }
}

/// Immutable, ordered collection of documents produced by one build
///
/// Serialized as a bare JSON array so other consumers (sitemaps,
/// category pages) can read it without knowing anything about search.
/// Deserializing goes through [`Corpus::from_documents`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<ContentDocument>")]
pub struct Corpus {
    documents: Vec<ContentDocument>,
}

impl From<Vec<ContentDocument>> for Corpus {
    fn from(documents: Vec<ContentDocument>) -> Self {
        Self::from_documents(documents)
    }
}

impl Serialize for Corpus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.documents.serialize(serializer)
    }
}

impl Corpus {
    /// Build a corpus, enforcing unique ids and non-blank titles.
    ///
    /// Offending documents are dropped (first id wins) and logged.
    pub fn from_documents(documents: Vec<ContentDocument>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(documents.len());

        for doc in documents {
            if doc.title.trim().is_empty() {
                tracing::warn!(id = %doc.id, "Dropping document without title");
                continue;
            }
            if !seen.insert(doc.id.clone()) {
                tracing::warn!(id = %doc.id, "Dropping document with duplicate id");
                continue;
            }
            kept.push(doc);
        }

        Self { documents: kept }
    }

    pub fn documents(&self) -> &[ContentDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ContentDocument> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Category and tag counts for listing pages
    pub fn facets(&self) -> Facets {
        Facets {
            categories: count_facets(self.documents.iter().filter_map(|d| d.category.as_deref())),
            tags: count_facets(
                self.documents
                    .iter()
                    .flat_map(|d| d.tags.iter().map(String::as_str)),
            ),
        }
    }
}

/// Group names case-insensitively, keeping the first spelling seen.
/// Sorted by count descending, then name.
fn count_facets<'a>(names: impl Iterator<Item = &'a str>) -> Vec<FacetCount> {
    let mut order: Vec<FacetCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for name in names {
        let key = name.to_lowercase();
        match index.get(&key) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert(key, order.len());
                order.push(FacetCount {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    order.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    order
}

/// Number of documents carrying one category or tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub name: String,
    pub count: usize,
}

/// Category and tag counts across a corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub categories: Vec<FacetCount>,
    pub tags: Vec<FacetCount>,
}

/// Raw search parameters as a caller supplies them (query string, CLI).
///
/// Everything is optional text; coercion into a [`SearchQuery`] never
/// fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, alias = "term")]
    pub query: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub tag: Option<String>,

    #[serde(default)]
    pub page: Option<String>,

    #[serde(default, alias = "pageSize")]
    pub limit: Option<String>,
}

/// Normalized search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    /// 1-based, always positive
    pub page: usize,
    /// Always positive
    pub page_size: usize,
}

impl SearchQuery {
    /// True when no term and no filter was given
    pub fn is_blank(&self) -> bool {
        self.term.is_none() && self.category.is_none() && self.tag.is_none()
    }
}

/// One document in a result page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(flatten)]
    pub document: ContentDocument,

    /// Present only for term searches. Higher is more relevant; the
    /// best possible value equals the largest field weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

/// Ranked, paginated result set
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub items: Vec<SearchHit>,
    /// Matches before pagination
    pub total_matches: usize,
    /// Page actually returned, after clamping
    pub page: usize,
    pub total_pages: usize,
}

impl SearchResult {
    /// Zero matches on page 1
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_matches: 0,
            page: 1,
            total_pages: 0,
        }
    }
}

/// Search response as sent over the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub total_results: usize,
    pub page: usize,
    pub total_pages: usize,

    /// Set when the search could not run (no index, internal failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Zero-result response carrying an error message
    pub fn failure(page: usize, message: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            total_results: 0,
            page,
            total_pages: 0,
            error: Some(message.into()),
        }
    }
}

impl From<SearchResult> for SearchResponse {
    fn from(result: SearchResult) -> Self {
        Self {
            results: result.items,
            total_results: result.total_matches,
            page: result.page,
            total_pages: result.total_pages,
            error: None,
        }
    }
}

/// Statistics from an index build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildStats {
    /// Items the source listed
    pub items_seen: usize,

    /// Items without the content extension
    pub items_skipped: usize,

    /// Items that could not be read or parsed
    pub items_failed: usize,

    /// Items dropped for lacking a title
    pub items_untitled: usize,

    /// Items dropped because their id was already taken
    pub duplicates: usize,

    /// Documents in the resulting corpus
    pub documents_indexed: usize,

    /// Build duration in milliseconds
    pub duration_ms: u64,

    pub built_at: DateTime<Utc>,

    /// The source could not be enumerated; the corpus is empty
    pub source_unavailable: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Documents in the current snapshot, if one is loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<usize>,
}
