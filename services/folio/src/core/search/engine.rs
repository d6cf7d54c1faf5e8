//! Query execution over a corpus snapshot.
//!
//! Runs in a fixed order: short-circuit on a blank query, category
//! filter, tag filter, fuzzy term scoring (or recency order when no
//! term is given), then pagination.

use crate::core::config::{FieldWeights, SearchConfig};
use crate::core::search::fuzzy::{FuzzyMatcher, Pattern};
use crate::core::search::pagination::Page;
use crate::core::types::{ContentDocument, Corpus, SearchHit, SearchQuery, SearchResult};

/// Stateless query engine; cheap to share
#[derive(Debug, Clone)]
pub struct QueryEngine {
    matcher: FuzzyMatcher,
    weights: FieldWeights,
}

impl QueryEngine {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            matcher: FuzzyMatcher::new(config.threshold, config.min_match_chars),
            weights: config.weights,
        }
    }

    /// Search `corpus` and return one page of ranked hits
    pub fn search(&self, corpus: &Corpus, query: &SearchQuery) -> SearchResult {
        if query.is_blank() {
            return SearchResult::empty();
        }

        let filtered: Vec<&ContentDocument> = corpus
            .documents()
            .iter()
            .filter(|d| query.category.as_deref().map_or(true, |c| d.in_category(c)))
            .filter(|d| query.tag.as_deref().map_or(true, |t| d.has_tag(t)))
            .collect();

        let ranked: Vec<(&ContentDocument, Option<f64>)> = match query.term.as_deref() {
            Some(term) => self.rank(&filtered, term),
            None => {
                let mut docs = filtered;
                // Stable, so equal dates keep corpus order
                docs.sort_by(|a, b| b.published_at.cmp(&a.published_at));
                docs.into_iter().map(|d| (d, None)).collect()
            }
        };

        let page = Page::resolve(ranked.len(), query.page, query.page_size);
        tracing::debug!(
            matches = ranked.len(),
            page = page.number,
            total_pages = page.total_pages,
            "Search executed"
        );

        SearchResult {
            total_matches: ranked.len(),
            page: page.number,
            total_pages: page.total_pages,
            items: ranked[page.range]
                .iter()
                .map(|(doc, score)| SearchHit {
                    document: (*doc).clone(),
                    relevance_score: *score,
                })
                .collect(),
        }
    }

    /// Score every document against `term`, drop non-matches and sort
    /// by relevance, best first. Ties keep corpus order.
    fn rank<'a>(
        &self,
        docs: &[&'a ContentDocument],
        term: &str,
    ) -> Vec<(&'a ContentDocument, Option<f64>)> {
        let Some(pattern) = self.matcher.prepare(term) else {
            return Vec::new();
        };

        let mut scored: Vec<(&ContentDocument, f64)> = docs
            .iter()
            .filter_map(|doc| self.score(&pattern, doc).map(|s| (*doc, s)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().map(|(d, s)| (d, Some(s))).collect()
    }

    /// Relevance of one document: the best weighted field similarity,
    /// or `None` when no field matches
    pub fn score(&self, pattern: &Pattern, doc: &ContentDocument) -> Option<f64> {
        let mut best: Option<f64> = None;
        let mut consider = |weight: f64, text: &str| {
            if weight <= 0.0 {
                return;
            }
            if let Some(hit) = self.matcher.match_field(pattern, text) {
                let weighted = hit.similarity * weight;
                if best.map_or(true, |b| weighted > b) {
                    best = Some(weighted);
                }
            }
        };

        consider(self.weights.title, &doc.title);
        consider(self.weights.description, &doc.description);
        consider(self.weights.body, &doc.body);
        for tag in &doc.tags {
            consider(self.weights.tags, tag);
        }

        best
    }
}
