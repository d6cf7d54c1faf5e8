//! Index build orchestration.
//!
//! Coordinates the end-to-end build:
//! 1. Enumerate the content source
//! 2. Read and parse each post
//! 3. Derive the search excerpt and reading time
//! 4. Assemble the corpus in source order

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Instant;

use crate::core::config::ContentConfig;
use crate::core::error::{FolioError, Result};
use crate::core::indexer::frontmatter;
use crate::core::indexer::{ContentSource, ExcerptBuilder};
use crate::core::types::{reading_time_label, BuildStats, ContentDocument, Corpus};

/// Outcome of processing one content item
enum Item {
    Document(ContentDocument),
    Untitled,
}

/// Builds a corpus from a content source
pub struct IndexBuilder {
    /// Lowercase extension without the dot
    extension: String,
    default_thumbnail: String,
    excerpt: ExcerptBuilder,

    /// Fixed build timestamp; `None` uses the clock at build time
    build_time: Option<DateTime<Utc>>,
}

impl IndexBuilder {
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            extension: config
                .extension
                .trim_start_matches('.')
                .to_ascii_lowercase(),
            default_thumbnail: config.default_thumbnail.clone(),
            excerpt: ExcerptBuilder::new(config.excerpt_chars, config.words_per_minute),
            build_time: None,
        }
    }

    /// Pin the timestamp used as `publishedAt` for undated posts
    pub fn with_build_time(mut self, build_time: DateTime<Utc>) -> Self {
        self.build_time = Some(build_time);
        self
    }

    /// Build a corpus and return it with build statistics
    ///
    /// Never fails: a source that cannot be enumerated produces an
    /// empty corpus with `source_unavailable` set, and individual
    /// items that cannot be read or parsed are logged and left out.
    pub fn build(&self, source: &dyn ContentSource) -> (Corpus, BuildStats) {
        let start = Instant::now();
        let built_at = self.build_time.unwrap_or_else(Utc::now);
        let mut stats = BuildStats {
            built_at,
            ..Default::default()
        };

        tracing::info!("Starting index build from {}", source.describe());
        let names = match source.list() {
            Ok(names) => names,
            Err(e) => {
                tracing::error!(source = %source.describe(), "Content source unavailable: {}", e);
                stats.source_unavailable = true;
                stats.duration_ms = start.elapsed().as_millis() as u64;
                return (Corpus::default(), stats);
            }
        };
        stats.items_seen = names.len();

        let mut documents = Vec::new();
        let mut seen_ids = HashSet::new();

        for (idx, name) in names.iter().enumerate() {
            if idx % 100 == 0 && idx > 0 {
                tracing::info!("Progress: {}/{} items processed", idx, names.len());
            }

            let Some(id) = self.document_id(name) else {
                tracing::debug!("Skipping {} (not a .{} file)", name, self.extension);
                stats.items_skipped += 1;
                continue;
            };

            match self.process_item(source, name, id, built_at) {
                Ok(Item::Document(doc)) => {
                    if seen_ids.insert(doc.id.clone()) {
                        tracing::debug!(id = %doc.id, "Indexed {}", name);
                        documents.push(doc);
                    } else {
                        tracing::warn!(id = %doc.id, "Duplicate document id, keeping the first: {}", name);
                        stats.duplicates += 1;
                    }
                }
                Ok(Item::Untitled) => {
                    tracing::warn!("Skipping {} (no title)", name);
                    stats.items_untitled += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to process {}: {}", name, e);
                    stats.items_failed += 1;
                }
            }
        }

        let corpus = Corpus::from_documents(documents);
        stats.documents_indexed = corpus.len();
        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            documents = stats.documents_indexed,
            skipped = stats.items_skipped,
            failed = stats.items_failed,
            untitled = stats.items_untitled,
            duplicates = stats.duplicates,
            duration_ms = stats.duration_ms,
            "Index build complete"
        );

        (corpus, stats)
    }

    /// The item name without its extension, or `None` when the name
    /// does not carry the content extension
    pub fn document_id<'a>(&self, name: &'a str) -> Option<&'a str> {
        let suffix_len = self.extension.len() + 1;
        if name.len() <= suffix_len {
            return None;
        }

        let split = name.len() - suffix_len;
        let suffix = name.get(split..)?;
        let matches = suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(&self.extension);

        matches.then(|| &name[..split])
    }

    fn process_item(
        &self,
        source: &dyn ContentSource,
        name: &str,
        id: &str,
        built_at: DateTime<Utc>,
    ) -> Result<Item> {
        let raw = source.read(name)?;
        let parsed = frontmatter::parse(&raw).map_err(|reason| FolioError::malformed(name, reason))?;
        let meta = parsed.meta;

        let Some(title) = meta.title else {
            return Ok(Item::Untitled);
        };

        let reading_time_minutes = self.excerpt.reading_time_minutes(parsed.body);
        Ok(Item::Document(ContentDocument {
            id: id.to_string(),
            title,
            description: meta.description,
            body: self.excerpt.excerpt(parsed.body),
            published_at: meta.date.unwrap_or(built_at),
            tags: meta.tags,
            category: meta.category,
            thumbnail: meta
                .thumbnail
                .unwrap_or_else(|| self.default_thumbnail.clone()),
            reading_time_minutes,
            reading_time: reading_time_label(reading_time_minutes),
        }))
    }
}
