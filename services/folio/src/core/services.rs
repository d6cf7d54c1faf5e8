//! Unified service container for Folio
//!
//! Provides shared access to all core services.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::core::config::Config;
use crate::core::error::{FolioError, Result};
use crate::core::indexer::{DirectorySource, IndexBuilder};
use crate::core::search::QueryEngine;
use crate::core::storage::{CorpusStore, IndexFile};
use crate::core::types::{BuildStats, Facets, SearchParams, SearchQuery, SearchResult};

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Current corpus snapshot and its artifact
    pub store: Arc<CorpusStore>,

    /// Query engine configured from `[search]`
    pub engine: Arc<QueryEngine>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration. No corpus is loaded yet.
    pub fn new(config: Config) -> Self {
        let store = Arc::new(CorpusStore::new(IndexFile::new(
            config.storage.index_file.clone(),
        )));
        let engine = Arc::new(QueryEngine::new(&config.search));

        Self {
            store,
            engine,
            config: Arc::new(config),
        }
    }

    /// Coerce raw parameters and run the search
    pub fn search(&self, params: SearchParams) -> Result<SearchResult> {
        let query = params.into_query(&self.config.search);
        self.run_query(&query)
    }

    /// Run a normalized query against the current snapshot.
    ///
    /// A panic inside the engine is caught here and reported as
    /// `SearchFailed` so one bad query cannot take the process down.
    pub fn run_query(&self, query: &SearchQuery) -> Result<SearchResult> {
        let corpus = self.store.current()?;
        let engine = &self.engine;

        guarded_search(query, || engine.search(&corpus, query))
    }

    /// Category and tag counts of the current snapshot
    pub fn facets(&self) -> Result<Facets> {
        Ok(self.store.current()?.facets())
    }

    /// Builder configured from `[content]`
    pub fn builder(&self) -> IndexBuilder {
        IndexBuilder::new(&self.config.content)
    }

    /// Source for the configured posts directory
    pub fn content_source(&self) -> Result<DirectorySource> {
        DirectorySource::from_config(&self.config.content)
    }

    /// Rebuild from the configured posts directory, persist and swap
    pub fn rebuild(&self) -> Result<BuildStats> {
        let source = self.content_source()?;
        self.store.rebuild(&self.builder(), &source)
    }

    /// Load the persisted corpus, or build it when `build_if_missing`
    /// is set and no artifact exists
    pub fn load_or_build(&self, build_if_missing: bool) -> Result<usize> {
        match self.store.load() {
            Ok(count) => Ok(count),
            Err(FolioError::IndexNotFound(path)) if build_if_missing => {
                tracing::info!("No search index at {}, building one", path);
                self.rebuild().map(|stats| stats.documents_indexed)
            }
            Err(e) => Err(e),
        }
    }
}

/// Run `search`, turning a panic into `SearchFailed`
pub(crate) fn guarded_search<F>(query: &SearchQuery, search: F) -> Result<SearchResult>
where
    F: FnOnce() -> SearchResult,
{
    panic::catch_unwind(AssertUnwindSafe(search)).map_err(|payload| {
        let reason = panic_message(payload.as_ref());
        tracing::error!(term = ?query.term, "Search failed: {}", reason);
        FolioError::SearchFailed(reason)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "internal error".to_string()
    }
}
