//! Live corpus snapshot.
//!
//! Queries read an `Arc<Corpus>` that never changes once published. A
//! rebuild produces a brand-new corpus and swaps the pointer, so a
//! reader sees either the old snapshot or the new one, never a mix.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::core::error::{FolioError, Result};
use crate::core::indexer::{ContentSource, IndexBuilder};
use crate::core::storage::index_file::{IndexFile, IndexMetadata};
use crate::core::types::{BuildStats, Corpus};

/// Holder of the current corpus snapshot
pub struct CorpusStore {
    index_file: IndexFile,

    /// `None` until a corpus is loaded or built
    current: RwLock<Option<Arc<Corpus>>>,

    /// Held across build, write and publish so the live snapshot always
    /// matches the artifact on disk
    rebuild_lock: Mutex<()>,
}

impl CorpusStore {
    pub fn new(index_file: IndexFile) -> Self {
        Self {
            index_file,
            current: RwLock::new(None),
            rebuild_lock: Mutex::new(()),
        }
    }

    pub fn index_file(&self) -> &IndexFile {
        &self.index_file
    }

    /// The current snapshot.
    ///
    /// `IndexNotFound` when nothing was ever loaded or built. An empty
    /// build is a valid, empty snapshot.
    pub fn current(&self) -> Result<Arc<Corpus>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| FolioError::IndexNotFound(self.index_file.path().display().to_string()))
    }

    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Publish `corpus` as the new snapshot
    pub fn replace(&self, corpus: Corpus) -> Arc<Corpus> {
        let snapshot = Arc::new(corpus);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        snapshot
    }

    /// Load the on-disk artifact and publish it. Returns the document
    /// count.
    ///
    /// A missing sidecar is tolerated; one with a newer schema version
    /// is rejected before the artifact is read.
    pub fn load(&self) -> Result<usize> {
        match self.index_file.read_metadata() {
            Ok(_) | Err(FolioError::IndexNotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let corpus = self.index_file.read()?;
        let count = corpus.len();
        self.replace(corpus);

        tracing::info!(documents = count, path = ?self.index_file.path(), "Search index loaded");
        Ok(count)
    }

    /// Build a fresh corpus, persist it, then publish it.
    ///
    /// The previous snapshot stays live if persisting fails.
    pub fn rebuild(&self, builder: &IndexBuilder, source: &dyn ContentSource) -> Result<BuildStats> {
        let _guard = self.rebuild_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (corpus, stats) = builder.build(source);

        let meta = IndexMetadata::from_stats(&stats, source.describe());
        self.index_file.write(&corpus, &meta)?;
        self.replace(corpus);

        Ok(stats)
    }
}
