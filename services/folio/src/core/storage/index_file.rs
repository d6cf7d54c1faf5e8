//! Corpus artifact on disk.
//!
//! The corpus is written as a bare JSON array of documents. A sidecar
//! `<name>.meta.json` records when and from where it was built:
//!
//! ```text
//! {data_dir}/
//! ├── search-index.json        # [ {id, title, ...}, ... ]
//! └── search-index.meta.json   # schema_version, built_at, documents, source
//! ```
//!
//! Both files are written to a temporary sibling and renamed into
//! place, so readers never observe a half-written artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::error::{FolioError, Result};
use crate::core::types::{BuildStats, Corpus};

/// Current artifact schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Sidecar metadata for a corpus artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub schema_version: u32,
    pub built_at: DateTime<Utc>,
    pub documents: usize,
    /// Where the content came from
    pub source: String,
    #[serde(default)]
    pub source_unavailable: bool,
    #[serde(default)]
    pub index_size_bytes: u64,
}

impl IndexMetadata {
    pub fn from_stats(stats: &BuildStats, source: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            built_at: stats.built_at,
            documents: stats.documents_indexed,
            source: source.into(),
            source_unavailable: stats.source_unavailable,
            index_size_bytes: 0,
        }
    }
}

/// Location of a corpus artifact and its sidecar
#[derive(Debug, Clone)]
pub struct IndexFile {
    path: PathBuf,
}

impl IndexFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `search-index.json` -> `search-index.meta.json`
    pub fn meta_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "search-index".to_string());
        self.path.with_file_name(format!("{stem}.meta.json"))
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Persist the corpus and its metadata
    pub fn write(&self, corpus: &Corpus, meta: &IndexMetadata) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    FolioError::StorageError(format!("cannot create {parent:?}: {e}"))
                })?;
            }
        }

        let json = serde_json::to_vec(corpus)?;
        write_atomic(&self.path, &json)?;

        let meta = IndexMetadata {
            index_size_bytes: json.len() as u64,
            ..meta.clone()
        };
        write_atomic(&self.meta_path(), &serde_json::to_vec_pretty(&meta)?)?;

        tracing::info!(
            path = ?self.path,
            documents = corpus.len(),
            bytes = json.len(),
            "Search index written"
        );
        Ok(())
    }

    /// Load the corpus. `IndexNotFound` when no artifact exists.
    pub fn read(&self) -> Result<Corpus> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FolioError::IndexNotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        // Deserializing re-checks id uniqueness and titles for hand-edited artifacts
        serde_json::from_str(&contents).map_err(|e| {
            FolioError::StorageError(format!("corrupt search index {:?}: {e}", self.path))
        })
    }

    /// Load the sidecar metadata
    pub fn read_metadata(&self) -> Result<IndexMetadata> {
        let meta_path = self.meta_path();
        let contents = match fs::read_to_string(&meta_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FolioError::IndexNotFound(meta_path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let meta: IndexMetadata = serde_json::from_str(&contents)?;
        if meta.schema_version > SCHEMA_VERSION {
            return Err(FolioError::StorageError(format!(
                "search index uses schema v{} but this build reads up to v{}; \
                 rebuild it with `folio build-index`",
                meta.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(meta)
    }
}

/// Write to a unique `<path>.<pid>.<n>.tmp` and rename over `path`
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    static NEXT_TMP: AtomicU64 = AtomicU64::new(0);

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        NEXT_TMP.fetch_add(1, Ordering::Relaxed)
    ));
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes)
        .map_err(|e| FolioError::StorageError(format!("cannot write {tmp:?}: {e}")))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        FolioError::StorageError(format!("cannot replace {path:?}: {e}"))
    })
}
