//! Content sources.
//!
//! A source enumerates raw content items by name and reads their
//! text. The builder only sees this trait, so posts can come from a
//! directory on disk or from memory (tests, benchmarks, embedders).

use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::config::ContentConfig;
use crate::core::error::{FolioError, Result};

/// Enumerates and reads raw content items
pub trait ContentSource: Send + Sync {
    /// Human-readable origin, recorded in index metadata
    fn describe(&self) -> String;

    /// Item names in a stable order.
    ///
    /// Fails with `SourceUnavailable` when the source cannot be
    /// enumerated at all.
    fn list(&self) -> Result<Vec<String>>;

    /// Raw text of one item
    fn read(&self, name: &str) -> Result<String>;
}

/// Posts stored as files under a directory
pub struct DirectorySource {
    root: PathBuf,

    /// Walk subdirectories instead of only the top level
    recursive: bool,

    /// Patterns to exclude (e.g., "drafts/**", "**/_*")
    exclude_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,
}

impl DirectorySource {
    /// Create a directory source
    ///
    /// # Arguments
    ///
    /// * `root` - Directory holding the posts
    /// * `recursive` - Also read posts in subdirectories
    /// * `exclude_patterns` - Glob patterns (relative paths) to skip
    /// * `max_file_size_kb` - Maximum file size in kilobytes
    ///
    /// # Returns
    ///
    /// A new `DirectorySource` or an error if a pattern is invalid
    pub fn new(
        root: impl Into<PathBuf>,
        recursive: bool,
        exclude_patterns: &[String],
        max_file_size_kb: u64,
    ) -> Result<Self> {
        let exclude = exclude_patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    FolioError::ConfigError(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            root: root.into(),
            recursive,
            exclude_patterns: exclude,
            max_file_size_bytes: max_file_size_kb.saturating_mul(1024),
        })
    }

    /// Source for the configured posts directory
    pub fn from_config(config: &ContentConfig) -> Result<Self> {
        Self::new(
            &config.posts_dir,
            config.recursive,
            &config.exclude_patterns,
            config.max_file_size_kb,
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Never filters the root; skips hidden and excluded directories
    fn should_descend(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        if entry.file_name().to_string_lossy().starts_with('.') {
            return false;
        }

        match self.relative_name(entry.path()) {
            Some(rel) if self.is_excluded(&rel) => {
                tracing::debug!("Skipping excluded directory: {:?}", entry.path());
                false
            }
            _ => true,
        }
    }

    fn is_excluded(&self, rel: &str) -> bool {
        self.exclude_patterns.iter().any(|p| p.matches(rel))
    }

    /// `/`-separated path relative to the root
    fn relative_name(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
        Some(parts?.join("/"))
    }
}

impl ContentSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(FolioError::SourceUnavailable(format!(
                "content directory {:?} does not exist or is not a directory",
                self.root
            )));
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_descend(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(FolioError::SourceUnavailable(format!(
                        "cannot read content directory {:?}: {e}",
                        self.root
                    )));
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = self.relative_name(entry.path()) else {
                tracing::warn!("Skipping non-UTF-8 path: {:?}", entry.path());
                continue;
            };

            if self.is_excluded(&name) {
                tracing::debug!("Skipping excluded file: {}", name);
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                if metadata.len() > self.max_file_size_bytes {
                    tracing::warn!(
                        "Skipping large file: {} ({} bytes)",
                        name,
                        metadata.len()
                    );
                    continue;
                }
            }

            names.push(name);
        }

        Ok(names)
    }

    fn read(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                FolioError::malformed(name, "not valid UTF-8")
            } else {
                FolioError::IoError(e)
            }
        })
    }
}

/// Posts held in memory as `(name, raw)` pairs
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    items: Vec<(String, String)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, keeping insertion order
    pub fn with_item(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.items.push((name.into(), raw.into()));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        self.items.push((name.into(), raw.into()));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<N: Into<String>, R: Into<String>> FromIterator<(N, R)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(n, r)| (n.into(), r.into()))
                .collect(),
        }
    }
}

impl ContentSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} items)", self.items.len())
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.items.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read(&self, name: &str) -> Result<String> {
        self.items
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, raw)| raw.clone())
            .ok_or_else(|| FolioError::malformed(name, "no such item"))
    }
}
