//! Error types and error handling for the Folio search service.
//!
//! This module defines the error types used throughout the
//! application. Protocol-specific handling (HTTP status codes) lives
//! in the respective adapter modules.

use thiserror::Error;

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Main error type for the Folio service
#[derive(Error, Debug)]
pub enum FolioError {
    /// No corpus artifact has ever been built or loaded
    #[error("Search index not found: {0}")]
    IndexNotFound(String),

    #[error("Content source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Malformed document '{name}': {reason}")]
    MalformedDocument { name: String, reason: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl FolioError {
    /// Shorthand for a per-document parse failure
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        FolioError::MalformedDocument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FolioError::IndexNotFound(_) | FolioError::SourceUnavailable(_)
        )
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            FolioError::InvalidQuery(_) | FolioError::ConfigError(_)
        )
    }
}
