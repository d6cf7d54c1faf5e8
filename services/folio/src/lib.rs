//! Folio - search for a markdown blog
//!
//! Reads markdown posts with YAML front matter, builds a flat search
//! corpus from them, and answers typo-tolerant queries against it with
//! category and tag filters and pagination.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, logging, types, xdg
//!   - indexer (content sources, front matter, excerpts, build pipeline)
//!   - search (fuzzy matching, ranking, pagination)
//!   - storage (corpus artifact, current snapshot)
//!   - services (unified service container)
//!
//! - **http**: REST API adapter (depends on core)
//!   - handlers, middleware, error responses
//!
//! - **cli**: command-line adapter (depends on core)
//!   - commands, output formatting

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP REST adapter
pub mod http;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{FolioError, Result};
pub use core::services::Services;
pub use core::storage::{CorpusStore, IndexFile, IndexMetadata};
pub use core::types::*;
