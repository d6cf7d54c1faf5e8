//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of transport protocols (HTTP, CLI).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **logging**: Tracing subscriber setup
//! - **types**: Documents, corpus, queries and results
//! - **xdg**: XDG directory handling
//! - **indexer**: Content sources, front matter and corpus building
//! - **search**: Fuzzy query engine and pagination
//! - **storage**: Corpus artifact and live snapshot
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod indexer;
pub mod logging;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{FolioError, Result};
pub use services::Services;
