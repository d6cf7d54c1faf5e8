//! Corpus building.
//!
//! Turns a collection of markdown posts into the serializable corpus
//! the query engine reads. Key features:
//!
//! - Pluggable content sources (directory or in-memory)
//! - YAML front matter with parse-time defaults
//! - Plain-text search excerpts, UTF-8 safe truncation
//! - Per-item failures are logged and skipped, never fatal
//!
//! The build itself never fails. A source that cannot be listed
//! yields an empty corpus flagged in `BuildStats`.

pub mod excerpt;
pub mod frontmatter;
pub mod pipeline;
pub mod source;

pub use excerpt::ExcerptBuilder;
pub use frontmatter::FrontMatter;
pub use pipeline::IndexBuilder;
pub use source::{ContentSource, DirectorySource, MemorySource};
