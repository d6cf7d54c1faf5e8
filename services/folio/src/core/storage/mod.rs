//! Corpus persistence and the live snapshot.
//!
//! # Architecture
//!
//! - **IndexFile**: reads and atomically writes the JSON artifact and
//!   its metadata sidecar
//! - **CorpusStore**: holds the current `Arc<Corpus>` and swaps it on
//!   load or rebuild

mod index_file;
mod snapshot;

pub use index_file::{IndexFile, IndexMetadata, SCHEMA_VERSION};
pub use snapshot::CorpusStore;
