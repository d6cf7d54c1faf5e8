//! Fuzzy search over a corpus snapshot.
//!
//! - **query**: coercion of raw parameters into a `SearchQuery`
//! - **fuzzy**: bounded approximate substring matching
//! - **engine**: filtering, scoring and ordering
//! - **pagination**: page clamping and slicing

pub mod engine;
pub mod fuzzy;
pub mod pagination;
mod query;

pub use engine::QueryEngine;
pub use fuzzy::{FieldMatch, FuzzyMatcher};
pub use pagination::Page;
pub use query::normalize_term;
