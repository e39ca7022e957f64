//! Blackout monitor selection.
//!
//! Translates what the user asked for on the command line (1-based indices
//! or case-insensitive name fragments) into the exact, ordered set of
//! monitors to cover.

pub mod criterion;
pub mod resolve;

pub use criterion::{parse_index_tokens, SelectionCriterion, SelectionRequest, ALL_SENTINEL};
pub use resolve::{resolve, Selection, SelectionError, SelectionWarning};
