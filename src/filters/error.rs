//! Error types for filter collection operations
//!
//! Indexed mutations on a `SearchFilters` collection report out-of-range
//! positions through these errors instead of panicking; the collection is
//! never left in a state violating its structural invariants.

use thiserror::Error;

/// Errors that can occur during filter collection operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// Top-level index out of range
    #[error("Filter index {index} out of bounds (collection holds {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Index into an OR-group's entries out of range
    #[error("Subfilter index {subindex} out of bounds at element {index} ({len} entries)")]
    SubindexOutOfBounds {
        index: usize,
        subindex: usize,
        len: usize,
    },
}
