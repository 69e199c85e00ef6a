//! Tagq - A filter query language for tag-based file search
//!
//! This library parses free-text search expressions into a typed query AST,
//! maintains an interactive collection of filter expressions, and renders
//! both the canonical display form and the tagged-union wire format consumed
//! by a search backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cli;
pub mod filters;
pub mod query;
pub mod search;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TagqError {
    /// Query parse error
    #[error("Parse error: {0}")]
    ParseError(#[from] query::ParseError),
    /// Filter collection error
    #[error("Filter error: {0}")]
    FilterError(#[from] filters::FilterError),
    /// Search error
    #[error("Search error: {0}")]
    SearchError(#[from] search::SearchError),
    /// Represents a serialization error
    #[error("Serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A namespaced label attached to a file, owned by an external tag catalog
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub namespace: Option<String>,
}

impl Tag {
    /// Create a new Tag
    #[must_use]
    pub const fn new(id: u64, name: String, namespace: Option<String>) -> Self {
        Self {
            id,
            name,
            namespace,
        }
    }

    /// Normalized display form: `namespace:name`, or just `name` when
    /// the tag has no namespace
    #[must_use]
    pub fn normalized(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_normalized_with_namespace() {
        let tag = Tag::new(1, "rust".into(), Some("lang".into()));
        assert_eq!(tag.normalized(), "lang:rust");
    }

    #[test]
    fn test_tag_normalized_bare() {
        let tag = Tag::new(2, "tutorial".into(), None);
        assert_eq!(tag.normalized(), "tutorial");
    }
}
