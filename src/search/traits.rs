//! Trait seams of the search boundary
//!
//! `SearchBackend` is what the UI consumes: hand it the active filter list
//! and sort order, get records back. Storage engines implement it however
//! they like; the crate ships an in-memory implementation for tests,
//! scripting, and embedders without a database.
//!
//! `FilterMatch` is the evaluation half: every AST node knows whether a
//! given record satisfies it. The top-level expression list is AND-combined;
//! entries inside an OR-group are OR-combined.

use super::error::SearchError;
use super::record::{FileRecord, SortKey};
use crate::query::{FilterExpression, FilterQuery, PropertyQuery, TagQuery};

/// Evaluate a query-tree node against one record
pub trait FilterMatch {
    /// True when `record` satisfies this node
    fn matches(&self, record: &FileRecord) -> bool;
}

impl FilterMatch for TagQuery {
    fn matches(&self, record: &FileRecord) -> bool {
        let has_tag = record.tags.iter().any(|tag| *tag == self.tag);
        has_tag != self.negate
    }
}

impl FilterMatch for PropertyQuery {
    fn matches(&self, record: &FileRecord) -> bool {
        match self {
            Self::Status(status) => record.status == *status,
            Self::FileSize(cmp) => cmp.matches(&record.size),
            Self::ImportedTime(cmp) => cmp.matches(&record.imported_at),
            Self::ChangedTime(cmp) => cmp.matches(&record.changed_at),
            Self::CreatedTime(cmp) => cmp.matches(&record.created_at),
            Self::TagCount(cmp) => cmp.matches(&record.tag_count()),
            Self::ContentDescriptor(cd) => record.cd == *cd,
            Self::FileId(id) => record.id == *id,
        }
    }
}

impl FilterMatch for FilterQuery {
    fn matches(&self, record: &FileRecord) -> bool {
        match self {
            Self::Tag(query) => query.matches(record),
            Self::Property(query) => query.matches(record),
        }
    }
}

impl FilterMatch for FilterExpression {
    fn matches(&self, record: &FileRecord) -> bool {
        match self {
            Self::Query(query) => query.matches(record),
            Self::OrExpression(queries) => queries.iter().any(|query| query.matches(record)),
        }
    }
}

/// Extension trait for filtering record collections
pub trait RecordFilterExt {
    /// Records satisfying every expression in `filters`
    fn apply_filters<'a>(
        &'a self,
        filters: &'a [FilterExpression],
    ) -> impl Iterator<Item = &'a FileRecord> + 'a;
}

impl RecordFilterExt for [FileRecord] {
    fn apply_filters<'a>(
        &'a self,
        filters: &'a [FilterExpression],
    ) -> impl Iterator<Item = &'a FileRecord> + 'a {
        self.iter()
            .filter(move |record| filters.iter().all(|expr| expr.matches(record)))
    }
}

/// The capability the UI consumes to run a search
pub trait SearchBackend {
    /// Execute the filter list against the store
    ///
    /// # Errors
    /// Returns `SearchError` when the store cannot be queried.
    fn search(
        &self,
        filters: &[FilterExpression],
        sort: &[SortKey],
    ) -> Result<Vec<FileRecord>, SearchError>;
}
