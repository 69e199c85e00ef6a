//! In-memory search backend
//!
//! Reference implementation of [`SearchBackend`] over an owned record list.
//! Backs the CLI's `search` command and integration tests; embedders with a
//! real storage engine implement the trait themselves.

use super::error::SearchError;
use super::record::{FileRecord, SortField, SortKey};
use super::traits::{RecordFilterExt, SearchBackend};
use crate::query::FilterExpression;
use std::cmp::Ordering;
use std::path::Path;

/// Search backend over an owned, in-memory record list
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: Vec<FileRecord>,
}

impl MemoryBackend {
    /// Create a backend over the given records
    #[must_use]
    pub const fn new(records: Vec<FileRecord>) -> Self {
        Self { records }
    }

    /// Load records from a JSON file holding a `FileRecord` array
    ///
    /// # Errors
    /// Returns `SearchError` if the file cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Self, SearchError> {
        let contents = std::fs::read_to_string(path)?;
        let records: Vec<FileRecord> = serde_json::from_str(&contents)?;
        Ok(Self::new(records))
    }

    #[must_use]
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    fn compare(a: &FileRecord, b: &FileRecord, sort: &[SortKey]) -> Ordering {
        for key in sort {
            let ordering = match key.field {
                SortField::Id => a.id.cmp(&b.id),
                SortField::Size => a.size.cmp(&b.size),
                SortField::ImportedTime => a.imported_at.cmp(&b.imported_at),
                SortField::ChangedTime => a.changed_at.cmp(&b.changed_at),
                SortField::CreatedTime => a.created_at.cmp(&b.created_at),
                SortField::TagCount => a.tag_count().cmp(&b.tag_count()),
            };
            let ordering = if key.descending {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl SearchBackend for MemoryBackend {
    fn search(
        &self,
        filters: &[FilterExpression],
        sort: &[SortKey],
    ) -> Result<Vec<FileRecord>, SearchError> {
        let mut results: Vec<FileRecord> = self
            .records
            .apply_filters(filters)
            .cloned()
            .collect();

        if !sort.is_empty() {
            results.sort_by(|a, b| Self::compare(a, b, sort));
        }

        Ok(results)
    }
}
