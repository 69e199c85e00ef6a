//! Record and sort-key types returned across the search boundary

use super::error::SearchError;
use crate::query::FileStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One file as the search executor reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Numeric file id
    pub id: u64,
    /// Content descriptor, the stable identifier of the file's content
    pub cd: String,
    /// Size in bytes
    pub size: u64,
    /// Lifecycle state
    pub status: FileStatus,
    /// Normalized tag texts attached to the file
    pub tags: Vec<String>,
    pub imported_at: NaiveDateTime,
    pub changed_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl FileRecord {
    /// Number of tags, as the tag-count property sees it
    #[must_use]
    pub fn tag_count(&self) -> u32 {
        u32::try_from(self.tags.len()).unwrap_or(u32::MAX)
    }
}

/// A sortable record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Id,
    Size,
    ImportedTime,
    ChangedTime,
    CreatedTime,
    TagCount,
}

/// One ordering criterion; a search takes a list of these, applied in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl SortKey {
    #[must_use]
    pub const fn ascending(field: SortField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    #[must_use]
    pub const fn descending(field: SortField) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

impl FromStr for SortKey {
    type Err = SearchError;

    /// Parse `field` or `field:asc` / `field:desc`, e.g. `size:desc`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field_name, direction) = match s.split_once(':') {
            Some((field, dir)) => (field, Some(dir)),
            None => (s, None),
        };

        let field = match field_name.to_lowercase().as_str() {
            "id" => SortField::Id,
            "size" => SortField::Size,
            "imported" | "importedtime" => SortField::ImportedTime,
            "changed" | "changedtime" => SortField::ChangedTime,
            "created" | "createdtime" => SortField::CreatedTime,
            "tagcount" | "tags" => SortField::TagCount,
            _ => return Err(SearchError::InvalidSortKey(s.to_string())),
        };

        let descending = match direction {
            None => false,
            Some(dir) if dir.eq_ignore_ascii_case("asc") => false,
            Some(dir) if dir.eq_ignore_ascii_case("desc") => true,
            Some(_) => return Err(SearchError::InvalidSortKey(s.to_string())),
        };

        Ok(Self { field, descending })
    }
}
