//! Query AST data structures
//!
//! This module defines the typed query tree:
//! - `Comparator<T>`: The relational test carried by property filters
//! - `TagQuery` / `PropertyQuery`: The two kinds of atomic filter terms
//! - `FilterQuery`: The atomic, indivisible filter term
//! - `FilterExpression`: A single query or an OR-group of queries
//!
//! All types serialize with serde's externally tagged representation, which
//! is exactly the wire shape the search executor consumes
//! (`{"Query": ...}`, `{"OrExpression": [...]}`, `{"Less": ...}`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format used for rendering and re-parsing date-valued properties
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Three-way (plus range) comparison wrapper used by relational property
/// filters. `Between` carries `(min, max)`; ordering of the pair is the
/// caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator<T> {
    Less(T),
    Equal(T),
    Greater(T),
    Between(T, T),
}

impl<T> Comparator<T> {
    /// The display symbol for this comparison.
    ///
    /// `Between` renders as `=`: the free-text grammar has no between
    /// syntax, so its display form is lossy and shows the first endpoint.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Less(_) => "<",
            Self::Equal(_) | Self::Between(_, _) => "=",
            Self::Greater(_) => ">",
        }
    }

    /// The first (or only) carried value
    #[must_use]
    pub const fn first(&self) -> &T {
        match self {
            Self::Less(v) | Self::Equal(v) | Self::Greater(v) | Self::Between(v, _) => v,
        }
    }
}

impl<T: PartialOrd> Comparator<T> {
    /// Test a concrete value against this comparison
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::Less(limit) => value < limit,
            Self::Equal(expected) => value == expected,
            Self::Greater(limit) => value > limit,
            Self::Between(min, max) => value >= min && value <= max,
        }
    }
}

/// Lifecycle state of a file in the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Imported,
    Archived,
    Deleted,
}

impl TryFrom<&str> for FileStatus {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("imported") {
            Ok(Self::Imported)
        } else if value.eq_ignore_ascii_case("archived") {
            Ok(Self::Archived)
        } else if value.eq_ignore_ascii_case("deleted") {
            Ok(Self::Deleted)
        } else {
            Err(())
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imported => write!(f, "imported"),
            Self::Archived => write!(f, "archived"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// "Must have" or "must not have" a tag, by normalized `namespace:name` text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagQuery {
    pub tag: String,
    pub negate: bool,
}

impl TagQuery {
    /// Create a new tag query
    #[must_use]
    pub fn new(tag: impl Into<String>, negate: bool) -> Self {
        Self {
            tag: tag.into(),
            negate,
        }
    }

    /// Query for a catalog tag, using its normalized `namespace:name` form
    #[must_use]
    pub fn from_tag(tag: &crate::Tag, negate: bool) -> Self {
        Self::new(tag.normalized(), negate)
    }
}

/// A comparison against one of the file properties tracked by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyQuery {
    Status(FileStatus),
    FileSize(Comparator<u64>),
    ImportedTime(Comparator<NaiveDateTime>),
    ChangedTime(Comparator<NaiveDateTime>),
    CreatedTime(Comparator<NaiveDateTime>),
    TagCount(Comparator<u32>),
    #[serde(rename = "Cd")]
    ContentDescriptor(String),
    #[serde(rename = "Id")]
    FileId(u64),
}

impl PropertyQuery {
    /// Canonical property name, the one the display form uses.
    ///
    /// The parser additionally accepts aliases (`importedat`,
    /// `contentdescriptor`, ...); rendering always picks these.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::FileSize(_) => "filesize",
            Self::ImportedTime(_) => "importedtime",
            Self::ChangedTime(_) => "changedtime",
            Self::CreatedTime(_) => "createdtime",
            Self::TagCount(_) => "tagcount",
            Self::ContentDescriptor(_) => "cd",
            Self::FileId(_) => "id",
        }
    }
}

/// The atomic, indivisible filter term: a tag match or a property comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterQuery {
    Tag(TagQuery),
    Property(PropertyQuery),
}

impl FilterQuery {
    /// Build a tag query term
    #[must_use]
    pub fn tag(tag: impl Into<String>, negate: bool) -> Self {
        Self::Tag(TagQuery::new(tag, negate))
    }

    /// Build a status property term
    #[must_use]
    pub const fn status(status: FileStatus) -> Self {
        Self::Property(PropertyQuery::Status(status))
    }

    /// Build a file-size property term
    #[must_use]
    pub const fn file_size(cmp: Comparator<u64>) -> Self {
        Self::Property(PropertyQuery::FileSize(cmp))
    }

    /// Build an imported-time property term
    #[must_use]
    pub const fn imported_time(cmp: Comparator<NaiveDateTime>) -> Self {
        Self::Property(PropertyQuery::ImportedTime(cmp))
    }

    /// Build a changed-time property term
    #[must_use]
    pub const fn changed_time(cmp: Comparator<NaiveDateTime>) -> Self {
        Self::Property(PropertyQuery::ChangedTime(cmp))
    }

    /// Build a created-time property term
    #[must_use]
    pub const fn created_time(cmp: Comparator<NaiveDateTime>) -> Self {
        Self::Property(PropertyQuery::CreatedTime(cmp))
    }

    /// Build a tag-count property term
    #[must_use]
    pub const fn tag_count(cmp: Comparator<u32>) -> Self {
        Self::Property(PropertyQuery::TagCount(cmp))
    }

    /// Build a content-descriptor property term
    #[must_use]
    pub fn content_descriptor(cd: impl Into<String>) -> Self {
        Self::Property(PropertyQuery::ContentDescriptor(cd.into()))
    }

    /// Build a file-id property term
    #[must_use]
    pub const fn file_id(id: u64) -> Self {
        Self::Property(PropertyQuery::FileId(id))
    }

    /// Canonical single-term rendering, also used as the deduplication key:
    /// `-tag`/`tag` for tag terms, the display form for property terms
    #[must_use]
    pub fn rendered(&self) -> String {
        self.to_string()
    }
}

impl From<TagQuery> for FilterQuery {
    fn from(query: TagQuery) -> Self {
        Self::Tag(query)
    }
}

impl From<PropertyQuery> for FilterQuery {
    fn from(query: PropertyQuery) -> Self {
        Self::Property(query)
    }
}

/// A single filter query or an OR-group of filter queries.
///
/// The unit stored in a `SearchFilters` list. Entries of the list are
/// AND-combined; queries inside an `OrExpression` are OR-combined.
/// An `OrExpression` never persists with fewer than two entries: every
/// mutator collapses singletons back to `Query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterExpression {
    Query(FilterQuery),
    OrExpression(Vec<FilterQuery>),
}

impl FilterExpression {
    /// Normalizing constructor: no queries is no expression, one query is a
    /// plain `Query`, more form an `OrExpression`
    #[must_use]
    pub fn from_queries(mut queries: Vec<FilterQuery>) -> Option<Self> {
        match queries.len() {
            0 => None,
            1 => Some(Self::Query(queries.remove(0))),
            _ => Some(Self::OrExpression(queries)),
        }
    }

    /// The queries held by this expression, in order
    #[must_use]
    pub fn queries(&self) -> &[FilterQuery] {
        match self {
            Self::Query(query) => std::slice::from_ref(query),
            Self::OrExpression(queries) => queries,
        }
    }

    /// True for the OR-group variant
    #[must_use]
    pub const fn is_or(&self) -> bool {
        matches!(self, Self::OrExpression(_))
    }
}

impl From<FilterQuery> for FilterExpression {
    fn from(query: FilterQuery) -> Self {
        Self::Query(query)
    }
}

impl fmt::Display for TagQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negate {
            write!(f, "-{}", self.tag)
        } else {
            write!(f, "{}", self.tag)
        }
    }
}

impl fmt::Display for PropertyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, ".status = {status}"),
            Self::FileSize(cmp) => {
                write!(f, ".filesize {} {}", cmp.symbol(), cmp.first())
            }
            Self::ImportedTime(cmp) | Self::ChangedTime(cmp) | Self::CreatedTime(cmp) => {
                write!(
                    f,
                    ".{} {} {}",
                    self.name(),
                    cmp.symbol(),
                    cmp.first().format(TIMESTAMP_FORMAT)
                )
            }
            Self::TagCount(cmp) => {
                write!(f, ".tagcount {} {}", cmp.symbol(), cmp.first())
            }
            Self::ContentDescriptor(cd) => write!(f, ".cd = {cd}"),
            Self::FileId(id) => write!(f, ".id = {id}"),
        }
    }
}

impl fmt::Display for FilterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(query) => write!(f, "{query}"),
            Self::Property(query) => write!(f, "{query}"),
        }
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(query) => write!(f, "{query}"),
            Self::OrExpression(queries) => {
                let parts: Vec<String> = queries.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(" OR "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_comparator_matches() {
        assert!(Comparator::Less(10u64).matches(&5));
        assert!(!Comparator::Less(10u64).matches(&10));
        assert!(Comparator::Equal(10u64).matches(&10));
        assert!(Comparator::Greater(10u64).matches(&11));
        assert!(Comparator::Between(5u64, 10).matches(&5));
        assert!(Comparator::Between(5u64, 10).matches(&10));
        assert!(!Comparator::Between(5u64, 10).matches(&11));
    }

    #[test]
    fn test_comparator_symbols() {
        assert_eq!(Comparator::Less(1u32).symbol(), "<");
        assert_eq!(Comparator::Equal(1u32).symbol(), "=");
        assert_eq!(Comparator::Greater(1u32).symbol(), ">");
        assert_eq!(Comparator::Between(1u32, 2).symbol(), "=");
    }

    #[test]
    fn test_status_try_from() {
        assert_eq!(FileStatus::try_from("imported"), Ok(FileStatus::Imported));
        assert_eq!(FileStatus::try_from("ARCHIVED"), Ok(FileStatus::Archived));
        assert_eq!(FileStatus::try_from("Deleted"), Ok(FileStatus::Deleted));
        assert!(FileStatus::try_from("trashed").is_err());
    }

    #[test]
    fn test_tag_query_from_catalog_tag() {
        let tag = crate::Tag::new(7, "rust".into(), Some("lang".into()));
        let query = TagQuery::from_tag(&tag, true);
        assert_eq!(query, TagQuery::new("lang:rust", true));
    }

    #[test]
    fn test_display_tag_query() {
        assert_eq!(FilterQuery::tag("foo", false).to_string(), "foo");
        assert_eq!(FilterQuery::tag("foo", true).to_string(), "-foo");
        assert_eq!(
            FilterQuery::tag("creator:somebody", false).to_string(),
            "creator:somebody"
        );
    }

    #[test]
    fn test_display_property_queries() {
        assert_eq!(
            FilterQuery::status(FileStatus::Imported).to_string(),
            ".status = imported"
        );
        assert_eq!(
            FilterQuery::file_size(Comparator::Greater(1024)).to_string(),
            ".filesize > 1024"
        );
        assert_eq!(
            FilterQuery::imported_time(Comparator::Less(dt(2024, 6, 17))).to_string(),
            ".importedtime < 2024-06-17T00:00:00"
        );
        assert_eq!(
            FilterQuery::tag_count(Comparator::Equal(3)).to_string(),
            ".tagcount = 3"
        );
        assert_eq!(FilterQuery::file_id(42).to_string(), ".id = 42");
    }

    #[test]
    fn test_display_between_shows_first_value_only() {
        let query = FilterQuery::file_size(Comparator::Between(100, 200));
        assert_eq!(query.to_string(), ".filesize = 100");
    }

    #[test]
    fn test_display_or_expression() {
        let expr = FilterExpression::OrExpression(vec![
            FilterQuery::tag("foo", false),
            FilterQuery::tag("bar", true),
        ]);
        assert_eq!(expr.to_string(), "foo OR -bar");
    }

    #[test]
    fn test_from_queries_normalizes() {
        assert_eq!(FilterExpression::from_queries(vec![]), None);

        let single = FilterExpression::from_queries(vec![FilterQuery::tag("a", false)]).unwrap();
        assert!(matches!(single, FilterExpression::Query(_)));

        let group = FilterExpression::from_queries(vec![
            FilterQuery::tag("a", false),
            FilterQuery::tag("b", false),
        ])
        .unwrap();
        assert!(group.is_or());
        assert_eq!(group.queries().len(), 2);
    }

    #[test]
    fn test_wire_format_query() {
        let expr = FilterExpression::Query(FilterQuery::tag("foo", true));
        let json = serde_json::to_string(&expr).unwrap();
        assert_eq!(json, r#"{"Query":{"Tag":{"tag":"foo","negate":true}}}"#);
    }

    #[test]
    fn test_wire_format_or_expression() {
        let expr = FilterExpression::OrExpression(vec![
            FilterQuery::tag("a", false),
            FilterQuery::status(FileStatus::Archived),
        ]);
        let json = serde_json::to_string(&expr).unwrap();
        assert_eq!(
            json,
            r#"{"OrExpression":[{"Tag":{"tag":"a","negate":false}},{"Property":{"Status":"Archived"}}]}"#
        );
    }

    #[test]
    fn test_wire_format_comparators() {
        let query = FilterQuery::file_size(Comparator::Between(100, 200));
        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"Property":{"FileSize":{"Between":[100,200]}}}"#);

        let query = FilterQuery::tag_count(Comparator::Less(5));
        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"Property":{"TagCount":{"Less":5}}}"#);
    }

    #[test]
    fn test_wire_format_renamed_variants() {
        let cd = FilterQuery::content_descriptor("abc123");
        assert_eq!(
            serde_json::to_string(&cd).unwrap(),
            r#"{"Property":{"Cd":"abc123"}}"#
        );

        let id = FilterQuery::file_id(7);
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            r#"{"Property":{"Id":7}}"#
        );
    }

    #[test]
    fn test_wire_format_round_trip() {
        let expr = FilterExpression::OrExpression(vec![
            FilterQuery::tag("foo", false),
            FilterQuery::imported_time(Comparator::Greater(dt(2023, 1, 1))),
        ]);
        let json = serde_json::to_string(&expr).unwrap();
        let back: FilterExpression = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expr);
    }
}
