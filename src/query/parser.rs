//! Free-text parsing of filter terms and expressions
//!
//! A term group is split on a case-insensitive `" or "` separator; each term
//! is then either a tag reference (`foo`, `-foo`) or, with a leading dot, a
//! property comparison (`.filesize > 10MiB`). Property terms are scanned by
//! an explicit three-state machine: name, comparator, value.
//!
//! `parse_term` reports failures through [`ParseError`] for callers that
//! want diagnostics; [`parse_expression`] exposes the absence-of-result
//! model the incremental search UI works with.

use super::types::{Comparator, FileStatus, FilterExpression, FilterQuery, PropertyQuery};
use super::value;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static OR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+or\s+").expect("separator pattern is a valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty filter term")]
    EmptyTerm,
    #[error("Unknown property: {0}")]
    UnknownProperty(String),
    #[error("Property term has no comparator: {0}")]
    MissingComparator(String),
    #[error("Invalid comparator: {0}")]
    InvalidComparator(String),
    #[error("Property term has no value: {0}")]
    MissingValue(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Property '{property}' does not accept '{comparator}'")]
    UnsupportedComparator {
        property: &'static str,
        comparator: String,
    },
    #[error("Too many values: {0}")]
    TooManyValues(String),
}

/// A resolved property name. Aliases are case-insensitive and ignore
/// hyphens/underscores, so `imported-at`, `imported_date`, and
/// `importedtime` all land on the same property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyName {
    Status,
    FileSize,
    ImportedTime,
    ChangedTime,
    CreatedTime,
    TagCount,
    ContentDescriptor,
    FileId,
}

fn resolve_property(name: &str) -> Option<PropertyName> {
    let folded: String = name
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect();

    match folded.as_str() {
        "status" => Some(PropertyName::Status),
        "filesize" => Some(PropertyName::FileSize),
        "importedat" | "importeddate" | "importedtime" => Some(PropertyName::ImportedTime),
        "changedat" | "changeddate" | "changedtime" => Some(PropertyName::ChangedTime),
        "createdat" | "createddate" | "createdtime" => Some(PropertyName::CreatedTime),
        "tagcount" => Some(PropertyName::TagCount),
        "cd" | "contentdescriptor" => Some(PropertyName::ContentDescriptor),
        "id" | "fileid" => Some(PropertyName::FileId),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompOp {
    Equal,
    Less,
    Greater,
}

fn resolve_comparator(token: &str) -> Option<CompOp> {
    match token {
        "=" | "==" => Some(CompOp::Equal),
        "<" => Some(CompOp::Less),
        ">" => Some(CompOp::Greater),
        _ => None,
    }
}

const fn make_comparator<T>(op: CompOp, value: T) -> Comparator<T> {
    match op {
        CompOp::Equal => Comparator::Equal(value),
        CompOp::Less => Comparator::Less(value),
        CompOp::Greater => Comparator::Greater(value),
    }
}

const fn is_comparator_char(c: char) -> bool {
    matches!(c, '=' | '<' | '>')
}

/// Scanner states for property terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Name,
    Comparator,
    Value,
}

/// Split a property term into its name, comparator token, and raw value.
///
/// Characters accumulate into the name until the first comparator character;
/// comparator characters accumulate until the first non-comparator
/// character; everything after that is the value.
fn scan_property(term: &str) -> Result<(String, String, String), ParseError> {
    let mut state = ScanState::Name;
    let mut name = String::new();
    let mut comparator = String::new();
    let mut raw_value = String::new();

    for c in term.chars() {
        match state {
            ScanState::Name => {
                if is_comparator_char(c) {
                    state = ScanState::Comparator;
                    comparator.push(c);
                } else if !c.is_whitespace() {
                    name.push(c);
                }
            }
            ScanState::Comparator => {
                if is_comparator_char(c) {
                    comparator.push(c);
                } else {
                    state = ScanState::Value;
                    raw_value.push(c);
                }
            }
            ScanState::Value => raw_value.push(c),
        }
    }

    if state == ScanState::Name {
        return Err(ParseError::MissingComparator(term.to_string()));
    }

    Ok((name, comparator, raw_value.trim().to_string()))
}

fn require_equal(property: &'static str, op: CompOp, token: &str) -> Result<(), ParseError> {
    if op == CompOp::Equal {
        Ok(())
    } else {
        Err(ParseError::UnsupportedComparator {
            property,
            comparator: token.to_string(),
        })
    }
}

fn parse_property(term: &str) -> Result<PropertyQuery, ParseError> {
    let (name, comparator_token, raw_value) = scan_property(term)?;

    let property =
        resolve_property(&name).ok_or_else(|| ParseError::UnknownProperty(name.clone()))?;
    let op = resolve_comparator(&comparator_token)
        .ok_or_else(|| ParseError::InvalidComparator(comparator_token.clone()))?;

    if raw_value.is_empty() {
        return Err(ParseError::MissingValue(term.to_string()));
    }
    // Free text can never select Between, the only comparator a second
    // value token would be meaningful for
    if raw_value.split_whitespace().nth(1).is_some() {
        return Err(ParseError::TooManyValues(raw_value));
    }
    let value = raw_value.as_str();

    let invalid = || ParseError::InvalidValue(value.to_string());

    match property {
        PropertyName::Status => {
            require_equal("status", op, &comparator_token)?;
            let status: FileStatus = value::parse_status(value).ok_or_else(invalid)?;
            Ok(PropertyQuery::Status(status))
        }
        PropertyName::FileSize => {
            let size = value::parse_byte_size(value).ok_or_else(invalid)?;
            Ok(PropertyQuery::FileSize(make_comparator(op, size)))
        }
        PropertyName::ImportedTime => {
            let date = value::parse_date(value).ok_or_else(invalid)?;
            Ok(PropertyQuery::ImportedTime(make_comparator(op, date)))
        }
        PropertyName::ChangedTime => {
            let date = value::parse_date(value).ok_or_else(invalid)?;
            Ok(PropertyQuery::ChangedTime(make_comparator(op, date)))
        }
        PropertyName::CreatedTime => {
            let date = value::parse_date(value).ok_or_else(invalid)?;
            Ok(PropertyQuery::CreatedTime(make_comparator(op, date)))
        }
        PropertyName::TagCount => {
            let count = value.parse::<u32>().map_err(|_| invalid())?;
            Ok(PropertyQuery::TagCount(make_comparator(op, count)))
        }
        PropertyName::ContentDescriptor => {
            require_equal("cd", op, &comparator_token)?;
            Ok(PropertyQuery::ContentDescriptor(value.to_string()))
        }
        PropertyName::FileId => {
            require_equal("id", op, &comparator_token)?;
            let id = value.parse::<u64>().map_err(|_| invalid())?;
            Ok(PropertyQuery::FileId(id))
        }
    }
}

/// Parse a single filter term into a query.
///
/// The term is expected trimmed and lower-cased. A leading `.` selects the
/// property grammar and a failure there is final, never reinterpreted as a
/// tag; a leading `-` negates a tag term.
///
/// # Errors
/// Returns a [`ParseError`] describing the first thing wrong with the term.
pub fn parse_term(term: &str) -> Result<FilterQuery, ParseError> {
    if term.is_empty() {
        return Err(ParseError::EmptyTerm);
    }

    if let Some(property_term) = term.strip_prefix('.') {
        return parse_property(property_term).map(FilterQuery::Property);
    }

    if let Some(tag) = term.strip_prefix('-') {
        if tag.is_empty() {
            return Err(ParseError::EmptyTerm);
        }
        return Ok(FilterQuery::tag(tag, true));
    }

    Ok(FilterQuery::tag(term, false))
}

/// Parse a free-text filter expression.
///
/// The text is split on a case-insensitive `" or "` separator; terms that do
/// not parse are dropped. `None` means nothing in the text parses yet, the
/// normal condition for in-progress input.
#[must_use]
pub fn parse_expression(text: &str) -> Option<FilterExpression> {
    let text = text.trim().to_lowercase();

    let queries: Vec<FilterQuery> = OR_SEPARATOR
        .split(&text)
        .map(str::trim)
        .filter_map(|part| parse_term(part).ok())
        .collect();

    FilterExpression::from_queries(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::TagQuery;

    #[test]
    fn test_parse_plain_tag() {
        let expr = parse_expression("foo").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Query(FilterQuery::Tag(TagQuery::new("foo", false)))
        );
    }

    #[test]
    fn test_parse_negated_tag() {
        let expr = parse_expression("-foo").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Query(FilterQuery::Tag(TagQuery::new("foo", true)))
        );
    }

    #[test]
    fn test_parse_namespaced_tag() {
        let expr = parse_expression("creator:somebody").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Query(FilterQuery::tag("creator:somebody", false))
        );
    }

    #[test]
    fn test_parse_or_group() {
        let expr = parse_expression("foo or bar").unwrap();
        assert_eq!(
            expr,
            FilterExpression::OrExpression(vec![
                FilterQuery::tag("foo", false),
                FilterQuery::tag("bar", false),
            ])
        );
    }

    #[test]
    fn test_parse_or_group_case_insensitive() {
        let expr = parse_expression("foo OR bar Or baz").unwrap();
        assert_eq!(expr.queries().len(), 3);
    }

    #[test]
    fn test_or_needs_surrounding_whitespace() {
        // "or" embedded in a word is part of the tag
        let expr = parse_expression("forest").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Query(FilterQuery::tag("forest", false))
        );
    }

    #[test]
    fn test_parse_drops_unparseable_parts() {
        let expr = parse_expression(".bogus = 1 or foo").unwrap();
        assert_eq!(expr, FilterExpression::Query(FilterQuery::tag("foo", false)));
    }

    #[test]
    fn test_parse_nothing_parses() {
        assert_eq!(parse_expression(""), None);
        assert_eq!(parse_expression("   "), None);
        assert_eq!(parse_expression(".bogus = 1"), None);
    }

    #[test]
    fn test_parse_status_property() {
        let expr = parse_expression(".status = imported").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Query(FilterQuery::status(FileStatus::Imported))
        );
    }

    #[test]
    fn test_parse_filesize_property() {
        let expr = parse_expression(".filesize > 10mib").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Query(FilterQuery::file_size(Comparator::Greater(
                10 * 1024 * 1024
            )))
        );
    }

    #[test]
    fn test_parse_filesize_without_spaces() {
        let expr = parse_expression(".filesize>1024").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Query(FilterQuery::file_size(Comparator::Greater(1024)))
        );
    }

    #[test]
    fn test_parse_double_equals() {
        let expr = parse_expression(".tagcount == 5").unwrap();
        assert_eq!(
            expr,
            FilterExpression::Query(FilterQuery::tag_count(Comparator::Equal(5)))
        );
    }

    #[test]
    fn test_parse_time_property_aliases() {
        for alias in ["importedat", "imported-date", "imported_time"] {
            let term = format!(".{alias} < 2024-06-17");
            let expr = parse_expression(&term).unwrap();
            assert!(matches!(
                expr,
                FilterExpression::Query(FilterQuery::Property(PropertyQuery::ImportedTime(
                    Comparator::Less(_)
                )))
            ));
        }
    }

    #[test]
    fn test_parse_cd_and_id() {
        assert_eq!(
            parse_term(".cd = deadbeef"),
            Ok(FilterQuery::content_descriptor("deadbeef"))
        );
        assert_eq!(parse_term(".id = 42"), Ok(FilterQuery::file_id(42)));
        assert_eq!(
            parse_term(".fileid = 42"),
            Ok(FilterQuery::file_id(42))
        );
    }

    #[test]
    fn test_property_failure_does_not_become_tag() {
        let result = parse_term(".nosuchproperty = 1");
        assert!(matches!(result, Err(ParseError::UnknownProperty(_))));
        assert_eq!(parse_expression(".nosuchproperty = 1"), None);
    }

    #[test]
    fn test_unknown_property() {
        assert!(matches!(
            parse_term(".width > 100"),
            Err(ParseError::UnknownProperty(_))
        ));
    }

    #[test]
    fn test_missing_comparator() {
        assert!(matches!(
            parse_term(".filesize"),
            Err(ParseError::MissingComparator(_))
        ));
    }

    #[test]
    fn test_invalid_comparator_run() {
        assert!(matches!(
            parse_term(".filesize >= 100"),
            Err(ParseError::InvalidComparator(_))
        ));
        assert!(matches!(
            parse_term(".filesize <> 100"),
            Err(ParseError::InvalidComparator(_))
        ));
    }

    #[test]
    fn test_missing_value() {
        assert!(matches!(
            parse_term(".filesize > "),
            Err(ParseError::MissingValue(_))
        ));
    }

    #[test]
    fn test_invalid_value() {
        assert!(matches!(
            parse_term(".filesize > potato"),
            Err(ParseError::InvalidValue(_))
        ));
        assert!(matches!(
            parse_term(".tagcount = -1"),
            Err(ParseError::InvalidValue(_))
        ));
        assert!(matches!(
            parse_term(".id = abc"),
            Err(ParseError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_two_value_tokens_rejected() {
        assert!(matches!(
            parse_term(".filesize = 100 200"),
            Err(ParseError::TooManyValues(_))
        ));
        assert!(matches!(
            parse_term(".importedtime = 2024-01-01 2024-06-01"),
            Err(ParseError::TooManyValues(_))
        ));
    }

    #[test]
    fn test_status_only_accepts_equal() {
        assert!(matches!(
            parse_term(".status > imported"),
            Err(ParseError::UnsupportedComparator { property: "status", .. })
        ));
        assert!(parse_term(".status == archived").is_ok());
    }

    #[test]
    fn test_cd_and_id_only_accept_equal() {
        assert!(matches!(
            parse_term(".cd < deadbeef"),
            Err(ParseError::UnsupportedComparator { property: "cd", .. })
        ));
        assert!(matches!(
            parse_term(".id > 3"),
            Err(ParseError::UnsupportedComparator { property: "id", .. })
        ));
    }

    #[test]
    fn test_empty_terms() {
        assert_eq!(parse_term(""), Err(ParseError::EmptyTerm));
        assert_eq!(parse_term("-"), Err(ParseError::EmptyTerm));
    }

    #[test]
    fn test_mixed_or_group_with_property() {
        let expr = parse_expression("foo or .status = deleted").unwrap();
        assert_eq!(
            expr,
            FilterExpression::OrExpression(vec![
                FilterQuery::tag("foo", false),
                FilterQuery::status(FileStatus::Deleted),
            ])
        );
    }
}
