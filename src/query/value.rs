//! Pure text-to-value parsers for filter terms
//!
//! Every parser returns `Option`: a failed parse means "not yet a valid
//! value", which is the normal operating condition while the user is still
//! typing. Nothing here panics on malformed input.

use super::types::{FileStatus, TIMESTAMP_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};

/// Byte-size unit suffixes, most specific first so that `KiB` wins over a
/// shorter decimal match. Binary units are 1024^n, decimal units 1000^n.
const BYTE_UNITS: [(&str, u64); 8] = [
    ("TIB", 1_099_511_627_776),
    ("GIB", 1_073_741_824),
    ("MIB", 1_048_576),
    ("KIB", 1_024),
    ("TB", 1_000_000_000_000),
    ("GB", 1_000_000_000),
    ("MB", 1_000_000),
    ("KB", 1_000),
];

/// Parse a numeric literal
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let number = text.trim().parse::<f64>().ok()?;
    number.is_finite().then_some(number)
}

/// Parse a byte size like `10MiB`, `1.5GB`, or `2048`.
///
/// A bare number is taken as bytes. The numeric part may be fractional;
/// the result is truncated to whole bytes.
#[must_use]
pub fn parse_byte_size(text: &str) -> Option<u64> {
    let text = text.trim();

    for (unit, multiplier) in BYTE_UNITS {
        let Some(boundary) = text.len().checked_sub(unit.len()) else {
            continue;
        };
        // get() rather than indexing: the boundary may fall inside a
        // multi-byte character for non-ASCII input
        let Some(suffix) = text.get(boundary..) else {
            continue;
        };
        if suffix.eq_ignore_ascii_case(unit) {
            let number = parse_number(&text[..boundary])?;
            if number < 0.0 {
                return None;
            }
            return Some((number * multiplier as f64) as u64);
        }
    }

    let number = parse_number(text)?;
    if number < 0.0 {
        return None;
    }
    Some(number as u64)
}

/// Parse a timestamp in one of the two fixed formats `YYYY-MM-DDTHH:MM:SS`
/// or `YYYY-MM-DD` (midnight). Matches the renderer, so displayed dates
/// parse back to the same value.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim().to_uppercase();

    if let Ok(datetime) = NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT) {
        return Some(datetime);
    }

    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse a file status name, case-insensitively
#[must_use]
pub fn parse_status(text: &str) -> Option<FileStatus> {
    FileStatus::try_from(text.trim()).ok()
}
