//! Search filter collection
//!
//! This module provides the mutable state behind one active search: an
//! ordered list of filter expressions plus the structural operations the
//! interactive filter dialog needs.
//!
//! # Features
//!
//! - **Build**: Append or insert parsed queries and whole expressions
//! - **Merge**: Fold a lone query into an OR-group (`append_subfilter`)
//! - **Split**: Pull entries back out of a group, by value or by position
//! - **Regroup**: Turn a multi-selection into AND-ed elements or one
//!   OR-group (`split_into_queries`, `group_into_or`)
//! - **Dedupe**: Collapse structurally equal elements and group entries
//!
//! # Examples
//!
//! ```
//! use tagq::filters::SearchFilters;
//! use tagq::query::{parse_expression, FilterQuery};
//!
//! let mut filters = SearchFilters::new();
//! filters.push_expression(parse_expression("foo or bar").unwrap());
//! filters.append_filter(FilterQuery::tag("baz", false));
//!
//! // Merge "qux" into the first element, growing the OR-group
//! filters.append_subfilter(FilterQuery::tag("qux", false), 0).unwrap();
//! assert_eq!(filters.get(0).unwrap().to_string(), "foo OR bar OR qux");
//! ```

pub mod error;
pub mod operations;
pub mod types;

pub use error::FilterError;
pub use types::{SearchFilters, Selectable};
