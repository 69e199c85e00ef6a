//! Filter query language: AST types, value parsers, and the term parser
//!
//! This module turns free-text search input into the typed query tree
//! consumed by the rest of the crate:
//!
//! - **Tag terms**: `foo`, `-foo`, `creator:somebody`
//! - **Property terms**: `.filesize > 10MiB`, `.status = imported`,
//!   `.importedtime < 2024-06-17`
//! - **OR-groups**: `foo or bar or .tagcount = 0`
//!
//! # Examples
//!
//! ```
//! use tagq::query::{parse_expression, Comparator, FilterExpression, FilterQuery};
//!
//! let expr = parse_expression("foo or -bar").unwrap();
//! assert_eq!(expr.queries().len(), 2);
//! assert_eq!(expr.to_string(), "foo OR -bar");
//!
//! // Builders cover what free text cannot express
//! let ranged = FilterQuery::file_size(Comparator::Between(1024, 4096));
//! let expr = FilterExpression::Query(ranged);
//! ```

pub mod parser;
pub mod types;
pub mod value;

pub use parser::{ParseError, parse_expression, parse_term};
pub use types::{
    Comparator, FileStatus, FilterExpression, FilterQuery, PropertyQuery, TIMESTAMP_FORMAT,
    TagQuery,
};
pub use value::{parse_byte_size, parse_date, parse_number, parse_status};
