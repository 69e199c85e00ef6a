//! Search boundary: records, sort keys, and the backend seam
//!
//! The filter core hands a list of [`FilterExpression`]s and [`SortKey`]s to
//! a [`SearchBackend`] and gets [`FileRecord`]s back. The backend is a
//! collaborator seam: storage engines live behind it. [`MemoryBackend`]
//! implements it over an owned record list for tests and scripting.
//!
//! [`FilterExpression`]: crate::query::FilterExpression

pub mod error;
pub mod memory;
pub mod record;
pub mod traits;

pub use error::SearchError;
pub use memory::MemoryBackend;
pub use record::{FileRecord, SortField, SortKey};
pub use traits::{FilterMatch, RecordFilterExt, SearchBackend};
