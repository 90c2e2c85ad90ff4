//! # warddata-core
//!
//! Shared vocabulary of the WardData access layer: the error taxonomy,
//! dynamic row values returned by every data source, episode identifiers,
//! DBMS family descriptors and the date/time formatting used when raw rows
//! are standardized.

pub mod dbms;
pub mod error;
pub mod format;
pub mod id;
pub mod value;

pub use dbms::{DbmsFamily, GENERIC_MARKER, PaginationStyle, ParamMarker};
pub use error::{BoxError, ErrorCategory, Result, WardError};
pub use format::{format_date, format_time};
pub use id::EpisodeId;
pub use value::{Row, RowExt, SqlValue};
