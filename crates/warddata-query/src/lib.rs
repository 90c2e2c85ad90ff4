//! SQL composition for the ward query layer.
//!
//! Statements are assembled from a configured [`QueryTemplate`] plus an
//! ordered list of typed predicates, an optional ordering and a pagination
//! fragment. Placeholders are always written as the generic `%s` marker;
//! [`rewrite_markers`] turns them into the engine's own marker right before
//! execution.
//!
//! [`QueryTemplate`]: warddata_config::QueryTemplate

pub mod markers;
pub mod sql_builder;

pub use markers::{count_markers, rewrite_markers};
pub use sql_builder::{
    Column, MAX_PREDICATES, Pagination, Predicate, SortOrder, SortSpec, SqlBuilderError,
    Statement, StatementBuilder, validate_identifier,
};
