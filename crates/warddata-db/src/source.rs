use async_trait::async_trait;
use thiserror::Error;

use warddata_core::{Row, SqlValue};

/// Driver-level failure reported by a [`DataSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Unsupported type '{type_name}' in column '{column}'")]
    UnsupportedType { column: String, type_name: String },

    #[error("Failed to decode column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl SourceError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }
}

/// A read-only connection to the hospital database.
///
/// Statements arrive with engine-specific markers already in place and the
/// parameters in marker order. Rows come back keyed by column name in
/// result-set column order. Implementations must be thread-safe.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short backend name for diagnostics.
    fn name(&self) -> &str;

    /// Runs `sql` and returns every row.
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, SourceError>;

    /// Runs `sql` and returns the first row, if any.
    async fn query_one(&self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>, SourceError> {
        Ok(self.query(sql, params).await?.into_iter().next())
    }
}
