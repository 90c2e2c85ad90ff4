use std::sync::Arc;

use tracing::{debug, error, instrument};

use warddata_config::HospitalConfig;
use warddata_core::{Result, Row, SqlValue, WardError};
use warddata_query::{Statement, rewrite_markers};

use crate::source::DataSource;

/// Runs statements against the configured data source.
///
/// Markers are rewritten to the engine's style here and nowhere else, once
/// per statement. Failures are logged and surfaced as
/// [`WardError::DataAccess`]; nothing is retried.
#[derive(Clone)]
pub struct QueryExecutor {
    source: Arc<dyn DataSource>,
    config: Arc<HospitalConfig>,
}

impl std::fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExecutor")
            .field("source", &self.source.name())
            .field("family", self.config.family())
            .finish()
    }
}

impl QueryExecutor {
    pub fn new(source: Arc<dyn DataSource>, config: Arc<HospitalConfig>) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &HospitalConfig {
        &self.config
    }

    /// Runs the template stored at `queries.<key>` as written.
    pub async fn fetch_named(&self, key: &str, params: Vec<SqlValue>) -> Result<Vec<Row>> {
        let statement = self.named_statement(key, params)?;
        self.fetch(key, &statement).await
    }

    /// Runs the template stored at `queries.<key>` and keeps the first row.
    pub async fn fetch_named_one(&self, key: &str, params: Vec<SqlValue>) -> Result<Option<Row>> {
        let statement = self.named_statement(key, params)?;
        self.fetch_one(key, &statement).await
    }

    /// Runs a composed statement; `key` names the template it was built from.
    #[instrument(skip(self, statement), fields(query = %key, params = statement.params.len()))]
    pub async fn fetch(&self, key: &str, statement: &Statement) -> Result<Vec<Row>> {
        let sql = self.prepare(key, statement)?;
        let rows = self
            .source
            .query(&sql, &statement.params)
            .await
            .map_err(|e| {
                error!(query = %key, sql = %sql, error = %e, "Error executing query");
                WardError::data_access(key, e)
            })?;
        debug!(rows = rows.len(), "Query returned");
        Ok(rows)
    }

    /// Runs a composed statement and keeps the first row.
    #[instrument(skip(self, statement), fields(query = %key, params = statement.params.len()))]
    pub async fn fetch_one(&self, key: &str, statement: &Statement) -> Result<Option<Row>> {
        let sql = self.prepare(key, statement)?;
        self.source
            .query_one(&sql, &statement.params)
            .await
            .map_err(|e| {
                error!(query = %key, sql = %sql, error = %e, "Error executing query");
                WardError::data_access(key, e)
            })
    }

    fn named_statement(&self, key: &str, params: Vec<SqlValue>) -> Result<Statement> {
        let template = self.config.query(key)?;
        Ok(Statement::new(template.to_sql(), params))
    }

    fn prepare(&self, key: &str, statement: &Statement) -> Result<String> {
        if statement.sql.trim().is_empty() {
            return Err(WardError::configuration(format!(
                "Query not configured or empty for key: {key}"
            )));
        }
        let sql = rewrite_markers(&statement.sql, self.config.marker());
        debug!(sql = %sql, "Executing");
        Ok(sql)
    }
}
