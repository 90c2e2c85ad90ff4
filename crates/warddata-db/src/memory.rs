//! Scripted in-memory data source.

use async_trait::async_trait;
use tokio::sync::RwLock;

use warddata_core::{Row, SqlValue};

use crate::source::{DataSource, SourceError};

/// Builds a row from `(column, value)` pairs, keeping their order.
pub fn row<I, K, V>(cells: I) -> Row
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<SqlValue>,
{
    cells
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A statement received by [`MemorySource`], after marker rewriting.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

#[derive(Debug, Clone)]
enum Outcome {
    Rows(Vec<Row>),
    Fail(String),
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    params: Option<Vec<SqlValue>>,
    outcome: Outcome,
}

impl Rule {
    fn matches(&self, sql: &str, params: &[SqlValue]) -> bool {
        sql.contains(&self.pattern) && self.params.as_deref().is_none_or(|p| p == params)
    }
}

/// Answers statements by substring rules over the final SQL text.
///
/// Rules are tried in registration order; a statement no rule matches
/// returns no rows. Every statement is recorded.
#[derive(Debug, Default)]
pub struct MemorySource {
    rules: Vec<Rule>,
    calls: RwLock<Vec<RecordedCall>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer statements containing `pattern` with `rows`.
    pub fn on(mut self, pattern: impl Into<String>, rows: Vec<Row>) -> Self {
        self.rules.push(Rule {
            pattern: pattern.into(),
            params: None,
            outcome: Outcome::Rows(rows),
        });
        self
    }

    /// Answer statements containing `pattern` and bound to exactly `params`.
    pub fn on_params(
        mut self,
        pattern: impl Into<String>,
        params: Vec<SqlValue>,
        rows: Vec<Row>,
    ) -> Self {
        self.rules.push(Rule {
            pattern: pattern.into(),
            params: Some(params),
            outcome: Outcome::Rows(rows),
        });
        self
    }

    /// Fail statements containing `pattern`.
    pub fn fail_on(mut self, pattern: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules.push(Rule {
            pattern: pattern.into(),
            params: None,
            outcome: Outcome::Fail(message.into()),
        });
        self
    }

    /// Fail statements containing `pattern` and bound to exactly `params`.
    pub fn fail_on_params(
        mut self,
        pattern: impl Into<String>,
        params: Vec<SqlValue>,
        message: impl Into<String>,
    ) -> Self {
        self.rules.push(Rule {
            pattern: pattern.into(),
            params: Some(params),
            outcome: Outcome::Fail(message.into()),
        });
        self
    }

    /// Every statement received so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Statements whose SQL contains `pattern`.
    pub async fn calls_matching(&self, pattern: &str) -> Vec<RecordedCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.sql.contains(pattern))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DataSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, SourceError> {
        self.calls.write().await.push(RecordedCall {
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        match self.rules.iter().find(|r| r.matches(sql, params)) {
            Some(Rule {
                outcome: Outcome::Rows(rows),
                ..
            }) => Ok(rows.clone()),
            Some(Rule {
                outcome: Outcome::Fail(message),
                ..
            }) => Err(SourceError::query(message.clone())),
            None => Ok(Vec::new()),
        }
    }
}
