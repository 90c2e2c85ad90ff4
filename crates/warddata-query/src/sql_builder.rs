//! Statement builder for configured ward queries.
//!
//! A statement is composed once from:
//!
//! - a [`QueryTemplate`] (`SELECT ... FROM ...`, optional fixed filter and
//!   default ordering),
//! - an ordered list of [`Predicate`]s ANDed after the fixed filter,
//! - an optional ordering that replaces the template's default,
//! - an optional [`Pagination`] rendered in the engine's syntax.
//!
//! Every bound value is written as the generic `%s` marker and pushed to
//! the parameter list in the order the marker appears in the text.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use warddata_config::{QueryTemplate, is_identifier};
use warddata_core::{DbmsFamily, GENERIC_MARKER, PaginationStyle, SqlValue, WardError};

/// Upper bound on dynamic predicates in one statement.
pub const MAX_PREDICATES: usize = 16;

/// Errors that can occur during SQL building.
#[derive(Debug, Error)]
pub enum SqlBuilderError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("Pagination not implemented for database family '{0}'")]
    UnsupportedDialect(String),

    #[error("Query too complex: {0}")]
    QueryTooComplex(String),
}

impl From<SqlBuilderError> for WardError {
    fn from(err: SqlBuilderError) -> Self {
        match err {
            // Identifiers only ever come from the column mapping.
            SqlBuilderError::InvalidIdentifier(name) => {
                WardError::configuration(format!("Invalid column identifier: {name}"))
            }
            SqlBuilderError::UnsupportedDialect(family) => WardError::unsupported_database(family),
            SqlBuilderError::InvalidPagination(msg) | SqlBuilderError::QueryTooComplex(msg) => {
                WardError::invalid_request(msg)
            }
        }
    }
}

/// Validate a column identifier (`COL` or `alias.COL`).
pub fn validate_identifier(name: &str) -> Result<(), SqlBuilderError> {
    if name.is_empty() {
        return Err(SqlBuilderError::InvalidIdentifier(
            "Empty identifier".to_string(),
        ));
    }
    if !is_identifier(name) {
        return Err(SqlBuilderError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

/// A validated, table-qualified column reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column(String);

impl Column {
    /// Qualifies `name` with `alias` unless it is already qualified.
    pub fn new(alias: &str, name: &str) -> Result<Self, SqlBuilderError> {
        validate_identifier(name)?;
        if name.contains('.') || alias.is_empty() {
            return Ok(Self(name.to_string()));
        }
        validate_identifier(alias)?;
        Ok(Self(format!("{alias}.{name}")))
    }

    pub fn as_sql(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dynamic predicate.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// `column = %s`
    Eq { column: Column, value: SqlValue },
    /// `UPPER(column) LIKE %s` with the term upper-cased and wrapped in `%`.
    UpperLike { column: Column, term: String },
}

impl Predicate {
    pub fn eq(column: Column, value: impl Into<SqlValue>) -> Self {
        Self::Eq {
            column,
            value: value.into(),
        }
    }

    /// Case-insensitive substring match on `column`.
    pub fn contains_ignore_case(column: Column, term: &str) -> Self {
        Self::UpperLike {
            column,
            term: term.to_string(),
        }
    }

    fn render(&self, params: &mut Vec<SqlValue>) -> String {
        match self {
            Self::Eq { column, value } => {
                params.push(value.clone());
                format!("{column} = {GENERIC_MARKER}")
            }
            Self::UpperLike { column, term } => {
                params.push(SqlValue::Text(format!("%{}%", term.to_uppercase())));
                format!("UPPER({column}) LIKE {GENERIC_MARKER}")
            }
        }
    }
}

/// Sort order for query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("Unknown sort direction '{other}'")),
        }
    }
}

/// Sort specification.
#[derive(Debug, Clone)]
pub struct SortSpec {
    pub column: Column,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(column: Column, order: SortOrder) -> Self {
        Self { column, order }
    }
}

/// Page window of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u64,
}

impl Pagination {
    /// Window of 1-based `page` with `limit` rows per page.
    pub fn from_page(page: u32, limit: u32) -> Result<Self, SqlBuilderError> {
        if page == 0 {
            return Err(SqlBuilderError::InvalidPagination(
                "page must be >= 1".to_string(),
            ));
        }
        if limit == 0 {
            return Err(SqlBuilderError::InvalidPagination(
                "limit must be > 0".to_string(),
            ));
        }
        Ok(Self {
            limit,
            offset: u64::from(page - 1) * u64::from(limit),
        })
    }

    fn render(&self, style: PaginationStyle, params: &mut Vec<SqlValue>) -> String {
        let limit = SqlValue::Integer(i64::from(self.limit));
        let offset = SqlValue::Integer(i64::try_from(self.offset).unwrap_or(i64::MAX));
        match style {
            PaginationStyle::LimitOffset => {
                params.push(limit);
                params.push(offset);
                format!("LIMIT {GENERIC_MARKER} OFFSET {GENERIC_MARKER}")
            }
            PaginationStyle::OffsetFetch => {
                params.push(offset);
                params.push(limit);
                format!("OFFSET {GENERIC_MARKER} ROWS FETCH NEXT {GENERIC_MARKER} ROWS ONLY")
            }
        }
    }
}

/// A built SQL statement with its ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    /// A statement used verbatim, e.g. a fixed configured template.
    pub fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql)
    }
}

/// Builder composing a statement from a template.
///
/// # Example
///
/// ```ignore
/// let statement = StatementBuilder::new(config.query("patient_list")?)
///     .where_predicate(Predicate::eq(Column::new("i", "COD_SERV")?, 12))
///     .sort_by(SortSpec::new(Column::new("i", "DATA_ENTRADA")?, SortOrder::Desc))
///     .paginate(Pagination::from_page(1, 10)?, config.family().clone())
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    template: QueryTemplate,
    predicates: Vec<Predicate>,
    sort: Vec<SortSpec>,
    pagination: Option<(Pagination, DbmsFamily)>,
}

impl StatementBuilder {
    pub fn new(template: QueryTemplate) -> Self {
        Self {
            template,
            predicates: Vec::new(),
            sort: Vec::new(),
            pagination: None,
        }
    }

    /// Add a predicate (AND semantics, kept in insertion order).
    pub fn where_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Add a predicate when one is given.
    pub fn where_opt(self, predicate: Option<Predicate>) -> Self {
        match predicate {
            Some(predicate) => self.where_predicate(predicate),
            None => self,
        }
    }

    /// Add a sort specification; replaces the template's default ordering.
    pub fn sort_by(mut self, spec: SortSpec) -> Self {
        self.sort.push(spec);
        self
    }

    /// Set pagination in the syntax of `family`.
    pub fn paginate(mut self, pagination: Pagination, family: DbmsFamily) -> Self {
        self.pagination = Some((pagination, family));
        self
    }

    fn validate(&self) -> Result<(), SqlBuilderError> {
        if self.predicates.len() > MAX_PREDICATES {
            return Err(SqlBuilderError::QueryTooComplex(format!(
                "Too many predicates: {} (max {})",
                self.predicates.len(),
                MAX_PREDICATES
            )));
        }
        Ok(())
    }

    fn build_where_clause(
        &self,
        template: &QueryTemplate,
        params: &mut Vec<SqlValue>,
    ) -> Option<String> {
        let mut parts: Vec<String> = Vec::with_capacity(self.predicates.len() + 1);
        if let Some(filter) = &template.filter {
            if self.predicates.is_empty() {
                parts.push(filter.clone());
            } else {
                parts.push(format!("({filter})"));
            }
        }
        parts.extend(self.predicates.iter().map(|p| p.render(params)));

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" AND "))
        }
    }

    fn build_order_clause(&self) -> Option<String> {
        if self.sort.is_empty() {
            return self.template.order_by.clone();
        }
        Some(
            self.sort
                .iter()
                .map(|s| format!("{} {}", s.column, s.order.as_sql()))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Build the SQL statement and parameters.
    pub fn build(&self) -> Result<Statement, SqlBuilderError> {
        self.validate()?;

        let mut params = Vec::new();
        let mut sql = self.template.sql.clone();

        if let Some(where_sql) = self.build_where_clause(&self.template, &mut params) {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if let Some(order_sql) = self.build_order_clause() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order_sql);
        }

        if let Some((pagination, family)) = &self.pagination {
            let style = family
                .pagination_style()
                .ok_or_else(|| SqlBuilderError::UnsupportedDialect(family.to_string()))?;
            sql.push(' ');
            sql.push_str(&pagination.render(style, &mut params));
        }

        debug!(sql = %sql, params = params.len(), "Built statement");
        Ok(Statement { sql, params })
    }

    /// Build the count variant over `count_template` with the same predicates.
    ///
    /// Ordering and pagination are not applied.
    pub fn build_count(&self, count_template: &QueryTemplate) -> Result<Statement, SqlBuilderError> {
        self.validate()?;

        let mut params = Vec::new();
        let mut sql = count_template.sql.clone();

        if let Some(where_sql) = self.build_where_clause(count_template, &mut params) {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        debug!(sql = %sql, params = params.len(), "Built count statement");
        Ok(Statement { sql, params })
    }
}
