//! [`DataSource`] over a PostgreSQL pool.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx_core::column::Column;
use sqlx_core::query::Query;
use sqlx_core::row::Row as _;
use sqlx_core::type_info::TypeInfo;
use sqlx_postgres::{PgArguments, PgPool, PgRow, Postgres};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use tracing::{instrument, trace};

use warddata_core::{Row, SqlValue};
use warddata_db::{DataSource, SourceError};

use crate::config::PostgresConfig;
use crate::error::Result;
use crate::pool::{create_pool, test_connection};

/// Read-only PostgreSQL data source.
#[derive(Debug, Clone)]
pub struct PostgresSource {
    pool: PgPool,
}

impl PostgresSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool and checks that the database answers.
    pub async fn connect(config: &PostgresConfig) -> Result<Self> {
        let pool = create_pool(config).await?;
        test_connection(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn prepare<'q>(sql: &'q str, params: &[SqlValue]) -> Query<'q, Postgres, PgArguments> {
        trace!(bindings = ?params, "SQL bind values");
        let mut query = sqlx_core::query::query::<Postgres>(sql);
        for value in params {
            query = bind_value(query, value);
        }
        query
    }
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        SqlValue::Null => query.bind(Option::<String>::None),
        SqlValue::Boolean(b) => query.bind(*b),
        SqlValue::Integer(i) => query.bind(*i),
        SqlValue::Float(f) => query.bind(*f),
        SqlValue::Decimal(d) => query.bind(*d),
        SqlValue::Text(s) => query.bind(s.clone()),
        SqlValue::Date(d) => query.bind(*d),
        SqlValue::Timestamp(ts) => query.bind(*ts),
    }
}

/// Seconds since midnight, the shape time-of-day columns have in the
/// legacy schema.
fn seconds_of_day(time: Time) -> i64 {
    i64::from(time.hour()) * 3600 + i64::from(time.minute()) * 60 + i64::from(time.second())
}

fn decode_row(row: &PgRow) -> std::result::Result<Row, SourceError> {
    let mut out = Row::with_capacity(row.columns().len());
    for column in row.columns() {
        let idx = column.ordinal();
        let name = column.name();
        let type_name = column.type_info().name();
        let decode_err = |e: sqlx_core::error::Error| SourceError::decode(name, e.to_string());

        let value = match type_name {
            "BOOL" => row
                .try_get::<Option<bool>, _>(idx)
                .map_err(decode_err)?
                .map(SqlValue::Boolean),
            "INT2" => row
                .try_get::<Option<i16>, _>(idx)
                .map_err(decode_err)?
                .map(|v| SqlValue::Integer(i64::from(v))),
            "INT4" => row
                .try_get::<Option<i32>, _>(idx)
                .map_err(decode_err)?
                .map(|v| SqlValue::Integer(i64::from(v))),
            "INT8" => row
                .try_get::<Option<i64>, _>(idx)
                .map_err(decode_err)?
                .map(SqlValue::Integer),
            "FLOAT4" => row
                .try_get::<Option<f32>, _>(idx)
                .map_err(decode_err)?
                .map(|v| SqlValue::Float(f64::from(v))),
            "FLOAT8" => row
                .try_get::<Option<f64>, _>(idx)
                .map_err(decode_err)?
                .map(SqlValue::Float),
            "NUMERIC" => row
                .try_get::<Option<Decimal>, _>(idx)
                .map_err(decode_err)?
                .map(SqlValue::Decimal),
            "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" | "UNKNOWN" => row
                .try_get::<Option<String>, _>(idx)
                .map_err(decode_err)?
                .map(SqlValue::Text),
            "DATE" => row
                .try_get::<Option<Date>, _>(idx)
                .map_err(decode_err)?
                .map(SqlValue::Date),
            "TIMESTAMP" => row
                .try_get::<Option<PrimitiveDateTime>, _>(idx)
                .map_err(decode_err)?
                .map(SqlValue::Timestamp),
            "TIMESTAMPTZ" => row
                .try_get::<Option<OffsetDateTime>, _>(idx)
                .map_err(decode_err)?
                .map(|ts| {
                    let utc = ts.to_offset(time::UtcOffset::UTC);
                    SqlValue::Timestamp(PrimitiveDateTime::new(utc.date(), utc.time()))
                }),
            "TIME" => row
                .try_get::<Option<Time>, _>(idx)
                .map_err(decode_err)?
                .map(|t| SqlValue::Integer(seconds_of_day(t))),
            other => {
                return Err(SourceError::UnsupportedType {
                    column: name.to_string(),
                    type_name: other.to_string(),
                });
            }
        };

        out.insert(name.to_string(), value.unwrap_or(SqlValue::Null));
    }
    Ok(out)
}

#[async_trait]
impl DataSource for PostgresSource {
    fn name(&self) -> &str {
        "postgres"
    }

    #[instrument(skip(self, params), fields(bind_count = params.len()))]
    async fn query(&self, sql: &str, params: &[SqlValue]) -> std::result::Result<Vec<Row>, SourceError> {
        let rows = Self::prepare(sql, params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SourceError::query(e.to_string()))?;
        trace!(row_count = rows.len(), "SQL returned rows");
        rows.iter().map(decode_row).collect()
    }

    #[instrument(skip(self, params), fields(bind_count = params.len()))]
    async fn query_one(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> std::result::Result<Option<Row>, SourceError> {
        let row = Self::prepare(sql, params)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SourceError::query(e.to_string()))?;
        row.as_ref().map(decode_row).transpose()
    }
}
