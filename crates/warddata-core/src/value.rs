//! Dynamic values exchanged with data sources.
//!
//! The same [`SqlValue`] type is used for bound parameters and for the cells
//! of the rows a data source returns, so values read from one query (for
//! example a diary date) can be bound into the next one unchanged.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use time::{Date, PrimitiveDateTime};

/// A result row: column name to value, in the column order of the result set.
pub type Row = IndexMap<String, SqlValue>;

/// SQL value types for parameters and result cells.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Date(Date),
    Timestamp(PrimitiveDateTime),
}

impl SqlValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Textual form of a non-null value.
    ///
    /// Decimals are normalized so that `12345.0` and `12345` read the same.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Boolean(b) => Some(b.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Decimal(d) => Some(d.normalize().to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::Date(d) => Some(d.to_string()),
            Self::Timestamp(ts) => Some(ts.to_string()),
        }
    }

    /// Calendar date of a date or timestamp value.
    #[must_use]
    pub fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Timestamp(ts) => Some(ts.date()),
            _ => None,
        }
    }

    /// Integer view of a value, truncating fractional numbers.
    ///
    /// Text is accepted when it holds a plain integer (surrounding whitespace
    /// allowed); anything else yields `None`.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Decimal(d) => d.trunc().to_i64(),
            Self::Float(f) if f.is_finite() => f.trunc().to_i64(),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Converts a configuration value (e.g. a `parameters.*` code) into a bind value.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }

    /// Converts a caller-supplied code (such as a specialty id held in a
    /// session) into a bind value: integer-looking codes bind as integers so
    /// they compare against numeric foreign keys without an implicit cast.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let trimmed = code.trim();
        match trimmed.parse::<i64>() {
            Ok(i) => Self::Integer(i),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }

    /// Same-value comparison across numeric representations and text.
    #[must_use]
    pub fn same_code(&self, other: &SqlValue) -> bool {
        match (self.as_text(), other.as_text()) {
            (Some(a), Some(b)) => a.trim() == b.trim(),
            _ => false,
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for SqlValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<Date> for SqlValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<PrimitiveDateTime> for SqlValue {
    fn from(value: PrimitiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Column access on result rows.
pub trait RowExt {
    /// Non-null value of `column`.
    ///
    /// Falls back to an ASCII case-insensitive match because engines differ
    /// in how they fold unquoted identifiers (PostgreSQL lower-cases, Oracle
    /// upper-cases).
    fn value(&self, column: &str) -> Option<&SqlValue>;

    /// True when the row has no columns or every column is null.
    fn is_blank(&self) -> bool;
}

impl RowExt for Row {
    fn value(&self, column: &str) -> Option<&SqlValue> {
        let found = self.get(column).or_else(|| {
            self.iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(column))
                .map(|(_, value)| value)
        });
        found.filter(|v| !v.is_null())
    }

    fn is_blank(&self) -> bool {
        self.values().all(SqlValue::is_null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_as_text_normalizes_decimals() {
        let value = SqlValue::Decimal(Decimal::new(123450, 1));
        assert_eq!(value.as_text().as_deref(), Some("12345"));
        assert_eq!(SqlValue::Null.as_text(), None);
        assert_eq!(SqlValue::Integer(7).as_text().as_deref(), Some("7"));
    }

    #[test]
    fn test_as_date() {
        assert_eq!(
            SqlValue::Date(date!(2024 - 03 - 07)).as_date(),
            Some(date!(2024 - 03 - 07))
        );
        assert_eq!(
            SqlValue::Timestamp(datetime!(2024-03-07 10:15)).as_date(),
            Some(date!(2024 - 03 - 07))
        );
        assert_eq!(SqlValue::Text("2024-03-07".into()).as_date(), None);
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(SqlValue::Integer(3661).as_integer(), Some(3661));
        assert_eq!(SqlValue::Text(" 3661 ".into()).as_integer(), Some(3661));
        assert_eq!(SqlValue::Float(3661.9).as_integer(), Some(3661));
        assert_eq!(SqlValue::Decimal(Decimal::new(36615, 1)).as_integer(), Some(3661));
        assert_eq!(SqlValue::Text("bad".into()).as_integer(), None);
        assert_eq!(SqlValue::Float(f64::NAN).as_integer(), None);
    }

    #[test]
    fn test_from_json_and_code() {
        assert_eq!(SqlValue::from_json(&serde_json::json!(5)), SqlValue::Integer(5));
        assert_eq!(
            SqlValue::from_json(&serde_json::json!("DIAG")),
            SqlValue::Text("DIAG".into())
        );
        assert_eq!(SqlValue::from_code("12"), SqlValue::Integer(12));
        assert_eq!(SqlValue::from_code("CARD"), SqlValue::Text("CARD".into()));
    }

    #[test]
    fn test_same_code_across_representations() {
        assert!(SqlValue::Integer(5).same_code(&SqlValue::Decimal(Decimal::new(5, 0))));
        assert!(SqlValue::Text("5".into()).same_code(&SqlValue::Integer(5)));
        assert!(!SqlValue::Null.same_code(&SqlValue::Null));
    }

    #[test]
    fn test_row_value_lookup() {
        let mut row = Row::new();
        row.insert("num_episodio".to_string(), SqlValue::Integer(1));
        row.insert("NOME".to_string(), SqlValue::Null);

        assert_eq!(row.value("NUM_EPISODIO"), Some(&SqlValue::Integer(1)));
        assert_eq!(row.value("NOME"), None);
        assert_eq!(row.value("MISSING"), None);
        assert!(!row.is_blank());

        let mut blank = Row::new();
        blank.insert("A".to_string(), SqlValue::Null);
        assert!(blank.is_blank());
        assert!(Row::new().is_blank());
    }
}
