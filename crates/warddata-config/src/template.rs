//! Named SQL templates.

use serde::Deserialize;

/// A configured query template.
///
/// Written either as a plain string or as a table that keeps the fixed
/// filter and the ordering apart from the `SELECT ... FROM ...` part, so
/// builders can add predicates without editing SQL text:
///
/// ```toml
/// [hospital.queries]
/// specialties = "SELECT COD, DES FROM especialidades ORDER BY DES"
///
/// [hospital.queries.recent_patients]
/// sql = "SELECT ... FROM internados i JOIN doentes d ON d.ID = i.DOENTE"
/// filter = "i.DATA_ALTA IS NULL"
/// order_by = "i.DATA_ENTRADA DESC, i.HORA_ENTRADA DESC"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTemplate")]
pub struct QueryTemplate {
    /// `SELECT ... FROM ...` part; for plain templates, the whole statement.
    pub sql: String,
    /// Fixed predicate without parameters, ANDed before any dynamic predicate.
    pub filter: Option<String>,
    /// `ORDER BY` body without the keyword.
    pub order_by: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTemplate {
    Plain(String),
    Structured {
        sql: String,
        #[serde(default)]
        filter: Option<String>,
        #[serde(default)]
        order_by: Option<String>,
    },
}

impl From<RawTemplate> for QueryTemplate {
    fn from(raw: RawTemplate) -> Self {
        match raw {
            RawTemplate::Plain(sql) => Self::plain(sql),
            RawTemplate::Structured {
                sql,
                filter,
                order_by,
            } => Self {
                sql: sql.trim().to_string(),
                filter: non_blank(filter),
                order_by: non_blank(order_by),
            },
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl QueryTemplate {
    /// Template holding a complete statement.
    pub fn plain(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into().trim().to_string(),
            filter: None,
            order_by: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// The complete statement text: base, fixed filter and ordering.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = self.sql.clone();
        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }
        if let Some(order_by) = &self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        sql
    }
}
