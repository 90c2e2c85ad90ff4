//! Database engine families and the two dialect axes they select:
//! the positional parameter marker and the pagination syntax.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Marker written in configured templates and composed statements.
///
/// Rewritten to the engine's own marker right before execution.
pub const GENERIC_MARKER: &str = "%s";

/// Family of the backing database engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum DbmsFamily {
    #[default]
    Postgres,
    Oracle,
    SqlServer,
    MySql,
    /// A family this layer has no dialect knowledge of.
    Other(String),
}

impl DbmsFamily {
    /// Marker style the family's driver expects.
    #[must_use]
    pub fn default_marker(&self) -> ParamMarker {
        match self {
            Self::Postgres => ParamMarker::Dollar,
            Self::Oracle => ParamMarker::Colon,
            Self::SqlServer | Self::MySql => ParamMarker::QuestionMark,
            Self::Other(_) => ParamMarker::Generic,
        }
    }

    /// Pagination syntax of the family, `None` when unknown.
    #[must_use]
    pub fn pagination_style(&self) -> Option<PaginationStyle> {
        match self {
            Self::Postgres | Self::MySql => Some(PaginationStyle::LimitOffset),
            Self::Oracle | Self::SqlServer => Some(PaginationStyle::OffsetFetch),
            Self::Other(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Postgres => "postgres",
            Self::Oracle => "oracle",
            Self::SqlServer => "sqlserver",
            Self::MySql => "mysql",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for DbmsFamily {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Self::Postgres,
            "oracle" => Self::Oracle,
            "sqlserver" | "mssql" => Self::SqlServer,
            "mysql" | "mariadb" => Self::MySql,
            _ => Self::Other(value),
        }
    }
}

impl FromStr for DbmsFamily {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for DbmsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positional parameter marker style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ParamMarker {
    /// `%s`, left untouched.
    Generic,
    /// `?`
    QuestionMark,
    /// `$1`, `$2`, ...
    Dollar,
    /// `:1`, `:2`, ...
    Colon,
}

impl ParamMarker {
    /// Marker text for the parameter at 1-based `position`.
    #[must_use]
    pub fn render(self, position: usize) -> String {
        match self {
            Self::Generic => GENERIC_MARKER.to_string(),
            Self::QuestionMark => "?".to_string(),
            Self::Dollar => format!("${position}"),
            Self::Colon => format!(":{position}"),
        }
    }
}

impl TryFrom<String> for ParamMarker {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for ParamMarker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "%s" | "generic" | "format" => Ok(Self::Generic),
            "?" | "qmark" | "question_mark" => Ok(Self::QuestionMark),
            "$n" | "$" | "dollar" => Ok(Self::Dollar),
            ":n" | ":" | "colon" | "numeric" => Ok(Self::Colon),
            other => Err(format!("unknown parameter marker style '{other}'")),
        }
    }
}

/// Vendor pagination syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaginationStyle {
    /// `LIMIT n OFFSET m`, parameters bound as (limit, offset).
    LimitOffset,
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`, parameters bound as (offset, limit).
    OffsetFetch,
}
