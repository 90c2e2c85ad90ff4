use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::error::WardError;
use crate::value::SqlValue;

/// Primary key of an admission episode.
///
/// The legacy store keeps episode keys in a numeric column, so any token that
/// parses as a base-10 decimal is an episode id and nothing else is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpisodeId(Decimal);

impl EpisodeId {
    /// Parses a base-10 decimal token (`"12345"`, `" 42 "`, `"1e3"`).
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Decimal::from_str(token)
            .or_else(|_| Decimal::from_scientific(token))
            .ok()
            .map(|d| Self(d.normalize()))
    }

    /// Reads an episode id from a result cell.
    #[must_use]
    pub fn from_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Decimal(d) => Some(Self(d.normalize())),
            SqlValue::Integer(i) => Some(Self(Decimal::from(*i))),
            SqlValue::Text(s) => Self::parse(s),
            _ => None,
        }
    }

    /// True for base-10 literals: optional sign, digits with an optional
    /// fraction, optional exponent. Says nothing about whether the value
    /// fits an episode id.
    #[must_use]
    pub fn is_numeric_literal(token: &str) -> bool {
        let token = token.trim();
        let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
            None => (unsigned, None),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        let mantissa_ok = !(int_part.is_empty() && frac_part.is_empty())
            && all_digits(int_part)
            && all_digits(frac_part);

        let exponent_ok = exponent.is_none_or(|e| {
            let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
            !digits.is_empty() && all_digits(digits)
        });
        mantissa_ok && exponent_ok
    }

    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Bind value for the numeric key column.
    #[must_use]
    pub fn to_sql_value(&self) -> SqlValue {
        SqlValue::Decimal(self.0)
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EpisodeId {
    type Err = WardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| WardError::not_found("Invalid patient ID."))
    }
}

impl From<EpisodeId> for SqlValue {
    fn from(id: EpisodeId) -> Self {
        id.to_sql_value()
    }
}

impl Serialize for EpisodeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
