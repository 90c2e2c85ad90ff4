//! Predicates shared by the listing and lookup builders.

use warddata_config::HospitalConfig;
use warddata_core::{EpisodeId, Result, SqlValue, WardError};
use warddata_query::{Column, Predicate};

/// Column of the episode table mapped from `columns.<field>`.
pub(crate) fn episode_column(config: &HospitalConfig, field: &str) -> Result<Column> {
    let name = config.columns().require(field)?;
    Ok(Column::new(config.episode_alias(), name)?)
}

/// Column of the patient table mapped from `columns.<field>`.
pub(crate) fn patient_column(config: &HospitalConfig, field: &str) -> Result<Column> {
    let name = config.columns().require(field)?;
    Ok(Column::new(config.patient_alias(), name)?)
}

/// Exact match on the specialty foreign key, when a scope is given.
pub fn specialty_predicate(
    config: &HospitalConfig,
    specialty: Option<&str>,
) -> Result<Option<Predicate>> {
    let Some(code) = specialty.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let column = episode_column(config, "specialty_fk")?;
    Ok(Some(Predicate::eq(column, SqlValue::from_code(code))))
}

/// Free-text filter of the patient listing.
///
/// A token that reads as a base-10 number always filters by episode id and
/// anything else always filters by name substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    EpisodeId(EpisodeId),
    /// A numeric token outside the range of an episode id.
    OutOfRangeId(String),
    Name(String),
}

impl SearchFilter {
    /// `None` for a blank term.
    pub fn parse(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        Some(match EpisodeId::parse(term) {
            Some(id) => Self::EpisodeId(id),
            None if EpisodeId::is_numeric_literal(term) => Self::OutOfRangeId(term.to_string()),
            None => Self::Name(term.to_string()),
        })
    }

    /// # Errors
    ///
    /// An out-of-range id is `InvalidRequest`; it never falls back to a
    /// name match.
    pub fn predicate(&self, config: &HospitalConfig) -> Result<Predicate> {
        match self {
            Self::OutOfRangeId(token) => Err(WardError::invalid_request(format!(
                "Episode id '{token}' is out of range."
            ))),
            Self::EpisodeId(id) => Ok(Predicate::eq(
                episode_column(config, "episode_pk")?,
                id.to_sql_value(),
            )),
            Self::Name(name) => Ok(Predicate::contains_ignore_case(
                patient_column(config, "patient_name")?,
                name,
            )),
        }
    }
}
