//! Sort resolution for the patient listing.

use std::fmt;
use std::str::FromStr;

use tracing::debug;
use warddata_config::HospitalConfig;
use warddata_core::{Result, WardError};
use warddata_query::{Column, SortOrder, SortSpec};

/// Sort-key table of the patient listing.
pub const PATIENT_LIST: &str = "patient_list";

/// Entry of the sort table that breaks ties on admission date.
const ADMISSION_TIME: &str = "admission_time";

/// Logical sort keys the listing accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    AdmissionDate,
    Name,
    Room,
    Bed,
    EpisodeId,
    Specialty,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        Self::AdmissionDate,
        Self::Name,
        Self::Room,
        Self::Bed,
        Self::EpisodeId,
        Self::Specialty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdmissionDate => "admission_date",
            Self::Name => "name",
            Self::Room => "room",
            Self::Bed => "bed",
            Self::EpisodeId => "episode_id",
            Self::Specialty => "specialty",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = WardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| WardError::invalid_request(format!("Unknown sort key '{key}'")))
    }
}

/// Resolves `key` through `sorting.patient_list` into ORDER BY items.
///
/// Sorting by admission date appends the admission time in the same
/// direction when the table maps `admission_time`.
pub fn resolve(config: &HospitalConfig, key: SortKey, order: SortOrder) -> Result<Vec<SortSpec>> {
    let table = config.sort_columns(PATIENT_LIST).ok_or_else(|| {
        WardError::configuration(format!("Sort table not configured: sorting.{PATIENT_LIST}"))
    })?;

    let column = table
        .get(key.as_str())
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            WardError::invalid_request(format!(
                "Sort key '{key}' is not configured in sorting.{PATIENT_LIST}"
            ))
        })?;

    let alias = match key {
        SortKey::Name => config.patient_alias(),
        _ => config.episode_alias(),
    };

    let mut specs = vec![SortSpec::new(Column::new(alias, column)?, order)];

    if key == SortKey::AdmissionDate
        && let Some(time_column) = table.get(ADMISSION_TIME).and_then(|v| v.as_str())
    {
        specs.push(SortSpec::new(
            Column::new(config.episode_alias(), time_column)?,
            order,
        ));
    }

    debug!(key = %key, order = order.as_sql(), items = specs.len(), "Resolved sort");
    Ok(specs)
}
