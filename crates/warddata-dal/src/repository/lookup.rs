use tracing::{info, instrument};

use warddata_core::{EpisodeId, Result, WardError};
use warddata_query::{Predicate, StatementBuilder};

use super::{WardRepository, keys};
use crate::filters::{patient_column, specialty_predicate};
use crate::records::PatientDetails;

impl WardRepository {
    /// Id of the most recently admitted episode whose patient name contains
    /// `name`, ignoring case.
    #[instrument(skip(self))]
    pub async fn find_episode_id_by_name(
        &self,
        name: &str,
        specialty: Option<&str>,
    ) -> Result<Option<EpisodeId>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WardError::invalid_request("Name fragment is empty."));
        }

        let config = self.config();
        let statement = StatementBuilder::new(config.query(keys::EPISODE_BY_NAME)?)
            .where_opt(specialty_predicate(config, specialty)?)
            .where_predicate(Predicate::contains_ignore_case(
                patient_column(config, "patient_name")?,
                name,
            ))
            .build()?;

        let row = self
            .executor
            .fetch_one(keys::EPISODE_BY_NAME, &statement)
            .await?;
        let columns = config.columns();
        Ok(row.and_then(|r| {
            columns
                .cell(&r, "episode_pk")
                .and_then(EpisodeId::from_value)
        }))
    }

    /// Patient details for a search term.
    ///
    /// A numeric term is an episode id, even when it cannot be one; anything
    /// else is looked up by name first.
    #[instrument(skip(self))]
    pub async fn search_patient(
        &self,
        term: &str,
        specialty: Option<&str>,
    ) -> Result<PatientDetails> {
        let term = term.trim();
        if term.is_empty() {
            return Err(WardError::invalid_request("Search term not provided."));
        }

        let episode_id = if EpisodeId::is_numeric_literal(term) {
            info!(specialty = specialty.unwrap_or("all"), "Searching patient by id");
            term.to_string()
        } else {
            info!(specialty = specialty.unwrap_or("all"), "Searching patient by name");
            self.find_episode_id_by_name(term, specialty)
                .await?
                .ok_or_else(|| WardError::not_found("Patient not found for the given search term."))?
                .to_string()
        };

        self.patient_details(&episode_id, specialty).await
    }
}
