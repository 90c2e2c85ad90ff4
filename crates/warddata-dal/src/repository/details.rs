use indexmap::IndexSet;
use tracing::{info, instrument, warn};

use warddata_config::ColumnMap;
use warddata_core::{EpisodeId, Result, Row, SqlValue, WardError};
use warddata_query::{Predicate, StatementBuilder};

use super::{WardRepository, keys};
use crate::filters::{episode_column, specialty_predicate};
use crate::records::PatientDetails;
use crate::standardize;

type Standardizer<T> = fn(&ColumnMap<'_>, &Row) -> Option<T>;

/// Distinct non-empty values of the admission-note items of one type,
/// in first-seen order.
fn note_values(columns: &ColumnMap<'_>, rows: &[Row], item_type: Option<&SqlValue>) -> Vec<String> {
    let Some(item_type) = item_type else {
        return Vec::new();
    };
    rows.iter()
        .filter(|row| {
            columns
                .cell(row, "note_item_type")
                .is_some_and(|t| t.same_code(item_type))
        })
        .filter_map(|row| columns.cell(row, "note_item_value")?.as_text())
        .filter(|value| !value.is_empty())
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

impl WardRepository {
    /// The episode with every child collection attached.
    ///
    /// With a specialty scope, an episode outside the specialty is reported
    /// as not found with its own message.
    #[instrument(skip(self))]
    pub async fn patient_details(
        &self,
        episode_id: &str,
        specialty: Option<&str>,
    ) -> Result<PatientDetails> {
        let config = self.config();
        let id: EpisodeId = episode_id.parse()?;
        let scope = specialty_predicate(config, specialty)?;
        let scoped = scope.is_some();

        let statement = StatementBuilder::new(config.query(keys::PATIENT_DETAILS)?)
            .where_predicate(Predicate::eq(
                episode_column(config, "episode_pk")?,
                id.to_sql_value(),
            ))
            .where_opt(scope)
            .build()?;

        let Some(raw) = self
            .executor
            .fetch_one(keys::PATIENT_DETAILS, &statement)
            .await?
        else {
            if scoped {
                warn!(
                    episode_id = %id,
                    specialty = specialty.unwrap_or_default(),
                    "Access attempt for episode outside the selected specialty"
                );
                return Err(WardError::not_found(
                    "Patient not found or does not belong to this specialty.",
                ));
            }
            return Err(WardError::not_found("Patient not found."));
        };

        let columns = config.columns();
        let episode = standardize::episode(&columns, &raw).ok_or_else(|| {
            WardError::configuration("Failed to standardize patient details.")
        })?;

        let history_code = config.parameter("history_item");
        let diagnosis_code = config.parameter("diagnosis_item");
        let note_items = self
            .executor
            .fetch_named(
                keys::NOTE_ITEMS,
                vec![
                    id.to_sql_value(),
                    history_code.clone().unwrap_or(SqlValue::Null),
                    diagnosis_code.clone().unwrap_or(SqlValue::Null),
                ],
            )
            .await?;

        let details = PatientDetails {
            episode,
            history: note_values(&columns, &note_items, history_code.as_ref()),
            diagnoses: note_values(&columns, &note_items, diagnosis_code.as_ref()),
            phones: self.collection(keys::PHONES, &id, standardize::phone).await?,
            observations: self
                .collection(keys::OBSERVATIONS, &id, standardize::observation)
                .await?,
            significant_contacts: self
                .collection(keys::SIGNIFICANT_CONTACTS, &id, standardize::significant_contact)
                .await?,
            symptoms: self.collection(keys::SYMPTOMS, &id, standardize::symptom).await?,
            medications: self
                .collection(keys::MEDICATIONS, &id, standardize::medication)
                .await?,
            interventions: self
                .collection(keys::INTERVENTIONS, &id, standardize::intervention)
                .await?,
            lab_tests: self.collection(keys::LAB_TESTS, &id, standardize::lab_test).await?,
            exams: self.collection(keys::EXAMS, &id, standardize::exam).await?,
            diary: self.collection(keys::DIARY, &id, standardize::diary).await?,
        };

        info!(episode_id = %id, "Fetched patient details");
        Ok(details)
    }

    async fn collection<T>(
        &self,
        key: &str,
        id: &EpisodeId,
        standardize: Standardizer<T>,
    ) -> Result<Vec<T>> {
        let rows = self
            .executor
            .fetch_named(key, vec![id.to_sql_value()])
            .await?;
        let columns = self.config().columns();
        Ok(rows
            .iter()
            .filter_map(|row| standardize(&columns, row))
            .collect())
    }
}
