use tracing::{debug, info, instrument, warn};

use warddata_core::{EpisodeId, Result, Row, RowExt, SqlValue, WardError};
use warddata_query::{Pagination, StatementBuilder};

use super::{ListRequest, WardRepository, keys};
use crate::filters::{SearchFilter, specialty_predicate};
use crate::records::{Episode, PatientPage, Specialty};
use crate::sorting::{self, SortKey};
use crate::standardize;

/// Rows in the recent-admissions feed unless `parameters.recent_limit` says otherwise.
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

/// Column the count template is expected to alias its result to.
const COUNT_COLUMN: &str = "TOTAL";

/// Reads the filtered total from a count row.
///
/// Uses the `TOTAL` column when present, otherwise the first column.
fn read_count(row: Option<&Row>) -> u64 {
    let Some(row) = row else {
        return 0;
    };
    row.value(COUNT_COLUMN)
        .or_else(|| row.values().next())
        .and_then(SqlValue::as_integer)
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(0)
}

/// Row bound of the recent feed; non-positive or non-numeric values fall
/// back to the default.
fn recent_limit(configured: Option<SqlValue>) -> u32 {
    configured
        .as_ref()
        .and_then(SqlValue::as_integer)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_RECENT_LIMIT)
}

impl WardRepository {
    /// Every specialty with admitted patients.
    #[instrument(skip(self))]
    pub async fn specialties(&self) -> Result<Vec<Specialty>> {
        let rows = self
            .executor
            .fetch_named(keys::SPECIALTIES, Vec::new())
            .await?;
        let columns = self.config().columns();
        let specialties: Vec<Specialty> = rows
            .iter()
            .filter_map(|row| standardize::specialty(&columns, row))
            .collect();
        info!(count = specialties.len(), "Fetched specialties");
        Ok(specialties)
    }

    /// Ids of every admitted episode.
    ///
    /// Rows without a numeric key are skipped.
    #[instrument(skip(self))]
    pub async fn episode_ids(&self) -> Result<Vec<EpisodeId>> {
        let columns = self.config().columns();
        let pk = columns.require("episode_pk")?;
        let rows = self
            .executor
            .fetch_named(keys::EPISODE_IDS, Vec::new())
            .await?;

        let total = rows.len();
        let ids: Vec<EpisodeId> = rows
            .iter()
            .filter_map(|row| row.value(pk).and_then(EpisodeId::from_value))
            .collect();
        if ids.len() < total {
            warn!(
                skipped = total - ids.len(),
                column = pk,
                "Rows without a numeric episode id were skipped"
            );
        }
        info!(count = ids.len(), "Fetched episode ids");
        Ok(ids)
    }

    /// Most recent admissions, optionally scoped to a specialty.
    ///
    /// The feed is bounded to the first `parameters.recent_limit` rows in the
    /// family's pagination syntax. A family without one runs the template
    /// unbounded.
    #[instrument(skip(self))]
    pub async fn recent_patients(&self, specialty: Option<&str>) -> Result<Vec<Episode>> {
        let config = self.config();
        let limit = recent_limit(config.parameter("recent_limit"));

        let mut builder = StatementBuilder::new(config.query(keys::RECENT_PATIENTS)?)
            .where_opt(specialty_predicate(config, specialty)?);
        if config.pagination_style().is_some() {
            builder = builder.paginate(Pagination::from_page(1, limit)?, config.family().clone());
        } else {
            warn!(
                family = %config.family(),
                "No pagination syntax for this family; recent patients are not bounded"
            );
        }
        let statement = builder.build()?;

        let rows = self.executor.fetch(keys::RECENT_PATIENTS, &statement).await?;
        let columns = config.columns();
        let patients: Vec<Episode> = rows
            .iter()
            .filter_map(|row| standardize::episode(&columns, row))
            .collect();
        info!(count = patients.len(), "Fetched recent patients");
        Ok(patients)
    }

    /// One page of the filtered, sorted patient listing.
    ///
    /// The count runs first and a zero total returns an empty page without
    /// any further query. Each listed episode is then enriched with its
    /// latest diary entry; a failed enrichment is logged and the episode is
    /// kept without it.
    #[instrument(skip(self, request), fields(page = request.page, limit = request.limit))]
    pub async fn patient_page(&self, request: &ListRequest) -> Result<PatientPage> {
        let config = self.config();

        let pagination = Pagination::from_page(request.page, request.limit)?;
        let sort_key: SortKey = request.sort_key.parse()?;
        let sort = sorting::resolve(config, sort_key, request.sort_order)?;
        if config.pagination_style().is_none() {
            return Err(WardError::unsupported_database(config.family().as_str()));
        }

        let search = SearchFilter::parse(&request.search)
            .map(|filter| filter.predicate(config))
            .transpose()?;

        let mut builder = StatementBuilder::new(config.query(keys::PATIENT_LIST)?)
            .where_opt(specialty_predicate(config, request.specialty.as_deref())?)
            .where_opt(search);
        for spec in sort {
            builder = builder.sort_by(spec);
        }
        let builder = builder.paginate(pagination, config.family().clone());

        let count_statement = builder.build_count(&config.query(keys::PATIENT_LIST_COUNT)?)?;
        let count_row = self
            .executor
            .fetch_one(keys::PATIENT_LIST_COUNT, &count_statement)
            .await?;
        let total = read_count(count_row.as_ref());
        if total == 0 {
            debug!("No patients match; skipping data query");
            return Ok(PatientPage::empty(request.page, request.limit));
        }

        let statement = builder.build()?;
        let rows = self.executor.fetch(keys::PATIENT_LIST, &statement).await?;

        let columns = config.columns();
        let mut patients: Vec<Episode> = rows
            .iter()
            .filter_map(|row| standardize::episode(&columns, row))
            .collect();

        if config.has_query(keys::LATEST_DIARY_KEY) && config.has_query(keys::LATEST_DIARY_TEXT) {
            for patient in &mut patients {
                let Some(id) = patient.episode_id else {
                    continue;
                };
                match self.latest_diary(&id).await {
                    Ok(text) => patient.latest_diary = text,
                    Err(e) => {
                        warn!(episode_id = %id, error = %e, "Error fetching latest diary");
                    }
                }
            }
        }

        info!(
            total,
            returned = patients.len(),
            sort = %sort_key,
            "Fetched patient page"
        );
        Ok(PatientPage::new(patients, total, request.page, request.limit))
    }

    /// Text of the latest diary entry of one episode.
    ///
    /// The first query yields the (date, time) key of the newest entry and
    /// the second reads the text stored under that key.
    async fn latest_diary(&self, id: &EpisodeId) -> Result<Option<String>> {
        let columns = self.config().columns();
        let Some(key_row) = self
            .executor
            .fetch_named_one(keys::LATEST_DIARY_KEY, vec![id.to_sql_value()])
            .await?
        else {
            return Ok(None);
        };

        let date = key_row
            .value(columns.require("diary_date")?)
            .cloned()
            .unwrap_or(SqlValue::Null);
        let time = key_row
            .value(columns.require("diary_time")?)
            .cloned()
            .unwrap_or(SqlValue::Null);

        let text_row = self
            .executor
            .fetch_named_one(keys::LATEST_DIARY_TEXT, vec![id.to_sql_value(), date, time])
            .await?;

        Ok(text_row.and_then(|row| columns.cell(&row, "latest_diary").and_then(SqlValue::as_text)))
    }
}
