//! The ward repository.

mod details;
mod listing;
mod lookup;

use std::sync::Arc;

use warddata_config::HospitalConfig;
use warddata_db::{DataSource, QueryExecutor};
use warddata_query::SortOrder;

use crate::sorting::SortKey;

/// Names of the templates under `queries.*`.
pub mod keys {
    pub const SPECIALTIES: &str = "specialties";
    pub const EPISODE_IDS: &str = "episode_ids";
    pub const RECENT_PATIENTS: &str = "recent_patients";
    pub const PATIENT_LIST: &str = "patient_list";
    pub const PATIENT_LIST_COUNT: &str = "patient_list_count";
    pub const LATEST_DIARY_KEY: &str = "latest_diary_key";
    pub const LATEST_DIARY_TEXT: &str = "latest_diary_text";
    pub const PATIENT_DETAILS: &str = "patient_details";
    pub const NOTE_ITEMS: &str = "note_items";
    pub const PHONES: &str = "phones";
    pub const OBSERVATIONS: &str = "observations";
    pub const SIGNIFICANT_CONTACTS: &str = "significant_contacts";
    pub const SYMPTOMS: &str = "symptoms";
    pub const MEDICATIONS: &str = "medications";
    pub const INTERVENTIONS: &str = "interventions";
    pub const LAB_TESTS: &str = "lab_tests";
    pub const EXAMS: &str = "exams";
    pub const DIARY: &str = "diary";
    pub const EPISODE_BY_NAME: &str = "episode_by_name";

    pub const ALL: &[&str] = &[
        SPECIALTIES,
        EPISODE_IDS,
        RECENT_PATIENTS,
        PATIENT_LIST,
        PATIENT_LIST_COUNT,
        LATEST_DIARY_KEY,
        LATEST_DIARY_TEXT,
        PATIENT_DETAILS,
        NOTE_ITEMS,
        PHONES,
        OBSERVATIONS,
        SIGNIFICANT_CONTACTS,
        SYMPTOMS,
        MEDICATIONS,
        INTERVENTIONS,
        LAB_TESTS,
        EXAMS,
        DIARY,
        EPISODE_BY_NAME,
    ];
}

/// Parameters of the paginated patient listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub specialty: Option<String>,
    /// Logical sort key, validated against [`SortKey`].
    pub sort_key: String,
    pub sort_order: SortOrder,
    /// Episode number or name fragment; blank means no filter.
    pub search: String,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            specialty: None,
            sort_key: SortKey::default().as_str().to_string(),
            sort_order: SortOrder::Desc,
            search: String::new(),
        }
    }
}

impl ListRequest {
    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    pub fn sort(mut self, key: impl Into<String>, order: SortOrder) -> Self {
        self.sort_key = key.into();
        self.sort_order = order;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }
}

/// Read-only access to ward data.
///
/// Stateless apart from the shared executor; calls are independent and each
/// issues its round trips sequentially.
#[derive(Debug, Clone)]
pub struct WardRepository {
    executor: QueryExecutor,
}

impl WardRepository {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }

    pub fn from_parts(source: Arc<dyn DataSource>, config: Arc<HospitalConfig>) -> Self {
        Self::new(QueryExecutor::new(source, config))
    }

    pub fn config(&self) -> &HospitalConfig {
        self.executor.config()
    }

    pub fn executor(&self) -> &QueryExecutor {
        &self.executor
    }
}
