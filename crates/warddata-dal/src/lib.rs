//! # warddata-dal
//!
//! Query builders and row standardizers over the configured hospital
//! schema. [`WardRepository`] is the entry point: each operation resolves
//! its templates and column names through the
//! [`HospitalConfig`](warddata_config::HospitalConfig), composes one or more
//! statements, runs them sequentially through the
//! [`QueryExecutor`](warddata_db::QueryExecutor) and returns standardized
//! records.

pub mod filters;
pub mod records;
pub mod repository;
pub mod sorting;
pub mod standardize;

pub use filters::SearchFilter;
pub use records::{
    DiaryEntry, Episode, Exam, Intervention, LabTest, Medication, Observation, PatientDetails,
    PatientPage, Phone, SignificantContact, Specialty, SymptomEvent,
};
pub use repository::{ListRequest, WardRepository, keys};
pub use sorting::SortKey;
