//! Logical records returned to callers.
//!
//! Every field is optional and skipped when absent: a missing key means no
//! data, never an error.

use serde::Serialize;
use warddata_core::EpisodeId;

/// A clinical department that scopes which episodes are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Specialty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A currently admitted patient stay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Episode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_id: Option<EpisodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed: Option<String>,
    /// `DD-MM-YYYY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_date: Option<String>,
    /// `HH:MM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty_name: Option<String>,
    /// Text of the most recent diary entry, filled in by the listing only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_diary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiaryEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymptomEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Medication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

/// A therapeutic intervention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Intervention {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabTest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Exam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Observation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A person of reference for the patient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignificantContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Phone {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl Phone {
    /// `home / mobile`, or whichever number exists.
    ///
    /// Identical numbers are shown once; with neither the result is empty.
    pub fn display(&self) -> String {
        let home = self.home.as_deref().filter(|s| !s.is_empty());
        let mobile = self.mobile.as_deref().filter(|s| !s.is_empty());
        match (home, mobile) {
            (Some(h), Some(m)) if h != m => format!("{h} / {m}"),
            (Some(h), _) => h.to_string(),
            (None, Some(m)) => m.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// An episode with every child collection attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatientDetails {
    #[serde(flatten)]
    pub episode: Episode,
    /// Medical history items of the admission note, first-seen order.
    pub history: Vec<String>,
    /// Diagnosis items of the admission note, first-seen order.
    pub diagnoses: Vec<String>,
    pub phones: Vec<Phone>,
    pub observations: Vec<Observation>,
    pub significant_contacts: Vec<SignificantContact>,
    pub symptoms: Vec<SymptomEvent>,
    pub medications: Vec<Medication>,
    pub interventions: Vec<Intervention>,
    pub lab_tests: Vec<LabTest>,
    pub exams: Vec<Exam>,
    pub diary: Vec<DiaryEntry>,
}

/// One page of the patient listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatientPage {
    pub patients: Vec<Episode>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl PatientPage {
    pub fn new(patients: Vec<Episode>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            1
        } else {
            total.div_ceil(u64::from(limit))
        };
        Self {
            patients,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Page with no rows and a zero total.
    pub fn empty(page: u32, limit: u32) -> Self {
        Self::new(Vec::new(), 0, page, limit)
    }
}
