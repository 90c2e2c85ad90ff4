//! Row standardizers.
//!
//! One pure function per entity maps a raw row, keyed by vendor column names,
//! into a logical record. Column names come from the `columns.*` mapping;
//! a field whose mapping or value is missing is left out. A row that yields
//! no field at all standardizes to `None`.

use warddata_config::ColumnMap;
use warddata_core::{EpisodeId, Row, RowExt, format_date, format_time};

use crate::records::{
    DiaryEntry, Episode, Exam, Intervention, LabTest, Medication, Observation, Phone,
    SignificantContact, Specialty, SymptomEvent,
};

fn text(columns: &ColumnMap<'_>, row: &Row, field: &str) -> Option<String> {
    columns.cell(row, field)?.as_text()
}

fn date(columns: &ColumnMap<'_>, row: &Row, field: &str) -> Option<String> {
    format_date(columns.cell(row, field))
}

// A mapped time column always yields a value; null reads as midnight.
fn time_of_day(columns: &ColumnMap<'_>, row: &Row, field: &str) -> Option<String> {
    let column = columns.name(field)?;
    Some(format_time(row.value(column)))
}

fn non_empty<T: Default + PartialEq>(record: T) -> Option<T> {
    (record != T::default()).then_some(record)
}

pub fn specialty(columns: &ColumnMap<'_>, row: &Row) -> Option<Specialty> {
    if row.is_blank() {
        return None;
    }
    non_empty(Specialty {
        code: text(columns, row, "specialty_code"),
        name: text(columns, row, "specialty_description"),
    })
}

pub fn episode(columns: &ColumnMap<'_>, row: &Row) -> Option<Episode> {
    if row.is_blank() {
        return None;
    }
    non_empty(Episode {
        episode_id: columns
            .cell(row, "episode_pk")
            .and_then(EpisodeId::from_value),
        patient_name: text(columns, row, "patient_name"),
        room: text(columns, row, "room"),
        bed: text(columns, row, "bed"),
        admission_date: date(columns, row, "admission_date"),
        admission_time: time_of_day(columns, row, "admission_time"),
        specialty_name: text(columns, row, "specialty_name"),
        latest_diary: None,
    })
}

pub fn symptom(columns: &ColumnMap<'_>, row: &Row) -> Option<SymptomEvent> {
    if row.is_blank() {
        return None;
    }
    non_empty(SymptomEvent {
        date: date(columns, row, "symptom_date"),
        time: time_of_day(columns, row, "symptom_time"),
        symptom: text(columns, row, "symptom"),
        definition: text(columns, row, "symptom_definition"),
    })
}

pub fn medication(columns: &ColumnMap<'_>, row: &Row) -> Option<Medication> {
    if row.is_blank() {
        return None;
    }
    non_empty(Medication {
        drug: text(columns, row, "drug"),
        route: text(columns, row, "route"),
        dose: text(columns, row, "dose"),
        schedule: text(columns, row, "medication_schedule"),
    })
}

pub fn intervention(columns: &ColumnMap<'_>, row: &Row) -> Option<Intervention> {
    if row.is_blank() {
        return None;
    }
    non_empty(Intervention {
        intervention: text(columns, row, "intervention"),
        schedule: text(columns, row, "intervention_schedule"),
    })
}

pub fn lab_test(columns: &ColumnMap<'_>, row: &Row) -> Option<LabTest> {
    if row.is_blank() {
        return None;
    }
    non_empty(LabTest {
        test: text(columns, row, "lab_test"),
        date: date(columns, row, "lab_test_date"),
        time: time_of_day(columns, row, "lab_test_time"),
    })
}

pub fn exam(columns: &ColumnMap<'_>, row: &Row) -> Option<Exam> {
    if row.is_blank() {
        return None;
    }
    non_empty(Exam {
        exam: text(columns, row, "exam"),
        date: date(columns, row, "exam_date"),
    })
}

pub fn diary(columns: &ColumnMap<'_>, row: &Row) -> Option<DiaryEntry> {
    if row.is_blank() {
        return None;
    }
    non_empty(DiaryEntry {
        entry_date: date(columns, row, "diary_date"),
        entry_time: time_of_day(columns, row, "diary_time"),
        text: text(columns, row, "diary"),
    })
}

pub fn observation(columns: &ColumnMap<'_>, row: &Row) -> Option<Observation> {
    if row.is_blank() {
        return None;
    }
    non_empty(Observation {
        text: text(columns, row, "observation"),
    })
}

pub fn significant_contact(columns: &ColumnMap<'_>, row: &Row) -> Option<SignificantContact> {
    if row.is_blank() {
        return None;
    }
    non_empty(SignificantContact {
        name: text(columns, row, "significant_contact"),
    })
}

pub fn phone(columns: &ColumnMap<'_>, row: &Row) -> Option<Phone> {
    if row.is_blank() {
        return None;
    }
    non_empty(Phone {
        home: text(columns, row, "home_phone"),
        mobile: text(columns, row, "mobile_phone"),
    })
}
