use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use warddata_dal::{Episode, PatientDetails, PatientPage, Specialty};

use crate::cli::OutputFormat;

const EMPTY: &str = "-";

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

fn cell(value: Option<&String>) -> &str {
    value.map_or(EMPTY, String::as_str)
}

fn print_table(builder: Builder) {
    println!("{}", builder.build().with(Style::rounded()));
}

pub fn print_specialties(specialties: &[Specialty], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(specialties),
        OutputFormat::Table => {
            if specialties.is_empty() {
                println!("No specialties found.");
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(["Code", "Specialty"]);
            for s in specialties {
                builder.push_record([cell(s.code.as_ref()), cell(s.name.as_ref())]);
            }
            print_table(builder);
            Ok(())
        }
    }
}

fn episode_table(patients: &[Episode]) -> Builder {
    let mut builder = Builder::default();
    builder.push_record(["Episode", "Name", "Room", "Bed", "Admitted", "Latest diary"]);
    for p in patients {
        let id = p.episode_id.map(|id| id.to_string()).unwrap_or_default();
        let admitted = match (&p.admission_date, &p.admission_time) {
            (Some(d), Some(t)) => format!("{d} {t}"),
            (Some(d), None) => d.clone(),
            _ => EMPTY.to_string(),
        };
        builder.push_record([
            id.as_str(),
            cell(p.patient_name.as_ref()),
            cell(p.room.as_ref()),
            cell(p.bed.as_ref()),
            admitted.as_str(),
            cell(p.latest_diary.as_ref()),
        ]);
    }
    builder
}

pub fn print_episodes(patients: &[Episode], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(patients),
        OutputFormat::Table => {
            if patients.is_empty() {
                println!("No patients found.");
                return Ok(());
            }
            print_table(episode_table(patients));
            Ok(())
        }
    }
}

pub fn print_page(page: &PatientPage, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(page),
        OutputFormat::Table => {
            if page.patients.is_empty() {
                println!("No patients found.");
            } else {
                print_table(episode_table(&page.patients));
            }
            println!(
                "Page {}/{} ({} total)",
                page.page,
                page.total_pages.max(1),
                page.total
            );
            Ok(())
        }
    }
}

fn section(title: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    println!("{}", title.cyan());
    for line in lines {
        println!("  {line}");
    }
}

fn joined(parts: &[Option<&String>]) -> String {
    parts
        .iter()
        .flatten()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_details(details: &PatientDetails, format: OutputFormat) -> Result<()> {
    if matches!(format, OutputFormat::Json) {
        return print_json(details);
    }

    let e = &details.episode;
    let id = e.episode_id.map(|id| id.to_string()).unwrap_or_default();
    println!(
        "{} {} {}",
        "Episode:".cyan(),
        id.cyan(),
        cell(e.patient_name.as_ref())
    );
    let mut summary = Builder::default();
    summary.push_record(["Specialty", cell(e.specialty_name.as_ref())]);
    summary.push_record(["Room", cell(e.room.as_ref())]);
    summary.push_record(["Bed", cell(e.bed.as_ref())]);
    let admitted = joined(&[e.admission_date.as_ref(), e.admission_time.as_ref()]);
    summary.push_record(["Admitted", admitted.as_str()]);
    print_table(summary);

    section("Diagnoses", &details.diagnoses);
    section("History", &details.history);
    section(
        "Phones",
        &details.phones.iter().map(|p| p.display()).collect::<Vec<_>>(),
    );
    section(
        "Significant contacts",
        &details
            .significant_contacts
            .iter()
            .filter_map(|c| c.name.clone())
            .collect::<Vec<_>>(),
    );
    section(
        "Observations",
        &details
            .observations
            .iter()
            .filter_map(|o| o.text.clone())
            .collect::<Vec<_>>(),
    );
    section(
        "Symptoms",
        &details
            .symptoms
            .iter()
            .map(|s| joined(&[s.date.as_ref(), s.time.as_ref(), s.symptom.as_ref()]))
            .collect::<Vec<_>>(),
    );
    section(
        "Medication",
        &details
            .medications
            .iter()
            .map(|m| {
                joined(&[
                    m.drug.as_ref(),
                    m.dose.as_ref(),
                    m.route.as_ref(),
                    m.schedule.as_ref(),
                ])
            })
            .collect::<Vec<_>>(),
    );
    section(
        "Interventions",
        &details
            .interventions
            .iter()
            .map(|i| joined(&[i.intervention.as_ref(), i.schedule.as_ref()]))
            .collect::<Vec<_>>(),
    );
    section(
        "Lab tests",
        &details
            .lab_tests
            .iter()
            .map(|l| joined(&[l.date.as_ref(), l.time.as_ref(), l.test.as_ref()]))
            .collect::<Vec<_>>(),
    );
    section(
        "Exams",
        &details
            .exams
            .iter()
            .map(|x| joined(&[x.date.as_ref(), x.exam.as_ref()]))
            .collect::<Vec<_>>(),
    );
    section(
        "Diary",
        &details
            .diary
            .iter()
            .map(|d| joined(&[d.entry_date.as_ref(), d.entry_time.as_ref(), d.text.as_ref()]))
            .collect::<Vec<_>>(),
    );
    Ok(())
}
