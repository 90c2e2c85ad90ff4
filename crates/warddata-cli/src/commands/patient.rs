use anyhow::Result;
use warddata_dal::WardRepository;

use crate::cli::OutputFormat;
use crate::output::{print_details, print_json};

pub async fn show(
    repo: &WardRepository,
    id: &str,
    specialty: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let details = repo.patient_details(id, specialty).await?;
    print_details(&details, format)
}

pub async fn find(
    repo: &WardRepository,
    name: &str,
    specialty: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let id = repo.find_episode_id_by_name(name, specialty).await?;
    match (format, id) {
        (OutputFormat::Json, id) => print_json(&id),
        (OutputFormat::Table, Some(id)) => {
            println!("{id}");
            Ok(())
        }
        (OutputFormat::Table, None) => {
            println!("No episode matches '{name}'.");
            Ok(())
        }
    }
}

pub async fn search(
    repo: &WardRepository,
    term: &str,
    specialty: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let details = repo.search_patient(term, specialty).await?;
    print_details(&details, format)
}
