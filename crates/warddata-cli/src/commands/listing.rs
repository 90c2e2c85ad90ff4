use anyhow::Result;
use warddata_dal::{ListRequest, WardRepository};

use crate::cli::{ListArgs, OutputFormat};
use crate::output::{print_episodes, print_json, print_page, print_specialties};

pub async fn specialties(repo: &WardRepository, format: OutputFormat) -> Result<()> {
    let specialties = repo.specialties().await?;
    print_specialties(&specialties, format)
}

pub async fn ids(repo: &WardRepository, format: OutputFormat) -> Result<()> {
    let ids: Vec<String> = repo
        .episode_ids()
        .await?
        .iter()
        .map(ToString::to_string)
        .collect();
    match format {
        OutputFormat::Json => print_json(&ids),
        OutputFormat::Table => {
            for id in &ids {
                println!("{id}");
            }
            Ok(())
        }
    }
}

pub async fn recent(
    repo: &WardRepository,
    specialty: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let patients = repo.recent_patients(specialty).await?;
    print_episodes(&patients, format)
}

pub async fn list(
    repo: &WardRepository,
    args: &ListArgs,
    specialty: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let mut request = ListRequest::default()
        .page(args.page, args.limit)
        .sort(args.sort.clone(), args.order.into())
        .search(args.search.clone());
    if let Some(code) = specialty {
        request = request.specialty(code);
    }

    let page = repo.patient_page(&request).await?;
    print_page(&page, format)
}
