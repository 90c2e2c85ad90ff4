mod cli;
mod commands;
mod observability;
mod output;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use warddata_config::{AppConfig, HospitalConfig, load_config};
use warddata_dal::{WardRepository, keys};
use warddata_db_postgres::{PostgresConfig, PostgresSource};

use cli::{Cli, Commands};
use output::{print_error, print_success};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    observability::init_tracing();

    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format.unwrap_or_default();
    let specialty = cli.specialty.as_deref().filter(|s| !s.trim().is_empty());

    let cfg = load_config(cli.config.as_deref()).context("Configuration error")?;
    observability::apply_logging_level(&cfg.logging.level);
    let hospital = cfg.hospital_config()?;

    if matches!(cli.command, Commands::Check) {
        check(&cfg, &hospital);
        return Ok(());
    }

    let source = PostgresSource::connect(&PostgresConfig::from(&cfg.database)).await?;
    tracing::info!(family = %hospital.family(), "Connected to hospital database");
    let repo = WardRepository::from_parts(Arc::new(source), Arc::new(hospital));

    match &cli.command {
        Commands::Check => {}
        Commands::Specialties => commands::listing::specialties(&repo, format).await?,
        Commands::Ids => commands::listing::ids(&repo, format).await?,
        Commands::Recent => commands::listing::recent(&repo, specialty, format).await?,
        Commands::List(args) => commands::listing::list(&repo, args, specialty, format).await?,
        Commands::Show(args) => commands::patient::show(&repo, &args.id, specialty, format).await?,
        Commands::Find(args) => {
            commands::patient::find(&repo, &args.name, specialty, format).await?;
        }
        Commands::Search(args) => {
            commands::patient::search(&repo, &args.term, specialty, format).await?;
        }
    }

    Ok(())
}

fn check(cfg: &AppConfig, hospital: &HospitalConfig) {
    println!("{}: {}", "Family".cyan(), hospital.family());
    println!("{}: {:?}", "Parameter marker".cyan(), hospital.marker());
    match hospital.pagination_style() {
        Some(style) => println!("{}: {style:?}", "Pagination".cyan()),
        None => println!("{}: {}", "Pagination".cyan(), "unsupported".yellow()),
    }
    println!("{}: {}", "Pool size".cyan(), cfg.database.pool_size);

    let missing: Vec<&str> = keys::ALL
        .iter()
        .copied()
        .filter(|key| !hospital.has_query(key))
        .collect();
    if missing.is_empty() {
        print_success("All query templates are configured");
    } else {
        println!("{}: {}", "Missing templates".yellow(), missing.join(", "));
        print_success("Configuration is valid");
    }
}
