// src/bin/import.rs
//! Admin-side job ingestion. The API never writes to the jobs table; this
//! tool is the ingestion process that feeds the catalog.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use job_tracker::db::{Database, JobRepository, NewJob};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "f1work-import")]
#[command(about = "Manage the job catalog for the F1Work tracker")]
struct ImportCli {
    #[command(subcommand)]
    command: ImportCommand,

    #[arg(long, default_value = "data/f1work.db")]
    database_path: PathBuf,
}

#[derive(Subcommand)]
enum ImportCommand {
    /// Initialize the database
    Init,
    /// Import jobs from a CSV file
    Import { csv_file: PathBuf },
    /// Show the current catalog size
    Count,
}

async fn import_csv(repo: &JobRepository<'_>, csv_file: &PathBuf) -> Result<(u64, u64)> {
    let mut reader = csv::Reader::from_path(csv_file)
        .with_context(|| format!("Failed to open CSV file: {}", csv_file.display()))?;

    let mut imported = 0u64;
    let mut skipped = 0u64;

    for record in reader.deserialize::<NewJob>() {
        let new_job = match record {
            Ok(job) => job,
            Err(e) => {
                error!("Skipping malformed row: {}", e);
                skipped += 1;
                continue;
            }
        };

        if new_job.job_title.trim().is_empty() {
            error!("Skipping row with empty job_title");
            skipped += 1;
            continue;
        }

        match repo.insert(new_job).await {
            Ok(job) => {
                info!("Imported: {} ({})", job.job_title, job.id);
                imported += 1;
            }
            Err(e) => {
                error!("Failed to insert row: {}", e);
                skipped += 1;
            }
        }
    }

    Ok((imported, skipped))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = ImportCli::parse();

    let db = Database::new(&cli.database_path).await?;
    let repo = JobRepository::new(db.pool());

    match cli.command {
        ImportCommand::Init => {
            // Database::new already ran migrations
            info!("Database initialized at {}", cli.database_path.display());
        }
        ImportCommand::Import { csv_file } => {
            let (imported, skipped) = import_csv(&repo, &csv_file).await?;
            info!("Import finished: {} imported, {} skipped", imported, skipped);
        }
        ImportCommand::Count => {
            let count = repo.count().await?;
            info!("Catalog contains {} jobs", count);
        }
    }

    Ok(())
}
