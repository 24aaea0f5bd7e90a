// src/db/mod.rs
//! Storage layer: connection management, schema migration, and one
//! repository per table.

pub mod applications;
pub mod jobs;
pub mod profiles;
pub mod saved_jobs;

pub use applications::{ApplicationRepository, TrackOutcome};
pub use jobs::{JobRepository, NewJob};
pub use profiles::ProfileRepository;
pub use saved_jobs::{SavedJobRepository, ToggleOutcome};

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database and bring the schema up to
    /// date.
    pub async fn new(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
        let pool = SqlitePool::connect(&database_url).await.with_context(|| {
            format!("Failed to connect to database: {}", database_path.display())
        })?;

        info!(
            "Database connection established: {}",
            database_path.display()
        );

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// In-memory database for tests and local experiments.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id TEXT PRIMARY KEY,
                job_title TEXT NOT NULL,
                company_name TEXT,
                job_location TEXT,
                category TEXT,
                workplace_type TEXT,
                employment_type TEXT,
                experience_level TEXT,
                salary_min INTEGER,
                salary_max INTEGER,
                posted_at TEXT,
                apply_url TEXT,
                job_url TEXT,
                company_url TEXT,
                description TEXT,
                applicants INTEGER,
                easy_apply BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS saved_jobs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                job_id TEXT NOT NULL REFERENCES jobs(id),
                created_at TEXT NOT NULL,
                UNIQUE(user_id, job_id)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS applications (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                job_id TEXT NOT NULL REFERENCES jobs(id),
                status TEXT NOT NULL DEFAULT 'saved',
                applied_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(user_id, job_id)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                full_name TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_jobs_created_at ON jobs(created_at);",
            "CREATE INDEX IF NOT EXISTS idx_saved_jobs_user ON saved_jobs(user_id);",
            "CREATE INDEX IF NOT EXISTS idx_applications_user ON applications(user_id);",
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }
}
