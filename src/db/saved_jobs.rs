// src/db/saved_jobs.rs
use crate::models::{SavedJob, SavedJobWithJob};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

/// Which branch a toggle took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Saved,
    Removed,
}

pub struct SavedJobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SavedJobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// The user's bookmarks joined with their jobs, newest first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<SavedJobWithJob>> {
        let saved = sqlx::query_as::<_, SavedJobWithJob>(
            r#"
            SELECT s.id, s.job_id, s.created_at,
                   j.job_title, j.company_name, j.job_location,
                   j.workplace_type, j.apply_url
            FROM saved_jobs s
            LEFT JOIN jobs j ON j.id = s.job_id
            WHERE s.user_id = ?
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(saved)
    }

    /// Membership set used to render bookmark state on the catalog view.
    pub async fn saved_job_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT job_id FROM saved_jobs WHERE user_id = ?")
                .bind(user_id)
                .fetch_all(self.pool)
                .await?;
        Ok(ids)
    }

    /// Read-then-decide: delete the bookmark if present, insert it
    /// otherwise.
    pub async fn toggle(&self, user_id: &str, job_id: &str) -> Result<ToggleOutcome> {
        let existing: Option<SavedJob> = sqlx::query_as(
            "SELECT * FROM saved_jobs WHERE user_id = ? AND job_id = ?",
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_optional(self.pool)
        .await?;

        match existing {
            Some(saved) => {
                sqlx::query("DELETE FROM saved_jobs WHERE id = ?")
                    .bind(&saved.id)
                    .execute(self.pool)
                    .await?;
                info!("User {} unsaved job {}", user_id, job_id);
                Ok(ToggleOutcome::Removed)
            }
            None => {
                sqlx::query(
                    "INSERT INTO saved_jobs (id, user_id, job_id, created_at) VALUES (?, ?, ?, ?)",
                )
                .bind(Uuid::new_v4().to_string())
                .bind(user_id)
                .bind(job_id)
                .bind(Utc::now())
                .execute(self.pool)
                .await?;
                info!("User {} saved job {}", user_id, job_id);
                Ok(ToggleOutcome::Saved)
            }
        }
    }

    /// Delete by the ledger row's own id, not the job id.
    pub async fn remove(&self, user_id: &str, saved_job_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE id = ? AND user_id = ?")
            .bind(saved_job_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self, user_id: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM saved_jobs WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::jobs::sample_job;
    use crate::db::{Database, JobRepository};

    async fn setup() -> (Database, String) {
        let db = Database::in_memory().await.unwrap();
        let job = JobRepository::new(db.pool())
            .insert(sample_job("Data Analyst"))
            .await
            .unwrap();
        (db, job.id)
    }

    #[tokio::test]
    async fn test_toggle_alternation_is_idempotent() {
        let (db, job_id) = setup().await;
        let repo = SavedJobRepository::new(db.pool());

        assert_eq!(
            repo.toggle("user-1", &job_id).await.unwrap(),
            ToggleOutcome::Saved
        );
        assert_eq!(repo.saved_job_ids("user-1").await.unwrap(), vec![job_id.clone()]);

        assert_eq!(
            repo.toggle("user-1", &job_id).await.unwrap(),
            ToggleOutcome::Removed
        );
        assert!(repo.saved_job_ids("user-1").await.unwrap().is_empty());
        assert_eq!(repo.count("user-1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_remove_clears_list_membership_and_count() {
        let (db, job_id) = setup().await;
        let repo = SavedJobRepository::new(db.pool());

        repo.toggle("user-1", &job_id).await.unwrap();
        let saved = repo.list("user-1").await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].job_title.as_deref(), Some("Data Analyst"));

        assert!(repo.remove("user-1", &saved[0].id).await.unwrap());
        assert!(repo.list("user-1").await.unwrap().is_empty());
        assert!(repo.saved_job_ids("user-1").await.unwrap().is_empty());
        assert_eq!(repo.count("user-1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_remove_is_scoped_to_owner() {
        let (db, job_id) = setup().await;
        let repo = SavedJobRepository::new(db.pool());

        repo.toggle("user-1", &job_id).await.unwrap();
        let saved = repo.list("user-1").await.unwrap();

        assert!(!repo.remove("user-2", &saved[0].id).await.unwrap());
        assert_eq!(repo.count("user-1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ledgers_are_per_user() {
        let (db, job_id) = setup().await;
        let repo = SavedJobRepository::new(db.pool());

        repo.toggle("user-1", &job_id).await.unwrap();
        repo.toggle("user-2", &job_id).await.unwrap();

        assert_eq!(repo.count("user-1").await.unwrap(), 1);
        assert_eq!(repo.count("user-2").await.unwrap(), 1);
        repo.toggle("user-2", &job_id).await.unwrap();
        assert_eq!(repo.count("user-1").await.unwrap(), 1);
        assert_eq!(repo.count("user-2").await.unwrap(), 0);
    }
}
