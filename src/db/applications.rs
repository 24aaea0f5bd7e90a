// src/db/applications.rs
use crate::models::{Application, ApplicationStatus, ApplicationWithJob};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

/// Result of trying to start tracking a job. A duplicate is an expected,
/// user-visible condition, not an error: the storage layer's UNIQUE
/// (user_id, job_id) constraint is what detects it.
#[derive(Debug)]
pub enum TrackOutcome {
    Created(Application),
    AlreadyTracked,
}

pub struct ApplicationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ApplicationRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// The user's pipeline joined with job details, most recently touched
    /// first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<ApplicationWithJob>> {
        let applications = sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT a.id, a.job_id, a.status, a.applied_at, a.created_at,
                   a.updated_at,
                   j.job_title, j.company_name, j.job_location, j.apply_url
            FROM applications a
            LEFT JOIN jobs j ON j.id = a.job_id
            WHERE a.user_id = ?
            ORDER BY a.updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(applications)
    }

    /// Start tracking a job. New rows always begin in `saved` with no
    /// applied-at stamp. Promotion from a bookmark goes through here too
    /// and never deletes the saved_jobs row.
    pub async fn track(&self, user_id: &str, job_id: &str) -> Result<TrackOutcome> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO applications (id, user_id, job_id, status, applied_at, created_at, updated_at)
            VALUES (?, ?, ?, 'saved', NULL, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(job_id)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await;

        match result {
            Ok(_) => {
                info!("User {} now tracking job {}", user_id, job_id);
                Ok(TrackOutcome::Created(Application {
                    id,
                    user_id: user_id.to_string(),
                    job_id: job_id.to_string(),
                    status: ApplicationStatus::Saved,
                    applied_at: None,
                    created_at: now,
                    updated_at: now,
                }))
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                info!("User {} already tracking job {}", user_id, job_id);
                Ok(TrackOutcome::AlreadyTracked)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the status. Entering `applied` stamps applied_at to now,
    /// even on re-entry; every other transition leaves the stamp alone.
    /// Returns false when no row matched (unknown id or wrong owner).
    pub async fn set_status(
        &self,
        user_id: &str,
        application_id: &str,
        status: ApplicationStatus,
    ) -> Result<bool> {
        let now = Utc::now();

        let result = if status == ApplicationStatus::Applied {
            sqlx::query(
                r#"
                UPDATE applications
                SET status = ?, applied_at = ?, updated_at = ?
                WHERE id = ? AND user_id = ?
                "#,
            )
            .bind(status)
            .bind(now)
            .bind(now)
            .bind(application_id)
            .bind(user_id)
            .execute(self.pool)
            .await?
        } else {
            sqlx::query(
                r#"
                UPDATE applications
                SET status = ?, updated_at = ?
                WHERE id = ? AND user_id = ?
                "#,
            )
            .bind(status)
            .bind(now)
            .bind(application_id)
            .bind(user_id)
            .execute(self.pool)
            .await?
        };

        let updated = result.rows_affected() > 0;
        if updated {
            info!(
                "User {} moved application {} to {}",
                user_id, application_id, status
            );
        }
        Ok(updated)
    }

    /// Permanent removal. There is no soft delete and no undo.
    pub async fn delete(&self, user_id: &str, application_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = ? AND user_id = ?")
            .bind(application_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self, user_id: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Status column for the user's rows, for the distribution view.
    pub async fn statuses(&self, user_id: &str) -> Result<Vec<ApplicationStatus>> {
        let statuses: Vec<ApplicationStatus> =
            sqlx::query_scalar("SELECT status FROM applications WHERE user_id = ?")
                .bind(user_id)
                .fetch_all(self.pool)
                .await?;
        Ok(statuses)
    }

    pub async fn find(&self, user_id: &str, application_id: &str) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE id = ? AND user_id = ?",
        )
        .bind(application_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::jobs::sample_job;
    use crate::db::{Database, JobRepository, SavedJobRepository};

    async fn setup() -> (Database, String) {
        let db = Database::in_memory().await.unwrap();
        let job = JobRepository::new(db.pool())
            .insert(sample_job("Data Analyst"))
            .await
            .unwrap();
        (db, job.id)
    }

    #[tokio::test]
    async fn test_track_starts_in_saved_with_no_stamp() {
        let (db, job_id) = setup().await;
        let repo = ApplicationRepository::new(db.pool());

        let app = match repo.track("user-1", &job_id).await.unwrap() {
            TrackOutcome::Created(app) => app,
            TrackOutcome::AlreadyTracked => panic!("first track must create"),
        };
        assert_eq!(app.status, ApplicationStatus::Saved);
        assert!(app.applied_at.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_track_is_conflict_not_error() {
        let (db, job_id) = setup().await;
        let repo = ApplicationRepository::new(db.pool());

        repo.track("user-1", &job_id).await.unwrap();
        match repo.track("user-1", &job_id).await.unwrap() {
            TrackOutcome::AlreadyTracked => {}
            TrackOutcome::Created(_) => panic!("duplicate must not create a second row"),
        }
        assert_eq!(repo.count("user-1").await.unwrap(), 1);

        // a different user tracking the same job is not a conflict
        match repo.track("user-2", &job_id).await.unwrap() {
            TrackOutcome::Created(_) => {}
            TrackOutcome::AlreadyTracked => panic!("other users are independent"),
        }
    }

    #[tokio::test]
    async fn test_applied_stamps_and_other_statuses_keep_stamp() {
        let (db, job_id) = setup().await;
        let repo = ApplicationRepository::new(db.pool());

        let app = match repo.track("user-1", &job_id).await.unwrap() {
            TrackOutcome::Created(app) => app,
            _ => unreachable!(),
        };

        assert!(repo
            .set_status("user-1", &app.id, ApplicationStatus::Applied)
            .await
            .unwrap());
        let after_apply = repo.find("user-1", &app.id).await.unwrap().unwrap();
        assert_eq!(after_apply.status, ApplicationStatus::Applied);
        let stamp = after_apply.applied_at.expect("applied must stamp");

        assert!(repo
            .set_status("user-1", &app.id, ApplicationStatus::Rejected)
            .await
            .unwrap());
        let after_reject = repo.find("user-1", &app.id).await.unwrap().unwrap();
        assert_eq!(after_reject.status, ApplicationStatus::Rejected);
        assert_eq!(after_reject.applied_at, Some(stamp));
    }

    #[tokio::test]
    async fn test_reentering_applied_restamps() {
        let (db, job_id) = setup().await;
        let repo = ApplicationRepository::new(db.pool());

        let app = match repo.track("user-1", &job_id).await.unwrap() {
            TrackOutcome::Created(app) => app,
            _ => unreachable!(),
        };

        repo.set_status("user-1", &app.id, ApplicationStatus::Applied)
            .await
            .unwrap();
        let first = repo.find("user-1", &app.id).await.unwrap().unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.set_status("user-1", &app.id, ApplicationStatus::NoResponse)
            .await
            .unwrap();
        repo.set_status("user-1", &app.id, ApplicationStatus::Applied)
            .await
            .unwrap();
        let second = repo.find("user-1", &app.id).await.unwrap().unwrap();

        assert!(second.applied_at.unwrap() > first.applied_at.unwrap());
    }

    #[tokio::test]
    async fn test_set_status_requires_ownership() {
        let (db, job_id) = setup().await;
        let repo = ApplicationRepository::new(db.pool());

        let app = match repo.track("user-1", &job_id).await.unwrap() {
            TrackOutcome::Created(app) => app,
            _ => unreachable!(),
        };

        assert!(!repo
            .set_status("user-2", &app.id, ApplicationStatus::Offer)
            .await
            .unwrap());
        let unchanged = repo.find("user-1", &app.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, ApplicationStatus::Saved);
    }

    #[tokio::test]
    async fn test_delete_decrements_count_by_one() {
        let (db, job_id) = setup().await;
        let job2 = JobRepository::new(db.pool())
            .insert(sample_job("Second Job"))
            .await
            .unwrap();
        let repo = ApplicationRepository::new(db.pool());

        let app = match repo.track("user-1", &job_id).await.unwrap() {
            TrackOutcome::Created(app) => app,
            _ => unreachable!(),
        };
        repo.track("user-1", &job2.id).await.unwrap();
        assert_eq!(repo.count("user-1").await.unwrap(), 2);

        assert!(repo.delete("user-1", &app.id).await.unwrap());
        assert_eq!(repo.count("user-1").await.unwrap(), 1);
        assert!(repo
            .list("user-1")
            .await
            .unwrap()
            .iter()
            .all(|a| a.id != app.id));
    }

    #[tokio::test]
    async fn test_promotion_scenario_keeps_bookmark() {
        // save -> promote (saved, no stamp) -> applied (stamped)
        // -> rejected (stamp retained)
        let (db, job_id) = setup().await;
        let saved_repo = SavedJobRepository::new(db.pool());
        let app_repo = ApplicationRepository::new(db.pool());

        saved_repo.toggle("user-1", &job_id).await.unwrap();

        let app = match app_repo.track("user-1", &job_id).await.unwrap() {
            TrackOutcome::Created(app) => app,
            _ => unreachable!(),
        };
        assert_eq!(app.status, ApplicationStatus::Saved);
        assert!(app.applied_at.is_none());
        // the bookmark and the application coexist
        assert_eq!(saved_repo.count("user-1").await.unwrap(), 1);

        app_repo
            .set_status("user-1", &app.id, ApplicationStatus::Applied)
            .await
            .unwrap();
        let applied = app_repo.find("user-1", &app.id).await.unwrap().unwrap();
        let stamp = applied.applied_at.unwrap();

        app_repo
            .set_status("user-1", &app.id, ApplicationStatus::Rejected)
            .await
            .unwrap();
        let rejected = app_repo.find("user-1", &app.id).await.unwrap().unwrap();
        assert_eq!(rejected.status, ApplicationStatus::Rejected);
        assert_eq!(rejected.applied_at, Some(stamp));
    }

    #[tokio::test]
    async fn test_list_orders_by_updated_at_desc() {
        let (db, job_id) = setup().await;
        let job2 = JobRepository::new(db.pool())
            .insert(sample_job("Second Job"))
            .await
            .unwrap();
        let repo = ApplicationRepository::new(db.pool());

        let first = match repo.track("user-1", &job_id).await.unwrap() {
            TrackOutcome::Created(app) => app,
            _ => unreachable!(),
        };
        repo.track("user-1", &job2.id).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.set_status("user-1", &first.id, ApplicationStatus::GotEmail)
            .await
            .unwrap();

        let listed = repo.list("user-1").await.unwrap();
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[0].job_title.as_deref(), Some("Data Analyst"));
    }
}
