// src/db/jobs.rs
use crate::models::{Job, JobSummary};
use crate::stats::LOCATION_SAMPLE_CAP;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Fields for a catalog row created by the import tool. The API itself
/// never writes to the jobs table.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewJob {
    pub job_title: String,
    pub company_name: Option<String>,
    pub job_location: Option<String>,
    pub category: Option<String>,
    pub workplace_type: Option<String>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub posted_at: Option<DateTime<Utc>>,
    pub apply_url: Option<String>,
    pub job_url: Option<String>,
    pub company_url: Option<String>,
    pub description: Option<String>,
    pub applicants: Option<i64>,
    #[serde(default)]
    pub easy_apply: bool,
}

pub struct JobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> JobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Full catalog, newest postings first, rows without a posting date
    /// last.
    pub async fn list(&self) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            ORDER BY posted_at IS NULL, posted_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(jobs)
    }

    /// The 5 most recently imported jobs, for the dashboard table.
    pub async fn recent(&self, limit: i64) -> Result<Vec<JobSummary>> {
        let jobs = sqlx::query_as::<_, JobSummary>(
            r#"
            SELECT id, job_title, company_name, category, job_location,
                   applicants, posted_at, experience_level
            FROM jobs
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(jobs)
    }

    /// Exact row count without materializing rows.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Every category value, including missing ones; normalization to the
    /// "Other" bucket happens in the aggregation layer.
    pub async fn categories(&self) -> Result<Vec<Option<String>>> {
        let categories: Vec<Option<String>> = sqlx::query_scalar("SELECT category FROM jobs")
            .fetch_all(self.pool)
            .await?;
        Ok(categories)
    }

    /// Location column over a capped sample of the catalog. The location
    /// breakdown is deliberately computed over a sample, not everything.
    pub async fn location_sample(&self) -> Result<Vec<Option<String>>> {
        let locations: Vec<Option<String>> =
            sqlx::query_scalar("SELECT job_location FROM jobs LIMIT ?")
                .bind(LOCATION_SAMPLE_CAP as i64)
                .fetch_all(self.pool)
                .await?;
        Ok(locations)
    }

    pub async fn insert(&self, new_job: NewJob) -> Result<Job> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO jobs (
                id, job_title, company_name, job_location, category,
                workplace_type, employment_type, experience_level,
                salary_min, salary_max, posted_at, apply_url, job_url,
                company_url, description, applicants, easy_apply, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&new_job.job_title)
        .bind(&new_job.company_name)
        .bind(&new_job.job_location)
        .bind(&new_job.category)
        .bind(&new_job.workplace_type)
        .bind(&new_job.employment_type)
        .bind(&new_job.experience_level)
        .bind(new_job.salary_min)
        .bind(new_job.salary_max)
        .bind(new_job.posted_at)
        .bind(&new_job.apply_url)
        .bind(&new_job.job_url)
        .bind(&new_job.company_url)
        .bind(&new_job.description)
        .bind(new_job.applicants)
        .bind(new_job.easy_apply)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(Job {
            id,
            job_title: new_job.job_title,
            company_name: new_job.company_name,
            job_location: new_job.job_location,
            category: new_job.category,
            workplace_type: new_job.workplace_type,
            employment_type: new_job.employment_type,
            experience_level: new_job.experience_level,
            salary_min: new_job.salary_min,
            salary_max: new_job.salary_max,
            posted_at: new_job.posted_at,
            apply_url: new_job.apply_url,
            job_url: new_job.job_url,
            company_url: new_job.company_url,
            description: new_job.description,
            applicants: new_job.applicants,
            easy_apply: new_job.easy_apply,
            created_at: now,
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_job(title: &str) -> NewJob {
    NewJob {
        job_title: title.to_string(),
        company_name: Some("Acme".to_string()),
        job_location: Some("New York, NY".to_string()),
        category: Some("Software Engineering".to_string()),
        workplace_type: Some("remote".to_string()),
        employment_type: Some("full_time".to_string()),
        experience_level: Some("entry".to_string()),
        salary_min: Some(70_000),
        salary_max: Some(90_000),
        posted_at: Some(Utc::now()),
        apply_url: None,
        job_url: None,
        company_url: None,
        description: None,
        applicants: Some(12),
        easy_apply: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test]
    async fn test_insert_and_count() {
        let db = Database::in_memory().await.unwrap();
        let repo = JobRepository::new(db.pool());

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.insert(sample_job("Data Analyst")).await.unwrap();
        repo.insert(sample_job("Backend Engineer")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_orders_missing_posted_at_last() {
        let db = Database::in_memory().await.unwrap();
        let repo = JobRepository::new(db.pool());

        let mut undated = sample_job("Undated");
        undated.posted_at = None;
        repo.insert(undated).await.unwrap();
        repo.insert(sample_job("Dated")).await.unwrap();

        let jobs = repo.list().await.unwrap();
        assert_eq!(jobs[0].job_title, "Dated");
        assert_eq!(jobs[1].job_title, "Undated");
    }

    #[tokio::test]
    async fn test_recent_limits_and_orders() {
        let db = Database::in_memory().await.unwrap();
        let repo = JobRepository::new(db.pool());

        for i in 0..7 {
            repo.insert(sample_job(&format!("Job {}", i))).await.unwrap();
            // created_at resolution is sub-second; nudge the clock
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let recent = repo.recent(5).await.unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].job_title, "Job 6");
    }
}
