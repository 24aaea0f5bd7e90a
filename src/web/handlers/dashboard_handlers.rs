// src/web/handlers/dashboard_handlers.rs
use crate::auth::AuthenticatedUser;
use crate::db::{ApplicationRepository, Database, JobRepository, SavedJobRepository};
use crate::stats;
use crate::web::types::{DashboardData, DataResponse, StandardErrorResponse};
use anyhow::Result;
use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

/// One pass over the store assembling everything the dashboard renders.
/// Scalar counts are independent COUNT queries, never derived from the
/// breakdown rows. Job-level stats are global; application and saved
/// counts are the caller's own.
async fn assemble(db: &Database, user_id: &str) -> Result<DashboardData> {
    let jobs = JobRepository::new(db.pool());
    let applications = ApplicationRepository::new(db.pool());
    let saved = SavedJobRepository::new(db.pool());

    let job_count = jobs.count().await?;
    let application_count = applications.count(user_id).await?;
    let saved_count = saved.count(user_id).await?;

    let categories = jobs.categories().await?;
    let locations = jobs.location_sample().await?;
    let statuses = applications.statuses(user_id).await?;
    let recent_jobs = jobs.recent(5).await?;

    Ok(DashboardData {
        job_count,
        application_count,
        saved_count,
        top_categories: stats::category_breakdown(&categories),
        status_breakdown: stats::status_breakdown(&statuses),
        location_breakdown: stats::location_breakdown(&locations),
        recent_jobs,
    })
}

pub async fn dashboard_handler(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<DataResponse<DashboardData>>, Json<StandardErrorResponse>> {
    match assemble(db, auth.user_id()).await {
        Ok(data) => Ok(Json(DataResponse::success(
            "Dashboard statistics".to_string(),
            data,
        ))),
        Err(e) => {
            error!("Failed to assemble dashboard for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to load dashboard".to_string(),
                "FETCH_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::jobs::sample_job;
    use crate::db::TrackOutcome;
    use crate::models::ApplicationStatus;

    #[tokio::test]
    async fn test_assemble_scopes_user_tables_and_counts_globally() {
        let db = Database::in_memory().await.unwrap();
        let jobs = JobRepository::new(db.pool());

        let mut sf = sample_job("Platform Engineer");
        sf.job_location = Some("San Francisco, CA".to_string());
        sf.category = Some("Infrastructure".to_string());
        let sf = jobs.insert(sf).await.unwrap();
        let ny = jobs.insert(sample_job("Data Analyst")).await.unwrap();

        let applications = ApplicationRepository::new(db.pool());
        let app = match applications.track("user-1", &sf.id).await.unwrap() {
            TrackOutcome::Created(app) => app,
            _ => unreachable!(),
        };
        applications
            .set_status("user-1", &app.id, ApplicationStatus::Applied)
            .await
            .unwrap();
        applications.track("user-2", &ny.id).await.unwrap();

        SavedJobRepository::new(db.pool())
            .toggle("user-1", &ny.id)
            .await
            .unwrap();

        let data = assemble(&db, "user-1").await.unwrap();
        assert_eq!(data.job_count, 2);
        assert_eq!(data.application_count, 1); // user-2's row not counted
        assert_eq!(data.saved_count, 1);
        assert_eq!(data.recent_jobs.len(), 2);

        assert_eq!(data.status_breakdown.len(), 1);
        assert_eq!(data.status_breakdown[0].status, ApplicationStatus::Applied);

        let names: Vec<&str> = data
            .top_categories
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert!(names.contains(&"Infrastructure"));
        assert!(names.contains(&"Software Engineering"));

        let locations: Vec<&str> = data
            .location_breakdown
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert!(locations.contains(&"San Francisco"));
        assert!(locations.contains(&"New York"));
    }
}
