// src/web/handlers/job_handlers.rs
use crate::auth::AuthenticatedUser;
use crate::catalog::{filter_jobs, JobQuery};
use crate::db::{Database, JobRepository};
use crate::models::Job;
use crate::web::types::{DataResponse, StandardErrorResponse};
use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

pub async fn list_jobs_handler(
    search: Option<String>,
    workplace: Option<String>,
    experience: Option<String>,
    _auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<DataResponse<Vec<Job>>>, Json<StandardErrorResponse>> {
    let repo = JobRepository::new(db.pool());

    let jobs = match repo.list().await {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("Failed to fetch jobs: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Failed to load jobs".to_string(),
                "FETCH_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
            )));
        }
    };

    let query = JobQuery {
        search,
        workplace_type: workplace,
        experience_level: experience,
    };
    let filtered = filter_jobs(jobs, &query);

    Ok(Json(DataResponse::success(
        format!("{} jobs found", filtered.len()),
        filtered,
    )))
}
