// src/web/handlers/application_handlers.rs
use crate::auth::AuthenticatedUser;
use crate::db::{ApplicationRepository, Database, TrackOutcome};
use crate::models::ApplicationWithJob;
use crate::web::invalidation::{invalidated_views, Mutation};
use crate::web::types::{
    ActionResponse, DataResponse, SetStatusRequest, StandardErrorResponse, TrackRequest,
};
use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

pub async fn list_applications_handler(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<DataResponse<Vec<ApplicationWithJob>>>, Json<StandardErrorResponse>> {
    let repo = ApplicationRepository::new(db.pool());

    match repo.list(auth.user_id()).await {
        Ok(applications) => Ok(Json(DataResponse::success(
            format!("{} applications", applications.len()),
            applications,
        ))),
        Err(e) => {
            error!("Failed to list applications for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to load applications".to_string(),
                "FETCH_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
            )))
        }
    }
}

/// Start tracking a job, whether from the catalog or by promoting a
/// bookmark. A duplicate is answered as an informational outcome, not an
/// error, so the client can show "already tracked" instead of a failure.
pub async fn track_application_handler(
    request: Json<TrackRequest>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let repo = ApplicationRepository::new(db.pool());

    match repo.track(auth.user_id(), &request.job_id).await {
        Ok(TrackOutcome::Created(_)) => Ok(Json(ActionResponse::success(
            "Added to applications".to_string(),
            "tracked".to_string(),
            invalidated_views(Mutation::Track),
        ))),
        Ok(TrackOutcome::AlreadyTracked) => Ok(Json(ActionResponse::success(
            "Already in your applications".to_string(),
            "already_tracked".to_string(),
            &[],
        ))),
        Err(e) => {
            error!("Failed to track job for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to add application".to_string(),
                "MUTATION_ERROR".to_string(),
                vec!["Try again".to_string()],
            )))
        }
    }
}

pub async fn set_status_handler(
    application_id: String,
    request: Json<SetStatusRequest>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let repo = ApplicationRepository::new(db.pool());

    match repo
        .set_status(auth.user_id(), &application_id, request.status)
        .await
    {
        Ok(true) => Ok(Json(ActionResponse::success(
            "Status updated".to_string(),
            "status_updated".to_string(),
            invalidated_views(Mutation::SetStatus),
        ))),
        Ok(false) => Err(Json(StandardErrorResponse::new(
            "Application not found".to_string(),
            "NOT_FOUND".to_string(),
            vec!["Refresh the applications list".to_string()],
        ))),
        Err(e) => {
            error!("Failed to update status for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to update status".to_string(),
                "MUTATION_ERROR".to_string(),
                vec!["Try again".to_string()],
            )))
        }
    }
}

pub async fn delete_application_handler(
    application_id: String,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let repo = ApplicationRepository::new(db.pool());

    match repo.delete(auth.user_id(), &application_id).await {
        Ok(true) => Ok(Json(ActionResponse::success(
            "Application removed".to_string(),
            "deleted".to_string(),
            invalidated_views(Mutation::DeleteApplication),
        ))),
        Ok(false) => Err(Json(StandardErrorResponse::new(
            "Application not found".to_string(),
            "NOT_FOUND".to_string(),
            vec!["Refresh the applications list".to_string()],
        ))),
        Err(e) => {
            error!("Failed to delete application for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to remove application".to_string(),
                "MUTATION_ERROR".to_string(),
                vec!["Try again".to_string()],
            )))
        }
    }
}
