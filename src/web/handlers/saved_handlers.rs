// src/web/handlers/saved_handlers.rs
use crate::auth::AuthenticatedUser;
use crate::db::{Database, SavedJobRepository, ToggleOutcome};
use crate::models::SavedJobWithJob;
use crate::web::invalidation::{invalidated_views, Mutation};
use crate::web::types::{ActionResponse, DataResponse, StandardErrorResponse, ToggleSaveRequest};
use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

pub async fn list_saved_handler(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<DataResponse<Vec<SavedJobWithJob>>>, Json<StandardErrorResponse>> {
    let repo = SavedJobRepository::new(db.pool());

    match repo.list(auth.user_id()).await {
        Ok(saved) => Ok(Json(DataResponse::success(
            format!("{} saved jobs", saved.len()),
            saved,
        ))),
        Err(e) => {
            error!("Failed to list saved jobs for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to load saved jobs".to_string(),
                "FETCH_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
            )))
        }
    }
}

pub async fn saved_ids_handler(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<DataResponse<Vec<String>>>, Json<StandardErrorResponse>> {
    let repo = SavedJobRepository::new(db.pool());

    match repo.saved_job_ids(auth.user_id()).await {
        Ok(ids) => Ok(Json(DataResponse::success(
            "Saved job ids".to_string(),
            ids,
        ))),
        Err(e) => {
            error!("Failed to fetch saved job ids for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to load saved job ids".to_string(),
                "FETCH_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
            )))
        }
    }
}

pub async fn toggle_save_handler(
    request: Json<ToggleSaveRequest>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let repo = SavedJobRepository::new(db.pool());

    match repo.toggle(auth.user_id(), &request.job_id).await {
        Ok(ToggleOutcome::Saved) => Ok(Json(ActionResponse::success(
            "Job saved".to_string(),
            "saved".to_string(),
            invalidated_views(Mutation::ToggleSave),
        ))),
        Ok(ToggleOutcome::Removed) => Ok(Json(ActionResponse::success(
            "Removed from saved".to_string(),
            "removed".to_string(),
            invalidated_views(Mutation::ToggleSave),
        ))),
        Err(e) => {
            error!("Failed to toggle saved job for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to update saved job".to_string(),
                "MUTATION_ERROR".to_string(),
                vec!["Try again".to_string()],
            )))
        }
    }
}

pub async fn remove_saved_handler(
    saved_job_id: String,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let repo = SavedJobRepository::new(db.pool());

    match repo.remove(auth.user_id(), &saved_job_id).await {
        Ok(true) => Ok(Json(ActionResponse::success(
            "Removed from saved".to_string(),
            "removed".to_string(),
            invalidated_views(Mutation::RemoveSaved),
        ))),
        Ok(false) => Err(Json(StandardErrorResponse::new(
            "Saved job not found".to_string(),
            "NOT_FOUND".to_string(),
            vec!["Refresh the saved jobs list".to_string()],
        ))),
        Err(e) => {
            error!("Failed to remove saved job for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to remove saved job".to_string(),
                "MUTATION_ERROR".to_string(),
                vec!["Try again".to_string()],
            )))
        }
    }
}
