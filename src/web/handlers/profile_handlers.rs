// src/web/handlers/profile_handlers.rs
use crate::auth::AuthenticatedUser;
use crate::db::{Database, ProfileRepository};
use crate::models::Profile;
use crate::web::invalidation::{invalidated_views, Mutation};
use crate::web::types::{
    ActionResponse, DataResponse, StandardErrorResponse, UpdateProfileRequest,
};
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn get_profile_handler(
    auth: AuthenticatedUser,
) -> Json<DataResponse<Profile>> {
    // the guard already loaded (or created) the row
    Json(DataResponse::success(
        "Profile".to_string(),
        auth.profile.clone(),
    ))
}

pub async fn update_profile_handler(
    request: Json<UpdateProfileRequest>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let repo = ProfileRepository::new(db.pool());

    match repo
        .update_full_name(auth.user_id(), &request.full_name)
        .await
    {
        Ok(true) => {
            info!("Profile updated for {}", auth.email());
            Ok(Json(ActionResponse::success(
                "Profile updated".to_string(),
                "profile_updated".to_string(),
                invalidated_views(Mutation::UpdateProfile),
            )))
        }
        Ok(false) => Err(Json(StandardErrorResponse::new(
            "Profile not found".to_string(),
            "NOT_FOUND".to_string(),
            vec!["Sign out and back in to recreate your profile".to_string()],
        ))),
        Err(e) => {
            error!("Failed to update profile for {}: {}", auth.email(), e);
            Err(Json(StandardErrorResponse::new(
                "Failed to update profile".to_string(),
                "MUTATION_ERROR".to_string(),
                vec!["Try again".to_string()],
            )))
        }
    }
}
