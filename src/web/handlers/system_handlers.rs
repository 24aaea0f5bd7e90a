// src/web/handlers/system_handlers.rs
use crate::auth::{AuthenticatedUser, OptionalAuth};
use crate::web::types::{DataResponse, HealthResponse, UserInfo};
use rocket::serde::json::Json;

pub async fn get_current_user_handler(auth: AuthenticatedUser) -> Json<DataResponse<UserInfo>> {
    Json(DataResponse::success(
        "User authenticated successfully".to_string(),
        UserInfo {
            id: auth.identity.id.clone(),
            email: auth.identity.email.clone(),
            full_name: auth.profile.full_name.clone(),
        },
    ))
}

pub async fn health_handler(auth: OptionalAuth) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "ok".to_string(),
        authenticated: auth.user.is_some(),
    })
}
