// src/web/mod.rs
pub mod handlers;
pub mod invalidation;
pub mod types;

pub use types::*;

use crate::auth::{AuthConfig, AuthenticatedUser, OptionalAuth};
use crate::config::IdentitySettings;
use crate::db::Database;
use crate::models::{ApplicationWithJob, Job, Profile, SavedJobWithJob};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, post, routes, Request, Response, State};
use std::path::PathBuf;
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[get("/jobs?<search>&<workplace>&<experience>")]
pub async fn list_jobs(
    search: Option<String>,
    workplace: Option<String>,
    experience: Option<String>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<DataResponse<Vec<Job>>>, Json<StandardErrorResponse>> {
    handlers::list_jobs_handler(search, workplace, experience, auth, db).await
}

#[get("/saved")]
pub async fn list_saved(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<DataResponse<Vec<SavedJobWithJob>>>, Json<StandardErrorResponse>> {
    handlers::list_saved_handler(auth, db).await
}

#[get("/saved/ids")]
pub async fn saved_ids(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<DataResponse<Vec<String>>>, Json<StandardErrorResponse>> {
    handlers::saved_ids_handler(auth, db).await
}

#[post("/saved/toggle", data = "<request>")]
pub async fn toggle_save(
    request: Json<ToggleSaveRequest>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::toggle_save_handler(request, auth, db).await
}

#[delete("/saved/<saved_job_id>")]
pub async fn remove_saved(
    saved_job_id: String,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::remove_saved_handler(saved_job_id, auth, db).await
}

#[get("/applications")]
pub async fn list_applications(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<DataResponse<Vec<ApplicationWithJob>>>, Json<StandardErrorResponse>> {
    handlers::list_applications_handler(auth, db).await
}

#[post("/applications/track", data = "<request>")]
pub async fn track_application(
    request: Json<TrackRequest>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::track_application_handler(request, auth, db).await
}

#[post("/applications/<application_id>/status", data = "<request>")]
pub async fn set_application_status(
    application_id: String,
    request: Json<SetStatusRequest>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::set_status_handler(application_id, request, auth, db).await
}

#[delete("/applications/<application_id>")]
pub async fn delete_application(
    application_id: String,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::delete_application_handler(application_id, auth, db).await
}

#[get("/dashboard")]
pub async fn dashboard(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<DataResponse<DashboardData>>, Json<StandardErrorResponse>> {
    handlers::dashboard_handler(auth, db).await
}

#[get("/profile")]
pub async fn get_profile(auth: AuthenticatedUser) -> Json<DataResponse<Profile>> {
    handlers::get_profile_handler(auth).await
}

#[post("/profile", data = "<request>")]
pub async fn update_profile(
    request: Json<UpdateProfileRequest>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::update_profile_handler(request, auth, db).await
}

#[get("/me")]
pub async fn get_current_user(auth: AuthenticatedUser) -> Json<DataResponse<UserInfo>> {
    handlers::get_current_user_handler(auth).await
}

#[get("/health")]
pub async fn health(auth: OptionalAuth) -> Json<HealthResponse> {
    handlers::health_handler(auth).await
}

#[options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(401)]
pub fn unauthorized() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Authentication required".to_string(),
        "UNAUTHORIZED".to_string(),
        vec!["Sign in and retry with a valid token".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

// Main server start function
pub async fn start_web_server(
    database_path: PathBuf,
    identity: IdentitySettings,
    port: u16,
) -> Result<()> {
    let db = match Database::new(&database_path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e);
        }
    };

    let mut auth_config = AuthConfig::new(identity);
    if let Err(e) = auth_config.update_provider_keys().await {
        error!("Failed to fetch identity provider keys: {}", e);
        return Err(e);
    }

    info!("Starting F1Work job tracker API server");
    info!("Database: {}", database_path.display());
    info!("Server: http://0.0.0.0:{}", port);

    let figment = rocket::Config::figment().merge(("port", port));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(db)
        .manage(auth_config)
        .register("/api", catchers![bad_request, unauthorized, internal_error])
        .mount(
            "/api",
            routes![
                list_jobs,
                list_saved,
                saved_ids,
                toggle_save,
                remove_saved,
                list_applications,
                track_application,
                set_application_status,
                delete_application,
                dashboard,
                get_profile,
                update_profile,
                get_current_user,
                health,
                all_options,
            ],
        )
        .launch()
        .await;

    Ok(())
}
