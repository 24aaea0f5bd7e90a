// src/web/types.rs
use rocket::serde::{Deserialize, Serialize};

use crate::models::ApplicationStatus;
use crate::stats::{BreakdownEntry, StatusCount};

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

/// Response for mutations. `refresh` names the views whose cached data the
/// mutation invalidated, so the client refetches exactly those.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    pub action: String,
    pub refresh: Vec<&'static str>,
}

impl ActionResponse {
    pub fn success(message: String, action: String, refresh: &'static [&'static str]) -> Self {
        Self {
            success: true,
            message,
            action,
            refresh: refresh.to_vec(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ToggleSaveRequest {
    pub job_id: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct TrackRequest {
    pub job_id: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SetStatusRequest {
    pub status: ApplicationStatus,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct UpdateProfileRequest {
    pub full_name: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
}

/// Everything the dashboard renders, assembled server-side in one pass.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DashboardData {
    pub job_count: i64,
    pub application_count: i64,
    pub saved_count: i64,
    pub top_categories: Vec<BreakdownEntry>,
    pub status_breakdown: Vec<StatusCount>,
    pub location_breakdown: Vec<BreakdownEntry>,
    pub recent_jobs: Vec<crate::models::JobSummary>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub authenticated: bool,
}
