// src/web/invalidation.rs
//! The single mutation-to-views map. Every mutation response names exactly
//! the views whose data it touched; nothing invalidates globally.

pub mod views {
    pub const JOBS: &str = "jobs";
    pub const SAVED_JOBS: &str = "saved_jobs";
    pub const SAVED_JOB_IDS: &str = "saved_job_ids";
    pub const SAVED_COUNT: &str = "saved_count";
    pub const APPLICATIONS: &str = "applications";
    pub const APP_COUNT: &str = "app_count";
    pub const PROFILE: &str = "profile";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    ToggleSave,
    RemoveSaved,
    Track,
    SetStatus,
    DeleteApplication,
    UpdateProfile,
}

pub fn invalidated_views(mutation: Mutation) -> &'static [&'static str] {
    use views::*;
    match mutation {
        Mutation::ToggleSave => &[SAVED_JOB_IDS, SAVED_JOBS, SAVED_COUNT],
        Mutation::RemoveSaved => &[SAVED_JOBS, SAVED_JOB_IDS, SAVED_COUNT],
        Mutation::Track => &[APPLICATIONS, APP_COUNT],
        Mutation::SetStatus => &[APPLICATIONS],
        Mutation::DeleteApplication => &[APPLICATIONS, APP_COUNT],
        Mutation::UpdateProfile => &[PROFILE],
    }
}
