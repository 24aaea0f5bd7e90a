// src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A catalog entry. Written only by the import tool; the API never mutates
/// job rows.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: String,
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
    pub easy_apply: bool,
    pub created_at: DateTime<Utc>,
}

/// Column subset shown in the dashboard's latest-jobs table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct JobSummary {
    pub id: String,
    pub job_title: String,
    pub company_name: Option<String>,
    pub category: Option<String>,
    pub job_location: Option<String>,
    pub applicants: Option<i64>,
    pub posted_at: Option<DateTime<Utc>>,
    pub experience_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SavedJob {
    pub id: String,
    pub user_id: String,
    pub job_id: String,
    pub created_at: DateTime<Utc>,
}

/// A saved-jobs row joined with its job, as the saved-jobs view renders it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SavedJobWithJob {
    pub id: String,
    pub job_id: String,
    pub created_at: DateTime<Utc>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub job_location: Option<String>,
    pub workplace_type: Option<String>,
    pub apply_url: Option<String>,
}

/// Stages an application can be in. The set is flat: the UI exposes a free
/// selector, so any status is reachable from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Saved,
    Applied,
    GotEmail,
    InterviewScheduled,
    InterviewDone,
    Offer,
    Rejected,
    NoResponse,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Saved => "saved",
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::GotEmail => "got_email",
            ApplicationStatus::InterviewScheduled => "interview_scheduled",
            ApplicationStatus::InterviewDone => "interview_done",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::NoResponse => "no_response",
        }
    }

    pub fn all() -> &'static [ApplicationStatus] {
        &[
            ApplicationStatus::Saved,
            ApplicationStatus::Applied,
            ApplicationStatus::GotEmail,
            ApplicationStatus::InterviewScheduled,
            ApplicationStatus::InterviewDone,
            ApplicationStatus::Offer,
            ApplicationStatus::Rejected,
            ApplicationStatus::NoResponse,
        ]
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "saved" => Ok(ApplicationStatus::Saved),
            "applied" => Ok(ApplicationStatus::Applied),
            "got_email" => Ok(ApplicationStatus::GotEmail),
            "interview_scheduled" => Ok(ApplicationStatus::InterviewScheduled),
            "interview_done" => Ok(ApplicationStatus::InterviewDone),
            "offer" => Ok(ApplicationStatus::Offer),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "no_response" => Ok(ApplicationStatus::NoResponse),
            other => anyhow::bail!("Unknown application status: {}", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Application {
    pub id: String,
    pub user_id: String,
    pub job_id: String,
    pub status: ApplicationStatus,
    pub applied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An application joined with its job for the pipeline view. The join is a
/// LEFT JOIN so a row survives its job being removed upstream.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ApplicationWithJob {
    pub id: String,
    pub job_id: String,
    pub status: ApplicationStatus,
    pub applied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub job_location: Option<String>,
    pub apply_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub user_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in ApplicationStatus::all() {
            assert_eq!(
                ApplicationStatus::from_str(status.as_str()).unwrap(),
                *status
            );
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!(ApplicationStatus::from_str("ghosted").is_err());
        assert!(ApplicationStatus::from_str("Applied").is_err());
    }

    #[test]
    fn test_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&ApplicationStatus::InterviewScheduled).unwrap();
        assert_eq!(json, "\"interview_scheduled\"");
        let back: ApplicationStatus = serde_json::from_str("\"no_response\"").unwrap();
        assert_eq!(back, ApplicationStatus::NoResponse);
    }
}
