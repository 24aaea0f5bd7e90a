// src/catalog.rs
//! In-memory filtering of the fetched job catalog. The catalog is fetched
//! in one go and narrowed here, mirroring how the jobs view searches.

use crate::models::Job;

/// Filter parameters for the jobs list. `None` (or "all") leaves that
/// dimension unfiltered.
#[derive(Debug, Default, Clone)]
pub struct JobQuery {
    pub search: Option<String>,
    pub workplace_type: Option<String>,
    pub experience_level: Option<String>,
}

impl JobQuery {
    fn wants(filter: &Option<String>, value: Option<&str>) -> bool {
        match filter.as_deref() {
            None | Some("all") | Some("") => true,
            Some(wanted) => value == Some(wanted),
        }
    }

    fn matches_search(&self, job: &Job) -> bool {
        let needle = match self.search.as_deref() {
            Some(s) if !s.trim().is_empty() => s.trim().to_lowercase(),
            _ => return true,
        };
        let haystacks = [
            Some(job.job_title.as_str()),
            job.company_name.as_deref(),
            job.job_location.as_deref(),
        ];
        haystacks
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches(&self, job: &Job) -> bool {
        self.matches_search(job)
            && Self::wants(&self.workplace_type, job.workplace_type.as_deref())
            && Self::wants(&self.experience_level, job.experience_level.as_deref())
    }
}

pub fn filter_jobs(jobs: Vec<Job>, query: &JobQuery) -> Vec<Job> {
    jobs.into_iter().filter(|job| query.matches(job)).collect()
}
