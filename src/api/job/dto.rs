use serde::{Deserialize, Serialize};

use super::models::{Job, JobDetails};

/// Response for job creation
#[derive(Serialize)]
pub struct CreatedJobResponse {
    pub success: bool,
    pub message: String,
    pub job: Job,
}

/// Response carrying one populated job
#[derive(Serialize)]
pub struct JobResponse {
    pub success: bool,
    pub job: JobDetails,
}

/// Response carrying a list of populated jobs
#[derive(Serialize)]
pub struct JobsResponse {
    pub success: bool,
    pub jobs: Vec<JobDetails>,
}

/// Query string of the job search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct JobSearchQuery {
    pub keyword: Option<String>,
}
