//! Persistence port for jobs.
//!
//! Read operations return fully populated jobs: the company reference is
//! resolved to its summary and every application to its status and applicant.
use async_trait::async_trait;
use uuid::Uuid;

use crate::api::job::models::{Job, JobDetails, NewJob};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or mutation failed during execution
    #[error("job store query failed: {0}")]
    Query(#[from] sqlx::Error),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Persist a new job and return it unpopulated
    async fn insert(&self, job: NewJob) -> Result<Job, StoreError>;

    /// Jobs whose title or description contains `keyword` case-insensitively,
    /// most recent first. An empty keyword matches every job.
    async fn search(&self, keyword: &str) -> Result<Vec<JobDetails>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobDetails>, StoreError>;

    /// Jobs created by `creator`, most recent first
    async fn find_by_creator(&self, creator: Uuid) -> Result<Vec<JobDetails>, StoreError>;

    /// Round-trip to the backing store
    async fn ping(&self) -> Result<(), StoreError>;
}
