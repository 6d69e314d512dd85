use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::debug;
use uuid::Uuid;

use crate::api::job::models::{ApplicationSummary, CompanySummary, Job, JobDetails, NewJob};
use crate::db::application_repository::ApplicationRepository;
use crate::db::company_repository::CompanyRepository;
use crate::db::models::JobRow;
use crate::db::store::{JobStore, StoreError};

const JOB_COLUMNS: &str = "id, title, description, requirements, salary, location, job_type, \
     experience_level, position, company_id, created_by, created_at, updated_at";

/// Build an `ILIKE` pattern that matches `keyword` as a literal substring
pub fn keyword_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Attach resolved companies and applications to job rows, keeping row order
pub fn assemble(
    rows: Vec<JobRow>,
    companies: &HashMap<Uuid, CompanySummary>,
    mut applications: HashMap<Uuid, Vec<ApplicationSummary>>,
) -> Vec<JobDetails> {
    rows.into_iter()
        .map(|row| {
            let company = companies.get(&row.company_id).cloned();
            let job_applications = applications.remove(&row.id).unwrap_or_default();
            let application_ids = job_applications.iter().map(|a| a.id).collect();
            JobDetails::populate(row.into_job(application_ids), company, job_applications)
        })
        .collect()
}

/// PostgreSQL-backed job store
pub struct PgJobStore {
    pool: Pool<Postgres>,
}

impl PgJobStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Resolve company and application references for the given rows
    async fn populate(&self, rows: Vec<JobRow>) -> Result<Vec<JobDetails>, StoreError> {
        let company_ids: Vec<Uuid> = rows
            .iter()
            .map(|row| row.company_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let job_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        let companies = CompanyRepository::find_summaries(&self.pool, &company_ids).await?;
        let applications = ApplicationRepository::find_summaries_by_job(&self.pool, &job_ids).await?;

        Ok(assemble(rows, &companies, applications))
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn insert(&self, job: NewJob) -> Result<Job, StoreError> {
        debug!("Creating job: title={}, company={}", job.title, job.company);

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (title, description, requirements, salary, location, job_type,
                              experience_level, position, company_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(job.salary)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(job.experience_level)
        .bind(job.position)
        .bind(job.company)
        .bind(job.created_by)
        .fetch_one(&self.pool)
        .await?;

        debug!("Job created with id={}", row.id);
        Ok(row.into_job(Vec::new()))
    }

    async fn search(&self, keyword: &str) -> Result<Vec<JobDetails>, StoreError> {
        debug!("Searching jobs: keyword={:?}", keyword);

        let rows = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE title ILIKE $1 ESCAPE '\' OR description ILIKE $1 ESCAPE '\'
            ORDER BY created_at DESC
            "#
        ))
        .bind(keyword_pattern(keyword))
        .fetch_all(&self.pool)
        .await?;

        debug!("Keyword search matched {} jobs", rows.len());
        self.populate(rows).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobDetails>, StoreError> {
        debug!("Fetching job: id={}", id);

        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.populate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_creator(&self, creator: Uuid) -> Result<Vec<JobDetails>, StoreError> {
        debug!("Fetching jobs created by {}", creator);

        let rows = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE created_by = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(creator)
        .fetch_all(&self.pool)
        .await?;

        self.populate(rows).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
