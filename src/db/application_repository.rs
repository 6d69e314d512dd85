use std::collections::HashMap;

use sqlx::{Pool, Postgres};
use tracing::debug;
use uuid::Uuid;

use crate::api::job::models::ApplicationSummary;
use crate::db::models::ApplicationSummaryRow;

/// Read-only access to applications submitted against jobs
pub struct ApplicationRepository;

impl ApplicationRepository {
    /// Applications for the given jobs with their applicant's name and email,
    /// grouped by job id and kept in submission order
    pub async fn find_summaries_by_job(
        pool: &Pool<Postgres>,
        job_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ApplicationSummary>>, sqlx::Error> {
        if job_ids.is_empty() {
            return Ok(HashMap::new());
        }

        debug!("Loading applications for {} jobs", job_ids.len());

        let rows = sqlx::query_as::<_, ApplicationSummaryRow>(
            r#"
            SELECT a.id, a.job_id, a.status,
                   u.id AS applicant_id, u.name AS applicant_name, u.email AS applicant_email
            FROM applications a
            LEFT JOIN users u ON u.id = a.applicant_id
            WHERE a.job_id = ANY($1)
            ORDER BY a.created_at ASC
            "#,
        )
        .bind(job_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<ApplicationSummary>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.job_id)
                .or_default()
                .push(ApplicationSummary::from(row));
        }
        Ok(grouped)
    }
}
