use std::collections::HashMap;

use sqlx::{Pool, Postgres};
use tracing::debug;
use uuid::Uuid;

use crate::api::job::models::CompanySummary;
use crate::db::models::CompanySummaryRow;

/// Read-only access to the company fields shown on jobs
pub struct CompanyRepository;

impl CompanyRepository {
    /// Fetch name, location and industry for every id in `ids`, keyed by id.
    /// Unknown ids are simply absent from the map.
    pub async fn find_summaries(
        pool: &Pool<Postgres>,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, CompanySummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        debug!("Loading {} company summaries", ids.len());

        let rows = sqlx::query_as::<_, CompanySummaryRow>(
            r#"
            SELECT id, name, location, industry
            FROM companies
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.id, CompanySummary::from(row)))
            .collect())
    }
}
