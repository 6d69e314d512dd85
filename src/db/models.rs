use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::api::job::models::{ApplicantSummary, ApplicationSummary, CompanySummary, Job};

/// Database representation of a job with all fields
#[derive(Debug, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: f64,
    pub location: String,
    pub job_type: String,
    pub experience_level: i32,
    pub position: i32,
    pub company_id: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRow {
    pub fn into_job(self, applications: Vec<Uuid>) -> Job {
        Job {
            id: self.id,
            title: self.title,
            description: self.description,
            requirements: self.requirements,
            salary: self.salary,
            location: self.location,
            job_type: self.job_type,
            experience_level: self.experience_level,
            position: self.position,
            company: self.company_id,
            created_by: self.created_by,
            applications,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct CompanySummaryRow {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub industry: Option<String>,
}

impl From<CompanySummaryRow> for CompanySummary {
    fn from(row: CompanySummaryRow) -> Self {
        CompanySummary {
            id: row.id,
            name: row.name,
            location: row.location,
            industry: row.industry,
        }
    }
}

/// Application joined to its applicant; applicant columns are null when the
/// user record is gone
#[derive(Debug, FromRow)]
pub struct ApplicationSummaryRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub applicant_id: Option<Uuid>,
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
}

impl From<ApplicationSummaryRow> for ApplicationSummary {
    fn from(row: ApplicationSummaryRow) -> Self {
        let applicant = match (row.applicant_id, row.applicant_name, row.applicant_email) {
            (Some(id), Some(name), Some(email)) => Some(ApplicantSummary { id, name, email }),
            _ => None,
        };
        ApplicationSummary {
            id: row.id,
            status: row.status,
            applicant,
        }
    }
}
