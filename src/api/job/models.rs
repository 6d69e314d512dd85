use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Message returned whenever a required creation field is absent
pub const MISSING_FIELDS_MESSAGE: &str = "Something is missing.";

/// Requirements arrive either as a list of tags or as one comma-delimited string
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RequirementsInput {
    Tags(Vec<String>),
    Delimited(String),
}

impl RequirementsInput {
    /// Normalize into the ordered tag sequence that gets stored
    pub fn into_tags(self) -> Vec<String> {
        match self {
            RequirementsInput::Tags(tags) => tags,
            RequirementsInput::Delimited(text) => text.split(',').map(str::to_string).collect(),
        }
    }
}

/// Numeric fields accept a JSON number or its textual form ("5000")
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            NumericInput::Number(value) => Some(*value).filter(|v| v.is_finite()),
            NumericInput::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Whole-number view, rejecting fractions and values outside `i32`
    pub fn to_i32(&self) -> Option<i32> {
        let value = self.to_f64()?;
        if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
            return None;
        }
        Some(value as i32)
    }
}

fn missing() -> ValidationError {
    let mut error = ValidationError::new("required");
    error.message = Some(MISSING_FIELDS_MESSAGE.into());
    error
}

fn requirements_present(value: &RequirementsInput) -> Result<(), ValidationError> {
    match value {
        RequirementsInput::Delimited(text) if text.is_empty() => Err(missing()),
        _ => Ok(()),
    }
}

fn numeric_present(value: &NumericInput) -> Result<(), ValidationError> {
    match value {
        NumericInput::Text(text) if text.is_empty() => Err(missing()),
        _ => Ok(()),
    }
}

/// Job creation payload.
///
/// Every field is optional at the wire level so that absence can be reported
/// with a single message. `null`, a missing key and `""` all count as absent;
/// numeric zero is a provided value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(
        required(message = "Something is missing."),
        length(min = 1, message = "Something is missing.")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Something is missing."),
        length(min = 1, message = "Something is missing.")
    )]
    pub description: Option<String>,
    #[validate(
        required(message = "Something is missing."),
        custom(function = "requirements_present")
    )]
    pub requirements: Option<RequirementsInput>,
    #[validate(
        required(message = "Something is missing."),
        custom(function = "numeric_present")
    )]
    pub salary: Option<NumericInput>,
    #[validate(
        required(message = "Something is missing."),
        length(min = 1, message = "Something is missing.")
    )]
    pub location: Option<String>,
    #[validate(
        required(message = "Something is missing."),
        length(min = 1, message = "Something is missing.")
    )]
    pub job_type: Option<String>,
    #[validate(
        required(message = "Something is missing."),
        custom(function = "numeric_present")
    )]
    pub experience: Option<NumericInput>,
    #[validate(
        required(message = "Something is missing."),
        custom(function = "numeric_present")
    )]
    pub position: Option<NumericInput>,
    #[validate(
        required(message = "Something is missing."),
        length(min = 1, message = "Something is missing.")
    )]
    pub company_id: Option<String>,
}

/// A validated, normalized job ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: f64,
    pub location: String,
    pub job_type: String,
    pub experience_level: i32,
    pub position: i32,
    pub company: Uuid,
    pub created_by: Uuid,
}

/// Stored job with its references left as identifiers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: f64,
    pub location: String,
    pub job_type: String,
    pub experience_level: i32,
    pub position: i32,
    pub company: Uuid,
    #[serde(rename = "created_by")]
    pub created_by: Uuid,
    pub applications: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Company fields exposed on a populated job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Application fields exposed on a populated job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub status: String,
    /// `None` when the applicant record no longer exists
    pub applicant: Option<ApplicantSummary>,
}

/// Job with company and applications expanded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: f64,
    pub location: String,
    pub job_type: String,
    pub experience_level: i32,
    pub position: i32,
    /// `None` when the referenced company does not exist
    pub company: Option<CompanySummary>,
    #[serde(rename = "created_by")]
    pub created_by: Uuid,
    pub applications: Vec<ApplicationSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobDetails {
    /// Expand a stored job with already-resolved company and applications
    pub fn populate(
        job: Job,
        company: Option<CompanySummary>,
        applications: Vec<ApplicationSummary>,
    ) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            requirements: job.requirements,
            salary: job.salary,
            location: job.location,
            job_type: job.job_type,
            experience_level: job.experience_level,
            position: job.position,
            company,
            created_by: job.created_by,
            applications,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}
