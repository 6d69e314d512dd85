use std::sync::Arc;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::api::validation::ErrorResponse;
use crate::db::{JobStore, StoreError};
use super::models::{CreateJobRequest, Job, JobDetails, MISSING_FIELDS_MESSAGE, NewJob, NumericInput};

pub const JOBS_NOT_FOUND_MESSAGE: &str = "Jobs not found.";
pub const JOB_NOT_FOUND_MESSAGE: &str = "Job not found.";

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Required input missing or unusable (400)
    #[error("{0}")]
    Validation(String),

    /// No matching record, including empty result sets (404)
    #[error("{0}")]
    NotFound(&'static str),

    /// A reference identifier could not be parsed (500)
    #[error("invalid reference for {field}: {value:?}")]
    InvalidReference { field: &'static str, value: String },

    /// Persistence failure (500)
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidReference { .. } | ServiceError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ServiceError::Validation(msg) => {
                warn!("Validation error: {}", msg);
                ErrorResponse::new(msg.clone())
            }
            ServiceError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                ErrorResponse::new(*msg)
            }
            // Detail is forwarded to the client as-is
            ServiceError::InvalidReference { .. } | ServiceError::Store(_) => {
                error!("Internal error: {}", self);
                ErrorResponse::new("Internal Server Error").with_error(self.to_string())
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Job service containing business logic
pub struct JobService {
    store: Arc<dyn JobStore>,
}

impl JobService {
    /// Create a new JobService over an already-connected store
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn JobStore> {
        &self.store
    }

    /// Create a job owned by `actor`
    ///
    /// # Business Logic
    /// - Rejects the payload before any write if a required field is absent
    /// - Splits comma-delimited requirements, coerces numeric fields
    /// - Writes exactly one job record
    ///
    /// Not idempotent: every call creates a distinct job.
    pub async fn create_job(&self, payload: CreateJobRequest, actor: Uuid) -> Result<Job, ServiceError> {
        let new_job = normalize(payload, actor)?;
        info!("Service: Creating job title={} for actor={}", new_job.title, actor);

        let job = self.store.insert(new_job).await.inspect_err(|e| {
            error!("Service: Failed to create job: {}", e);
        })?;

        info!("Service: Job created successfully with id={}", job.id);
        Ok(job)
    }

    /// Search jobs by keyword over title and description, newest first.
    /// A missing keyword matches every job; an empty result is `NotFound`.
    pub async fn list_jobs(&self, keyword: Option<&str>) -> Result<Vec<JobDetails>, ServiceError> {
        let keyword = keyword.unwrap_or_default();
        info!("Service: Listing jobs keyword={:?}", keyword);

        // Stored text never contains NUL, and Postgres rejects it in parameters
        if keyword.contains('\0') {
            warn!("Service: Keyword contains NUL, no job can match");
            return Err(ServiceError::NotFound(JOBS_NOT_FOUND_MESSAGE));
        }

        let jobs = self.store.search(keyword).await?;
        non_empty(jobs)
    }

    /// Fetch one populated job. Ids that do not parse are treated as unknown.
    pub async fn get_job_by_id(&self, raw_id: &str) -> Result<JobDetails, ServiceError> {
        let Ok(id) = Uuid::parse_str(raw_id) else {
            warn!("Service: Malformed job id {:?}", raw_id);
            return Err(ServiceError::NotFound(JOB_NOT_FOUND_MESSAGE));
        };

        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(JOB_NOT_FOUND_MESSAGE))
    }

    /// Jobs created by `actor`, newest first; an empty result is `NotFound`
    pub async fn list_jobs_by_creator(&self, actor: Uuid) -> Result<Vec<JobDetails>, ServiceError> {
        info!("Service: Listing jobs created by {}", actor);

        let jobs = self.store.find_by_creator(actor).await?;
        non_empty(jobs)
    }
}

fn non_empty(jobs: Vec<JobDetails>) -> Result<Vec<JobDetails>, ServiceError> {
    if jobs.is_empty() {
        return Err(ServiceError::NotFound(JOBS_NOT_FOUND_MESSAGE));
    }
    Ok(jobs)
}

fn number(field: &str, value: &NumericInput) -> Result<f64, ServiceError> {
    value
        .to_f64()
        .ok_or_else(|| ServiceError::Validation(format!("{field} must be a number.")))
}

fn whole_number(field: &str, value: &NumericInput) -> Result<i32, ServiceError> {
    value
        .to_i32()
        .ok_or_else(|| ServiceError::Validation(format!("{field} must be a whole number.")))
}

/// Turn a creation payload into a storable job
fn normalize(payload: CreateJobRequest, actor: Uuid) -> Result<NewJob, ServiceError> {
    if payload.validate().is_err() {
        return Err(ServiceError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    }

    let CreateJobRequest {
        title: Some(title),
        description: Some(description),
        requirements: Some(requirements),
        salary: Some(salary),
        location: Some(location),
        job_type: Some(job_type),
        experience: Some(experience),
        position: Some(position),
        company_id: Some(company_id),
    } = payload
    else {
        return Err(ServiceError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    };

    let salary = number("salary", &salary)?;
    let experience_level = whole_number("experience", &experience)?;
    let position = whole_number("position", &position)?;
    let company = Uuid::parse_str(&company_id).map_err(|_| ServiceError::InvalidReference {
        field: "companyId",
        value: company_id.clone(),
    })?;

    Ok(NewJob {
        title,
        description,
        requirements: requirements.into_tags(),
        salary,
        location,
        job_type,
        experience_level,
        position,
        company,
        created_by: actor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::job::models::{ApplicantSummary, ApplicationSummary, CompanySummary, RequirementsInput};
    use crate::db::store::MockJobStore;
    use chrono::{Duration, Utc};
    use mockall::predicate::eq;
    use rstest::rstest;

    const COMPANY_ID: &str = "5f0c3d8e-8f0a-4d5e-9a57-1f4a6c1f0b11";

    fn make_service(store: MockJobStore) -> JobService {
        JobService::new(Arc::new(store))
    }

    fn payload() -> CreateJobRequest {
        CreateJobRequest {
            title: Some("Backend Engineer".into()),
            description: Some("Build APIs".into()),
            requirements: Some(RequirementsInput::Delimited("node,react".into())),
            salary: Some(NumericInput::Text("120000".into())),
            location: Some("Remote".into()),
            job_type: Some("Full-time".into()),
            experience: Some(NumericInput::Number(3.0)),
            position: Some(NumericInput::Text("2".into())),
            company_id: Some(COMPANY_ID.into()),
        }
    }

    fn stored(new_job: NewJob) -> Job {
        let now = Utc::now();
        Job {
            id: Uuid::new_v4(),
            title: new_job.title,
            description: new_job.description,
            requirements: new_job.requirements,
            salary: new_job.salary,
            location: new_job.location,
            job_type: new_job.job_type,
            experience_level: new_job.experience_level,
            position: new_job.position,
            company: new_job.company,
            created_by: new_job.created_by,
            applications: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn details(title: &str, description: &str, age_minutes: i64) -> JobDetails {
        let created_at = Utc::now() - Duration::minutes(age_minutes);
        let company_id = Uuid::new_v4();
        JobDetails {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            requirements: vec!["rust".into()],
            salary: 100.0,
            location: "Remote".into(),
            job_type: "Full-time".into(),
            experience_level: 1,
            position: 1,
            company: Some(CompanySummary {
                id: company_id,
                name: "Acme".into(),
                location: Some("Berlin".into()),
                industry: Some("Software".into()),
            }),
            created_by: Uuid::new_v4(),
            applications: vec![ApplicationSummary {
                id: Uuid::new_v4(),
                status: "pending".into(),
                applicant: Some(ApplicantSummary {
                    id: Uuid::new_v4(),
                    name: "Ada".into(),
                    email: "ada@example.com".into(),
                }),
            }],
            created_at,
            updated_at: created_at,
        }
    }

    #[actix_web::test]
    async fn create_job_splits_delimited_requirements_and_coerces_numbers() {
        let actor = Uuid::new_v4();
        let mut store = MockJobStore::new();
        store
            .expect_insert()
            .times(1)
            .withf(move |job| {
                job.requirements == vec!["node".to_string(), "react".to_string()]
                    && job.salary == 120000.0
                    && job.experience_level == 3
                    && job.position == 2
                    && job.created_by == actor
                    && job.company.to_string() == COMPANY_ID
            })
            .returning(|job| Ok(stored(job)));

        let job = make_service(store).create_job(payload(), actor).await.expect("job created");

        assert_eq!(job.requirements, vec!["node", "react"]);
        assert_eq!(job.created_by, actor);
        assert!(job.applications.is_empty());
    }

    #[actix_web::test]
    async fn create_job_keeps_requirement_tags_unchanged() {
        let tags = vec!["node".to_string(), "react, redux".to_string()];
        let expected = tags.clone();
        let mut store = MockJobStore::new();
        store
            .expect_insert()
            .times(1)
            .withf(move |job| job.requirements == expected)
            .returning(|job| Ok(stored(job)));

        let mut request = payload();
        request.requirements = Some(RequirementsInput::Tags(tags.clone()));

        let job = make_service(store).create_job(request, Uuid::new_v4()).await.unwrap();
        assert_eq!(job.requirements, tags);
    }

    #[rstest]
    #[case::title(|p: &mut CreateJobRequest| p.title = None)]
    #[case::description(|p: &mut CreateJobRequest| p.description = Some(String::new()))]
    #[case::requirements(|p: &mut CreateJobRequest| p.requirements = None)]
    #[case::salary(|p: &mut CreateJobRequest| p.salary = None)]
    #[case::location(|p: &mut CreateJobRequest| p.location = None)]
    #[case::job_type(|p: &mut CreateJobRequest| p.job_type = Some(String::new()))]
    #[case::experience(|p: &mut CreateJobRequest| p.experience = None)]
    #[case::position(|p: &mut CreateJobRequest| p.position = Some(NumericInput::Text(String::new())))]
    #[case::company_id(|p: &mut CreateJobRequest| p.company_id = None)]
    #[actix_web::test]
    async fn create_job_rejects_missing_field_without_writing(#[case] strip: fn(&mut CreateJobRequest)) {
        let mut store = MockJobStore::new();
        store.expect_insert().never();

        let mut request = payload();
        strip(&mut request);

        let err = make_service(store)
            .create_job(request, Uuid::new_v4())
            .await
            .expect_err("validation failure");

        assert!(matches!(&err, ServiceError::Validation(msg) if msg == MISSING_FIELDS_MESSAGE));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn create_job_accepts_numeric_zero() {
        let mut store = MockJobStore::new();
        store
            .expect_insert()
            .times(1)
            .withf(|job| job.salary == 0.0 && job.experience_level == 0)
            .returning(|job| Ok(stored(job)));

        let mut request = payload();
        request.salary = Some(NumericInput::Number(0.0));
        request.experience = Some(NumericInput::Text("0".into()));

        assert!(make_service(store).create_job(request, Uuid::new_v4()).await.is_ok());
    }

    #[actix_web::test]
    async fn create_job_rejects_unparseable_number() {
        let mut store = MockJobStore::new();
        store.expect_insert().never();

        let mut request = payload();
        request.salary = Some(NumericInput::Text("a lot".into()));

        let err = make_service(store).create_job(request, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg == "salary must be a number."));
    }

    #[actix_web::test]
    async fn create_job_with_malformed_company_id_is_internal_error() {
        let mut store = MockJobStore::new();
        store.expect_insert().never();

        let mut request = payload();
        request.company_id = Some("not-an-id".into());

        let err = make_service(store).create_job(request, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidReference { field: "companyId", .. }));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn create_job_surfaces_store_failure() {
        let mut store = MockJobStore::new();
        store
            .expect_insert()
            .returning(|_| Err(StoreError::Query(sqlx::Error::PoolTimedOut)));

        let err = make_service(store).create_job(payload(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn list_jobs_defaults_to_empty_keyword() {
        let mut store = MockJobStore::new();
        store
            .expect_search()
            .withf(|keyword| keyword.is_empty())
            .times(1)
            .returning(|_| Ok(vec![details("Backend Engineer", "APIs", 0)]));

        let jobs = make_service(store).list_jobs(None).await.unwrap();
        assert_eq!(jobs.len(), 1);
    }

    #[actix_web::test]
    async fn list_jobs_passes_keyword_and_keeps_store_order() {
        let mut store = MockJobStore::new();
        store
            .expect_search()
            .withf(|keyword| keyword == "Engineer")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    details("Frontend Engineer", "UI", 1),
                    details("Backend Engineer", "APIs", 5),
                ])
            });

        let jobs = make_service(store).list_jobs(Some("Engineer")).await.unwrap();
        let titles: Vec<&str> = jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Frontend Engineer", "Backend Engineer"]);
        assert!(jobs.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[actix_web::test]
    async fn list_jobs_with_no_results_is_not_found() {
        let mut store = MockJobStore::new();
        store.expect_search().returning(|_| Ok(Vec::new()));

        let err = make_service(store).list_jobs(Some("nothing")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(JOBS_NOT_FOUND_MESSAGE)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn list_jobs_with_nul_keyword_is_not_found_without_querying() {
        let mut store = MockJobStore::new();
        store.expect_search().never();

        let err = make_service(store).list_jobs(Some("a\0b")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(JOBS_NOT_FOUND_MESSAGE)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn get_job_by_id_returns_populated_job() {
        let job = details("Backend Engineer", "APIs", 0);
        let id = job.id;
        let mut store = MockJobStore::new();
        store
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(job.clone())));

        let found = make_service(store).get_job_by_id(&id.to_string()).await.unwrap();
        let company = found.company.expect("company populated");
        assert_eq!(company.name, "Acme");
        assert_eq!(found.applications[0].applicant.as_ref().unwrap().email, "ada@example.com");
    }

    #[actix_web::test]
    async fn get_job_by_unknown_id_is_not_found() {
        let mut store = MockJobStore::new();
        store.expect_find_by_id().returning(|_| Ok(None));

        let err = make_service(store)
            .get_job_by_id(&Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(JOB_NOT_FOUND_MESSAGE)));
    }

    #[actix_web::test]
    async fn get_job_by_malformed_id_is_not_found_without_querying() {
        let mut store = MockJobStore::new();
        store.expect_find_by_id().never();

        let err = make_service(store).get_job_by_id("12345").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn list_jobs_by_creator_filters_on_actor() {
        let actor = Uuid::new_v4();
        let mut store = MockJobStore::new();
        store
            .expect_find_by_creator()
            .with(eq(actor))
            .times(1)
            .returning(|_| Ok(vec![details("Backend Engineer", "APIs", 0)]));

        let jobs = make_service(store).list_jobs_by_creator(actor).await.unwrap();
        assert_eq!(jobs.len(), 1);
    }

    #[actix_web::test]
    async fn list_jobs_by_creator_with_no_jobs_is_not_found() {
        let mut store = MockJobStore::new();
        store.expect_find_by_creator().returning(|_| Ok(Vec::new()));

        let err = make_service(store).list_jobs_by_creator(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(JOBS_NOT_FOUND_MESSAGE)));
    }
}
