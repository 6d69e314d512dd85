use actix_web::{
    HttpResponse, get, post,
    web::{Data, Path, Query, ServiceConfig, scope},
};
use actix_web_validator::Json;

use crate::api::auth::AuthenticatedUser;
use super::dto::{CreatedJobResponse, JobResponse, JobSearchQuery, JobsResponse};
use super::models::CreateJobRequest;
use super::service::{JobService, ServiceError};

#[post("/post")]
async fn post_job(
    service: Data<JobService>,
    actor: AuthenticatedUser,
    payload: Json<CreateJobRequest>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.create_job(payload.into_inner(), actor.0).await?;
    Ok(HttpResponse::Created().json(CreatedJobResponse {
        success: true,
        message: "New job created successfully.".to_string(),
        job,
    }))
}

#[get("/get")]
async fn get_all_jobs(
    service: Data<JobService>,
    query: Query<JobSearchQuery>,
) -> Result<HttpResponse, ServiceError> {
    let jobs = service.list_jobs(query.keyword.as_deref()).await?;
    Ok(HttpResponse::Ok().json(JobsResponse { success: true, jobs }))
}

#[get("/get/{id}")]
async fn get_job_by_id(
    service: Data<JobService>,
    id: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(JobResponse { success: true, job }))
}

#[get("/getadminjobs")]
async fn get_admin_jobs(
    service: Data<JobService>,
    actor: AuthenticatedUser,
) -> Result<HttpResponse, ServiceError> {
    let jobs = service.list_jobs_by_creator(actor.0).await?;
    Ok(HttpResponse::Ok().json(JobsResponse { success: true, jobs }))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("/api/v1/job")
            .service(post_job)
            .service(get_all_jobs)
            .service(get_job_by_id)
            .service(get_admin_jobs),
    );
}
