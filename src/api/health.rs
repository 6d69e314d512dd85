use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use tracing::error;

use crate::api::job::JobService;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Probe the store and report `ok_status` or 503 with `failed_status`
async fn check_store(service: &JobService, ok_status: &'static str, failed_status: &'static str) -> HttpResponse {
    match service.store().ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: ok_status,
            database: "connected",
            error: None,
        }),
        Err(e) => {
            error!("{} check failed: {}", ok_status, e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: failed_status,
                database: "disconnected",
                error: Some(e.to_string()),
            })
        }
    }
}

/// General health check including database connectivity
#[get("/health")]
async fn health_check(service: web::Data<JobService>) -> impl Responder {
    check_store(&service, "healthy", "unhealthy").await
}

/// Readiness probe: 503 while the database is unreachable
#[get("/ready")]
async fn readiness_check(service: web::Data<JobService>) -> impl Responder {
    check_store(&service, "ready", "not_ready").await
}

/// Liveness probe; does not touch dependencies
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "alive",
        database: "not_checked",
        error: None,
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::db::StoreError;
    use crate::db::store::MockJobStore;

    #[actix_web::test]
    async fn health_reports_connected_store() {
        let mut store = MockJobStore::new();
        store.expect_ping().returning(|| Ok(()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(JobService::new(Arc::new(store))))
                .configure(health_config),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"status": "healthy", "database": "connected"}));
    }

    #[actix_web::test]
    async fn readiness_fails_when_store_unreachable() {
        let mut store = MockJobStore::new();
        store
            .expect_ping()
            .returning(|| Err(StoreError::Query(sqlx::Error::PoolClosed)));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(JobService::new(Arc::new(store))))
                .configure(health_config),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/ready").to_request()).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], json!("not_ready"));
    }

    #[actix_web::test]
    async fn liveness_skips_store() {
        let mut store = MockJobStore::new();
        store.expect_ping().never();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(JobService::new(Arc::new(store))))
                .configure(health_config),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/live").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
