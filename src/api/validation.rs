use actix_web::HttpResponse;
use serde::Serialize;

use crate::api::job::models::MISSING_FIELDS_MESSAGE;

/// Failure envelope shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

fn bad_request(body: ErrorResponse) -> actix_web::Error {
    actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().json(body)).into()
}

/// Creates a configured JsonConfig with standardized error handling for the entire project
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default().error_handler(|err, _req| match err {
        actix_web_validator::Error::Validate(validation_errors) => {
            let message = validation_errors
                .field_errors()
                .values()
                .flat_map(|errors| errors.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| MISSING_FIELDS_MESSAGE.to_string());
            bad_request(ErrorResponse::new(message))
        }
        actix_web_validator::Error::Deserialize(de_err) => {
            let detail = de_err.to_string();
            let message = if detail.contains("EOF while parsing") {
                "Request body is empty. Expected JSON payload"
            } else {
                "Invalid JSON format"
            };
            bad_request(ErrorResponse::new(message).with_error(detail))
        }
        other => bad_request(ErrorResponse::new("Invalid request").with_error(other.to_string())),
    })
}
