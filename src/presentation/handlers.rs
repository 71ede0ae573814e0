use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, instrument, trace, warn};

// Shared state handed to every handler
pub struct AppState {
    pub auth_service: Arc<AuthService>,
}

// Uniform error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: serde_json::Value,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl ApiError {
    fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::NotFound(msg)
            | ApiError::Database(msg) => msg,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        if status.is_server_error() {
            error!(error = %error_msg, status = %status, "Request failed");
        } else {
            warn!(error = %error_msg, status = %status, "Request rejected");
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: error_msg,
            details: serde_json::json!({ "message": self.message() }),
        })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::Validation(msg)) => ApiError::Validation(msg.clone()),
            Some(DomainError::DuplicateEmail(email)) => {
                ApiError::Conflict(format!("Email already registered: {}", email))
            }
            Some(DomainError::InvalidRole(role)) => {
                ApiError::BadRequest(format!("Invalid role: {}", role))
            }
            Some(DomainError::NotFound(msg)) => ApiError::NotFound(msg.clone()),
            None => ApiError::Database(format!("{:#}", err)),
        }
    }
}

/// Turns body deserialization failures (bad JSON, missing fields, wrong
/// types) into validation errors before any handler runs.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        ApiError::Validation(err.to_string()).into()
    })
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Liveness check. Does not touch storage.
#[instrument]
pub async fn root() -> HttpResponse {
    trace!("Liveness check requested");
    HttpResponse::Ok().json(MessageResponse {
        message: "Backend is running!",
    })
}
