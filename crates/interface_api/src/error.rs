//! API error handling
//!
//! Every handler error becomes an `ApiError`, rendered as
//! `{ "error", "message", "details" }`. Storage failures only expose the
//! failing stage; the underlying message is logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_investment::{InvestmentError, StorageStage};
use infra_db::DatabaseError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation { message: String, details: Vec<String> },

    #[error("Storage failure during {stage}")]
    Storage { stage: StorageStage, timed_out: bool },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage { timed_out: true, .. } => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Storage { .. } | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message, details) = match self {
            ApiError::NotFound(msg) => ("not_found", msg, None),
            ApiError::BadRequest(msg) => ("bad_request", msg, None),
            ApiError::Conflict(msg) => ("conflict", msg, None),
            ApiError::Validation { message, details } => {
                ("validation_error", message, (!details.is_empty()).then_some(details))
            }
            ApiError::Storage { stage, timed_out } => {
                let (error_type, message) = if timed_out {
                    ("timeout", "The operation did not complete in time")
                } else {
                    ("storage_error", "The operation could not be completed")
                };
                (error_type, message.to_string(), Some(vec![format!("stage: {}", stage)]))
            }
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg, None),
            ApiError::Internal(msg) => ("internal_error", msg, None),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<InvestmentError> for ApiError {
    fn from(err: InvestmentError) -> Self {
        match err {
            InvestmentError::Validation { ref field, .. } => ApiError::Validation {
                details: vec![field.clone()],
                message: err.to_string(),
            },
            InvestmentError::DifferentFundNotAllowed { .. } => ApiError::Conflict(err.to_string()),
            InvestmentError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            InvestmentError::Storage {
                stage,
                ref message,
                timed_out,
            } => {
                error!(stage = %stage, timed_out, error = %message, "Investment storage failure");
                ApiError::Storage { stage, timed_out }
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::NotFound(msg),
            DatabaseError::DuplicateEntry(msg) => ApiError::Conflict(msg),
            DatabaseError::ForeignKeyViolation(msg) | DatabaseError::ConstraintViolation(msg) => {
                ApiError::BadRequest(msg)
            }
            other if other.is_connection_error() => {
                error!(error = %other, "Database unavailable");
                ApiError::ServiceUnavailable("Database unavailable".to_string())
            }
            other => {
                error!(error = %other, "Database error");
                ApiError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
                format!("{}: {}", field, codes.join(", "))
            })
            .collect();
        details.sort();

        ApiError::Validation {
            message: "Request validation failed".to_string(),
            details,
        }
    }
}
