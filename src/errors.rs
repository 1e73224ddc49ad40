use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::storage::PersistenceError;
use crate::validation;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFound(String),
    Persistence(PersistenceError),
    InternalError(String),
}

/// Standard error response format
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type code (e.g., "VALIDATION_ERROR", "NOT_FOUND")
    #[schema(example = "VALIDATION_ERROR")]
    pub error: String,
    /// Human-readable error message
    #[schema(example = "amount: must be a number or numeric string")]
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not found: {msg}"),
            AppError::Persistence(err) => write!(f, "Persistence error: {err}"),
            AppError::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_type, message) = match self {
            AppError::ValidationError(msg) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
            ),
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::Persistence(err) => {
                // Full context stays in the server log; clients get a generic message
                error!(
                    entity = %err.entity,
                    operation = err.operation,
                    id = ?err.id,
                    kind = ?err.kind,
                    "Persistence error: {}",
                    err.detail
                );
                if err.is_constraint_violation() {
                    (
                        actix_web::http::StatusCode::BAD_REQUEST,
                        "CONSTRAINT_VIOLATION",
                        format!(
                            "The {} violates a data constraint (unknown reference or duplicate value)",
                            err.entity
                        ),
                    )
                } else {
                    (
                        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            }
            AppError::InternalError(msg) => {
                error!("Internal error: {msg}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message,
        })
    }
}

impl From<PersistenceError> for AppError {
    fn from(err: PersistenceError) -> Self {
        AppError::Persistence(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(validation::describe(&errors))
    }
}
