//! Error handling - every failure becomes the JSON error envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use folio_core::{RepoError, ValidationErrors};
use folio_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to `{success: false, error}`.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Validation(ValidationErrors),
    Duplicate(String),
    MethodNotAllowed(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(what) => write!(f, "Not found: {}", what),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(errors) => write!(f, "{}", errors),
            AppError::Duplicate(msg) => write!(f, "Duplicate key: {}", msg),
            AppError::MethodNotAllowed(method) => write!(f, "Method not allowed: {}", method),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) | AppError::Duplicate(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_client_error() {
            tracing::debug!(error = %self, "Request rejected");
        }

        let error = match self {
            AppError::NotFound(_) => ErrorResponse::not_found(),
            AppError::BadRequest(detail) => ErrorResponse::new(detail.as_str()),
            AppError::Validation(errors) => {
                ErrorResponse::new(errors.to_string()).with_details(errors.errors().to_vec())
            }
            AppError::Duplicate(detail) => ErrorResponse::new(format!("Duplicate key: {detail}")),
            AppError::MethodNotAllowed(_) => ErrorResponse::method_not_allowed(),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("blog".to_string()),
            RepoError::Duplicate(msg) => AppError::Duplicate(msg),
            RepoError::Validation(errors) => AppError::Validation(errors),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
