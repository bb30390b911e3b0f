//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::validation::{ValidationFailure, ViolationKind};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("Validation failed: {0}")]
    Validation(ValidationFailure),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Infrastructure
    #[error("Database error")]
    Database(#[from] DbErr),

    #[error("Storage operation timed out")]
    Timeout,

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Timeout => "TIMEOUT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(_) => "One or more validation errors occurred".to_string(),
            AppError::BadRequest(msg) => msg.clone(),

            // Hide details for infrastructure errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Timeout => {
                tracing::error!("Storage operation timed out");
                "The storage backend did not respond in time".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    /// Whether this error comes from the storage layer rather than the request
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            AppError::Database(_) | AppError::Timeout | AppError::Internal(_)
        )
    }

    /// Map a record-level "employee does not exist" validation outcome to `NotFound`
    pub fn employee_not_found_as_not_found(self) -> Self {
        match self {
            AppError::Validation(failure) if failure.contains(&ViolationKind::EmployeeNotFound) => {
                AppError::NotFound
            }
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errors = match &self {
            AppError::Validation(failure) => Some(failure.errors()),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                errors,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Classify a write error: unique violations become `Conflict(entity)`
    pub fn from_write(err: DbErr, entity: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!(%detail, "unique constraint violated");
                AppError::conflict(entity)
            }
            _ => AppError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Violation;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("Benefit enrollment").status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Validation(ValidationFailure::default()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_message() {
        assert_eq!(
            AppError::conflict("Benefit enrollment").to_string(),
            "Benefit enrollment already exists"
        );
    }

    #[test]
    fn test_employee_not_found_maps_to_not_found() {
        let err = AppError::Validation(Violation::employee_not_found().into());
        assert!(matches!(err.employee_not_found_as_not_found(), AppError::NotFound));

        let err = AppError::Validation(Violation::field_required("Address1").into());
        assert!(matches!(
            err.employee_not_found_as_not_found(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_infrastructure_classification() {
        assert!(AppError::Timeout.is_infrastructure());
        assert!(AppError::Database(DbErr::Custom("down".to_string())).is_infrastructure());
        assert!(!AppError::NotFound.is_infrastructure());
        assert!(!AppError::Validation(ValidationFailure::default()).is_infrastructure());
    }
}
