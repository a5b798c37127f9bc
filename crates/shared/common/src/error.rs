//! Unified error handling for services and HTTP.
//!
//! Provides a single error type that services return and that converts
//! directly into Axum HTTP responses for the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Persistence failure annotated with the intent of the operation
    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        source: Box<AppError>,
    },

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "jwt")]
    #[error("Authentication error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Startup
    #[error("Configuration error: {0}")]
    Config(String),

    // Internal
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Repository { source, .. } => source.code(),
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Repository { source, .. } => source.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Repository { context, source } => {
                format!("{}: {}", context, source.user_message())
            }

            // Hide details for internal/security errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "a database error occurred".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "invalid or expired token".to_string()
            }
            AppError::Config(msg) | AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "an internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    /// Whether this is the bare not-found kind (not wrapped in context).
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(entity))
    }
}

/// Extension trait for annotating failures with the operation's intent.
pub trait ResultExt<T> {
    /// Wrap any error as a repository failure under `context`.
    fn context(self, context: &'static str) -> AppResult<T>;

    /// Like [`ResultExt::context`], but a bare not-found error passes through
    /// untouched so callers can still match on it.
    fn context_unless_not_found(self, context: &'static str) -> AppResult<T>;
}

impl<T> ResultExt<T> for AppResult<T> {
    fn context(self, context: &'static str) -> AppResult<T> {
        self.map_err(|source| AppError::repository(context, source))
    }

    fn context_unless_not_found(self, context: &'static str) -> AppResult<T> {
        self.map_err(|source| {
            if source.is_not_found() {
                source
            } else {
                AppError::repository(context, source)
            }
        })
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn repository(context: &'static str, source: AppError) -> Self {
        AppError::Repository {
            context,
            source: Box::new(source),
        }
    }
}

#[cfg(feature = "database")]
impl AppError {
    /// Map a failed write, surfacing unique-key violations as conflicts.
    pub fn from_write(err: sea_orm::DbErr, entity: &str) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(entity),
            _ => AppError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn context_keeps_the_cause_inspectable() {
        let result: AppResult<()> = Err(AppError::internal("connection reset"));

        let err = result.context("could not save reservation").unwrap_err();

        assert_eq!(
            err.to_string(),
            "could not save reservation: Internal server error: connection reset"
        );
        let source = err.source().expect("wrapped error keeps its source");
        assert_eq!(source.to_string(), "Internal server error: connection reset");
    }

    #[test]
    fn not_found_passes_through_unwrapped() {
        let result: AppResult<()> = Err(AppError::not_found("reservation"));

        let err = result
            .context_unless_not_found("could not remove reservation")
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref entity) if entity == "reservation"));
    }

    #[test]
    fn wrapped_errors_take_the_status_of_their_cause() {
        let err = AppError::repository("could not save user", AppError::conflict("user"));

        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "CONFLICT");
        assert_eq!(err.user_message(), "could not save user: user already exists");
    }

    #[test]
    fn internal_details_are_hidden_from_clients() {
        let err = AppError::repository("could not list all users", AppError::internal("boom"));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.user_message(),
            "could not list all users: an internal error occurred"
        );
    }

    #[test]
    fn domain_errors_are_client_errors() {
        let err: AppError = DomainError::UnknownReservationType(9).into();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.user_message(),
            "reservation type must be between 1 and 3, got 9"
        );
    }
}
