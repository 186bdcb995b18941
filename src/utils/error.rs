use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::services::booking::{BookingError, RejectionReason};
use crate::services::credentials::CredentialError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Booking rejected for event {event_id}: {reason}")]
    BookingRejected {
        event_id: i64,
        reason: RejectionReason,
    },

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Storage unavailable")]
    StorageUnavailable(sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UsernameTaken(_) => StatusCode::CONFLICT,
            AppError::BookingRejected { reason, .. } => match reason {
                RejectionReason::EventNotFound => StatusCode::NOT_FOUND,
                RejectionReason::InsufficientSeats => StatusCode::CONFLICT,
            },
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::UsernameTaken(_) => "USERNAME_TAKEN",
            AppError::BookingRejected { reason, .. } => match reason {
                RejectionReason::EventNotFound => "EVENT_NOT_FOUND",
                RejectionReason::InsufficientSeats => "INSUFFICIENT_SEATS",
            },
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::UsernameTaken(msg) => {
                warn!(code = self.code(), message = %msg, "Request rejected");
            }
            AppError::BookingRejected { event_id, reason } => {
                debug!(code = self.code(), event_id, %reason, "Booking rejected");
            }
            AppError::InternalServerError(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
            AppError::DatabaseError(e) | AppError::StorageUnavailable(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            // constraint failures will fail the same way on retry
            BookingError::StorageUnavailable(e) if is_constraint_violation(&e) => {
                AppError::DatabaseError(e)
            }
            BookingError::StorageUnavailable(e) => AppError::StorageUnavailable(e),
        }
    }
}

fn is_constraint_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_foreign_key_violation() || db.is_check_violation() || db.is_unique_violation()
        }
        _ => false,
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::UsernameTaken(name) => AppError::UsernameTaken(name),
            CredentialError::Hashing(msg) => AppError::InternalServerError(msg),
            CredentialError::Storage(e) => AppError::DatabaseError(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        // Only expose high-level message to the client
        let (public_message, details) = match &self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => (msg.clone(), None),
            AppError::UsernameTaken(_) => ("Username already exists".to_string(), None),
            AppError::BookingRejected { event_id, reason } => {
                (reason.to_string(), Some(json!({ "event_id": event_id })))
            }
            AppError::DatabaseError(_) => ("A database error occurred".to_string(), None),
            AppError::StorageUnavailable(_) => {
                ("Storage is temporarily unavailable, please retry".to_string(), None)
            }
            AppError::InternalServerError(_) => ("Internal server error".to_string(), None),
        };

        error_response(code, public_message, details, status)
    }
}
