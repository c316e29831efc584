//! Error Types
//!
//! Layered error types with HTTP status code mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Domain-level errors representing business rule violations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Track is too short to record playback ({duration_secs}s, minimum {min_secs}s)")]
    TrackTooShort { duration_secs: i32, min_secs: i32 },

    #[error("Track played too frequently: {plays} plays within the last {window_secs}s")]
    PlaybackThrottled { plays: i64, window_secs: i64 },
}

/// Repository-level errors for data access failures
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Data mapping error: {0}")]
    Mapping(String),
}

/// PostgreSQL SQLSTATE for `unique_violation`
const PG_UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return Self::UniqueViolation(constraint);
            }
        }
        Self::Database(err)
    }
}

/// Audio blob storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("Stored file not found: {0}")]
    NotFound(String),
}

/// Password hashing failures
#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHashError(pub String);

/// Use case-level errors for application logic failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),
}

impl UseCaseError {
    /// Shorthand for a `NotFound` error
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    /// Shorthand for a single-message validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Conflict(_) | Self::Repository(RepositoryError::UniqueViolation(_)) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Domain(DomainError::LimitExceeded(_) | DomainError::TrackTooShort { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Domain(DomainError::PlaybackThrottled { .. }) => StatusCode::TOO_MANY_REQUESTS,
            Self::Repository(_) | Self::Storage(_) | Self::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::Domain(DomainError::Validation(_)) => "VALIDATION_ERROR",
            Self::NotFound { .. } | Self::Storage(StorageError::NotFound(_)) => "NOT_FOUND",
            Self::Conflict(_) | Self::Repository(RepositoryError::UniqueViolation(_)) => "CONFLICT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            Self::Domain(DomainError::LimitExceeded(_)) => "LIMIT_EXCEEDED",
            Self::Domain(DomainError::TrackTooShort { .. }) => "TRACK_TOO_SHORT",
            Self::Domain(DomainError::PlaybackThrottled { .. }) => "PLAYBACK_THROTTLED",
            Self::Repository(_) | Self::Storage(_) | Self::PasswordHash(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error is caused by infrastructure rather than the caller
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level error for validation errors
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl ErrorResponse {
    /// Build an error body stamped with the current time
    #[must_use]
    pub fn new(code: &str, message: String, details: Option<Vec<FieldError>>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
            request_id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Split a `"field: message"` validation entry into its parts
fn to_field_error(entry: &str) -> FieldError {
    match entry.split_once(": ") {
        Some((field, message)) if !field.contains(' ') => FieldError {
            field: field.to_string(),
            message: message.to_string(),
        },
        _ => FieldError {
            field: String::new(),
            message: entry.to_string(),
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ApiError::UseCase(uc_error) => {
                if uc_error.is_internal() {
                    tracing::error!(error = %uc_error, "Request failed with internal error");
                }
                let details = if let UseCaseError::Validation(errors) = uc_error {
                    Some(errors.iter().map(|e| to_field_error(e)).collect())
                } else {
                    None
                };
                let message = if uc_error.is_internal() {
                    "An unexpected error occurred".to_string()
                } else {
                    uc_error.to_string()
                };
                (uc_error.status_code(), uc_error.error_code(), message, details)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None),
            ApiError::InvalidUuid(msg) => (StatusCode::BAD_REQUEST, "INVALID_UUID", msg.clone(), None),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse::new(code, message, details))).into_response()
    }
}

impl From<uuid::Error> for ApiError {
    fn from(err: uuid::Error) -> Self {
        ApiError::InvalidUuid(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map_or("invalid", |m| m.as_ref())
                    )
                })
            })
            .collect();
        ApiError::UseCase(UseCaseError::Validation(messages))
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::UseCase(UseCaseError::Domain(err))
    }
}
