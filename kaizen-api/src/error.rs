//! Error types for the Kaizen API.
//!
//! `ApiError` is the structured error every endpoint returns, mapped
//! onto an HTTP status by its `ErrorCode`. Domain errors convert in via
//! `From<KaizenError>`; there are no retries anywhere: a failure is
//! reported and the interaction stops.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kaizen_core::{AttachmentError, KaizenError, SheetsError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request contains invalid input data
    InvalidInput,

    /// Required field is missing from request
    MissingField,

    /// Requested idea does not exist
    IdeaNotFound,

    /// The backing spreadsheet service rejected or failed the request
    UpstreamError,

    /// Attachment upload failed
    AttachmentFailed,

    /// The backing spreadsheet service could not be reached
    ServiceUnavailable,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput | ErrorCode::MissingField => StatusCode::BAD_REQUEST,
            ErrorCode::IdeaNotFound => StatusCode::NOT_FOUND,
            ErrorCode::UpstreamError | ErrorCode::AttachmentFailed => StatusCode::BAD_GATEWAY,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(utoipa::ToSchema)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingField,
            format!("Required field missing: {}", field),
        )
    }

    pub fn idea_not_found(id: i64) -> Self {
        Self::new(ErrorCode::IdeaNotFound, format!("Idea {} not found", id))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        }
        (status, Json(self)).into_response()
    }
}

impl From<KaizenError> for ApiError {
    fn from(err: KaizenError) -> Self {
        match &err {
            KaizenError::Validation(ValidationError::RequiredFieldMissing { field }) => {
                ApiError::missing_field(field)
            }
            KaizenError::Validation(_) => ApiError::invalid_input(err.to_string()),
            KaizenError::Sheets(SheetsError::Connection { .. }) => {
                ApiError::new(ErrorCode::ServiceUnavailable, err.to_string())
            }
            KaizenError::Sheets(_) => ApiError::new(ErrorCode::UpstreamError, err.to_string()),
            KaizenError::Attachment(AttachmentError::NotConfigured) => {
                ApiError::invalid_input(err.to_string())
            }
            KaizenError::Attachment(_) => ApiError::new(ErrorCode::AttachmentFailed, err.to_string()),
            KaizenError::Config(_) => ApiError::internal_error(err.to_string()),
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
