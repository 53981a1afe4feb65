//! Error types for Kaizen operations.

use thiserror::Error;

/// Remote table (spreadsheet service) errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SheetsError {
    #[error("Failed to reach the spreadsheet service: {reason}")]
    Connection { reason: String },

    #[error("Spreadsheet service rejected the credentials: {message}")]
    Authorization { message: String },

    #[error("Request to {endpoint} failed with status {status}: {message}")]
    RequestFailed {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Invalid response from the spreadsheet service: {reason}")]
    InvalidResponse { reason: String },

    #[error("Worksheet {worksheet} not found in spreadsheet {spreadsheet_id}")]
    WorksheetNotFound {
        worksheet: String,
        spreadsheet_id: String,
    },

    #[error("Remote header mismatch at column {column}: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        column: usize,
        expected: String,
        found: Option<String>,
    },
}

/// Validation errors on submitted data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Unsupported attachment type: {extension} (allowed: jpg, jpeg, png)")]
    UnsupportedAttachmentType { extension: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Attachment upload errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("Attachment storage is not configured")]
    NotConfigured,

    #[error("Attachment upload failed: {reason}")]
    UploadFailed { reason: String },
}

/// Master error type for all Kaizen errors.
#[derive(Debug, Clone, Error)]
pub enum KaizenError {
    #[error("Sheets error: {0}")]
    Sheets(#[from] SheetsError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Attachment error: {0}")]
    Attachment(#[from] AttachmentError),
}

/// Result type alias for Kaizen operations.
pub type KaizenResult<T> = Result<T, KaizenError>;
