//! Core data types for the Kaizen idea tracker.
//!
//! This crate holds everything the rest of the workspace agrees on:
//! the column schema of the backing sheet, the loosely-typed record
//! representation, the status enumeration, the error taxonomy, and the
//! async traits that seam the repository from the remote clients.
//! No I/O happens here.

pub mod config;
pub mod error;
pub mod record;
pub mod schema;
pub mod status;
pub mod table;

pub use config::SheetsConfig;
pub use error::{
    AttachmentError, ConfigError, KaizenError, KaizenResult, SheetsError, ValidationError,
};
pub use record::IdeaRecord;
pub use schema::Field;
pub use status::Status;
pub use table::{AttachmentStore, TableStore};
