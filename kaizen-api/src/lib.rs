//! REST API layer for the Kaizen idea tracker.
//!
//! Wires the cached idea repository and the optional attachment client
//! into an Axum router: list/filter, submit, edit, delete, cache
//! refresh, health, and the OpenAPI document.

pub mod config;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod types;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use state::{AppState, DynRepository};
