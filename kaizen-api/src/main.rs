//! Kaizen API server entry point.
//!
//! Bootstraps configuration, connects explicitly to the backing
//! spreadsheet (failing fast on connection, authorization, or header
//! mismatch), and starts the Axum HTTP server.

use std::sync::Arc;

use axum::Router;
use kaizen_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState, DynRepository};
use kaizen_core::{AttachmentStore, KaizenError, SheetsConfig, TableStore};
use kaizen_sheets::{DriveClient, SheetsClient};
use kaizen_store::IdeaRepository;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let sheets_config = SheetsConfig::from_env().map_err(KaizenError::from)?;
    let api_config = ApiConfig::from_env()?;

    // A store we cannot reach or whose header has drifted is fatal:
    // nothing is served on top of it.
    let client = SheetsClient::connect(&sheets_config).await?;
    let repo: Arc<DynRepository> = Arc::new(IdeaRepository::new(
        Arc::new(client) as Arc<dyn TableStore>,
        sheets_config.cache_ttl,
    ));

    let attachments: Option<Arc<dyn AttachmentStore>> = if sheets_config.drive_folder_id.is_some() {
        Some(Arc::new(DriveClient::new(&sheets_config)?))
    } else {
        tracing::info!("No Drive folder configured; attachment uploads disabled");
        None
    };

    let state = Arc::new(AppState::new(repo, attachments));
    let app: Router = create_api_router(state, &api_config);

    let addr = api_config.bind_addr()?;
    tracing::info!(%addr, "Starting Kaizen API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
