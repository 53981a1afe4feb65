//! Shared application state for Axum routers.

use kaizen_core::{AttachmentStore, TableStore};
use kaizen_store::IdeaRepository;
use std::sync::Arc;
use std::time::Instant;

/// Repository as the routes see it: any `TableStore` behind the seam,
/// so tests can swap in the in-memory table.
pub type DynRepository = IdeaRepository<dyn TableStore>;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// The cached idea repository. Mutations invalidate its snapshot
    /// internally, so routes never touch the cache directly.
    pub repo: Arc<DynRepository>,
    /// Attachment upload client; `None` when no Drive folder is
    /// configured, which disables the attachment path.
    pub attachments: Option<Arc<dyn AttachmentStore>>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(repo: Arc<DynRepository>, attachments: Option<Arc<dyn AttachmentStore>>) -> Self {
        Self {
            repo,
            attachments,
            start_time: Instant::now(),
        }
    }
}
