//! Idea REST API routes.
//!
//! List/filter, submit, edit, delete, plus the explicit cache refresh
//! the dashboard's reload button triggers. Handlers stay thin: all
//! table semantics live in the repository, which invalidates its own
//! cache on every mutation.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use base64::Engine;
use std::sync::Arc;

use kaizen_core::{AttachmentError, Field, IdeaRecord, KaizenError, ValidationError};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    types::{
        AttachmentUpload, IdeaResponse, ListIdeasQuery, ListIdeasResponse, SubmitIdeaRequest,
        UpdateIdeaRequest,
    },
};

/// File extensions the attachment path accepts.
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/ideas - List ideas with optional exact-match filters
#[utoipa::path(
    get,
    path = "/api/v1/ideas",
    tag = "Ideas",
    params(
        ("status" = Option<String>, Query, description = "Filter by exact status text"),
        ("area" = Option<String>, Query, description = "Filter by exact application area"),
    ),
    responses(
        (status = 200, description = "Filtered idea list", body = ListIdeasResponse),
        (status = 502, description = "Backing store failure", body = ApiError),
    )
)]
pub async fn list_ideas(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListIdeasQuery>,
) -> ApiResult<impl IntoResponse> {
    let snapshot = state.repo.list().await?;
    let ideas: Vec<IdeaResponse> = snapshot
        .iter()
        .filter(|record| matches_filters(record, &params))
        .map(IdeaResponse::from_record)
        .collect();
    let total = ideas.len();
    Ok(Json(ListIdeasResponse { ideas, total }))
}

/// POST /api/v1/ideas - Submit a new idea
#[utoipa::path(
    post,
    path = "/api/v1/ideas",
    tag = "Ideas",
    request_body = SubmitIdeaRequest,
    responses(
        (status = 201, description = "Idea recorded", body = IdeaResponse),
        (status = 400, description = "Invalid or incomplete submission", body = ApiError),
        (status = 502, description = "Upload or backing store failure", body = ApiError),
    )
)]
pub async fn submit_idea(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitIdeaRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut draft = req.to_record();
    if let Some(field) = draft.missing_required() {
        return Err(ApiError::missing_field(field.header()));
    }

    // The upload runs before the append so a failed upload aborts the
    // submission with no partial record.
    if let Some(attachment) = &req.attachment {
        let link = upload_attachment(&state, attachment).await?;
        draft.set(Field::ImageUrl, link);
    }

    let saved = state.repo.submit(draft).await?;
    Ok((StatusCode::CREATED, Json(IdeaResponse::from_record(&saved))))
}

/// PATCH /api/v1/ideas/{id} - Edit an idea
#[utoipa::path(
    patch,
    path = "/api/v1/ideas/{id}",
    tag = "Ideas",
    params(("id" = i64, Path, description = "Idea identifier")),
    request_body = UpdateIdeaRequest,
    responses(
        (status = 200, description = "Idea updated", body = IdeaResponse),
        (status = 400, description = "Empty edit", body = ApiError),
        (status = 404, description = "Idea not found", body = ApiError),
    )
)]
pub async fn update_idea(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateIdeaRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.is_empty() {
        return Err(ApiError::invalid_input(
            "At least one field must be provided for update",
        ));
    }

    let position = state
        .repo
        .find_position(id)
        .await?
        .ok_or_else(|| ApiError::idea_not_found(id))?;

    let updated = state.repo.update(position, &req.to_edits()).await?;
    Ok(Json(IdeaResponse::from_record(&updated)))
}

/// DELETE /api/v1/ideas/{id} - Delete an idea
#[utoipa::path(
    delete,
    path = "/api/v1/ideas/{id}",
    tag = "Ideas",
    params(("id" = i64, Path, description = "Idea identifier")),
    responses(
        (status = 204, description = "Idea deleted"),
        (status = 404, description = "Idea not found", body = ApiError),
    )
)]
pub async fn delete_idea(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let position = state
        .repo
        .find_position(id)
        .await?
        .ok_or_else(|| ApiError::idea_not_found(id))?;

    state.repo.delete(position).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/ideas/cache/refresh - Discard the cached snapshot
#[utoipa::path(
    post,
    path = "/api/v1/ideas/cache/refresh",
    tag = "Ideas",
    responses((status = 204, description = "Snapshot discarded")),
)]
pub async fn refresh_cache(State(state): State<Arc<AppState>>) -> StatusCode {
    state.repo.refresh().await;
    StatusCode::NO_CONTENT
}

// ============================================================================
// HELPERS
// ============================================================================

fn matches_filters(record: &IdeaRecord, params: &ListIdeasQuery) -> bool {
    if let Some(status) = &params.status {
        if record.get(Field::Status) != status {
            return false;
        }
    }
    if let Some(area) = &params.area {
        if record.get(Field::ApplicationArea) != area {
            return false;
        }
    }
    true
}

fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

async fn upload_attachment(state: &AppState, attachment: &AttachmentUpload) -> ApiResult<String> {
    let extension = extension_of(&attachment.file_name);
    if !extension
        .as_deref()
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext))
    {
        return Err(KaizenError::from(ValidationError::UnsupportedAttachmentType {
            extension: extension.unwrap_or_default(),
        })
        .into());
    }

    let store = state
        .attachments
        .as_ref()
        .ok_or_else(|| KaizenError::from(AttachmentError::NotConfigured))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&attachment.content_base64)
        .map_err(|e| ApiError::invalid_input(format!("Invalid base64 payload: {}", e)))?;

    Ok(store.upload(&attachment.file_name, bytes).await?)
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the idea routes router.
pub fn create_router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route(
            "/",
            axum::routing::post(submit_idea).get(list_ideas),
        )
        .route(
            "/:id",
            axum::routing::patch(update_idea).delete(delete_idea),
        )
        .route("/cache/refresh", axum::routing::post(refresh_cache))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::DynRepository;
    use async_trait::async_trait;
    use kaizen_core::{AttachmentStore, KaizenResult, Status, TableStore};
    use kaizen_sheets::mapper;
    use kaizen_store::{IdeaRepository, InMemoryTable};
    use std::time::Duration;

    struct FakeDrive;

    #[async_trait]
    impl AttachmentStore for FakeDrive {
        async fn upload(&self, _file_name: &str, _bytes: Vec<u8>) -> KaizenResult<String> {
            Ok("https://drive.google.com/uc?id=fake".to_string())
        }
    }

    struct BrokenDrive;

    #[async_trait]
    impl AttachmentStore for BrokenDrive {
        async fn upload(&self, _file_name: &str, _bytes: Vec<u8>) -> KaizenResult<String> {
            Err(AttachmentError::UploadFailed {
                reason: "quota exceeded".to_string(),
            }
            .into())
        }
    }

    fn seeded_row(id: i64, name: &str, status: Status) -> Vec<String> {
        let mut record = IdeaRecord::new();
        record.set_id(id);
        record.set(Field::IdeaName, name);
        record.set_status(status);
        mapper::to_row(&record)
    }

    fn state_with(
        rows: Vec<Vec<String>>,
        attachments: Option<Arc<dyn AttachmentStore>>,
    ) -> (Arc<InMemoryTable>, Arc<AppState>) {
        let store = Arc::new(InMemoryTable::with_rows(rows));
        let repo: Arc<DynRepository> = Arc::new(IdeaRepository::new(
            Arc::clone(&store) as Arc<dyn TableStore>,
            Duration::from_secs(300),
        ));
        (store, Arc::new(AppState::new(repo, attachments)))
    }

    fn submit_request() -> SubmitIdeaRequest {
        SubmitIdeaRequest {
            submitter: "Ana Reis".to_string(),
            badge_number: "773".to_string(),
            submitter_area: "Nitração".to_string(),
            idea_name: "Sinalizar válvulas".to_string(),
            problem_description: "Válvulas sem identificação".to_string(),
            solution_description: "Etiquetas coloridas por linha".to_string(),
            submitter_shift: None,
            application_area: None,
            location: None,
            business_line: None,
            unit: None,
            methodology: None,
            team_lead: None,
            team_members: None,
            link: None,
            attachment: None,
        }
    }

    #[test]
    fn test_matches_filters() {
        let mut record = IdeaRecord::new();
        record.set_status(Status::New);
        record.set(Field::ApplicationArea, "Caldeira");

        let no_filter = ListIdeasQuery::default();
        assert!(matches_filters(&record, &no_filter));

        let by_status = ListIdeasQuery {
            status: Some("Nova".to_string()),
            area: None,
        };
        assert!(matches_filters(&record, &by_status));

        let wrong_status = ListIdeasQuery {
            status: Some("Aprovada".to_string()),
            area: None,
        };
        assert!(!matches_filters(&record, &wrong_status));

        let by_both = ListIdeasQuery {
            status: Some("Nova".to_string()),
            area: Some("Refino".to_string()),
        };
        assert!(!matches_filters(&record, &by_both));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("foto.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension_of("a.b.png").as_deref(), Some("png"));
        assert_eq!(extension_of("semextensao"), None);
        assert_eq!(extension_of(".png"), None);
    }

    #[tokio::test]
    async fn test_submit_creates_record() {
        let (store, state) = state_with(vec![seeded_row(1, "a", Status::New)], None);

        let response = submit_idea(State(state), Json(submit_request()))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let rows = store.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][Field::Id.index()], "2");
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_required_field() {
        let (store, state) = state_with(vec![], None);
        let mut req = submit_request();
        req.badge_number = "   ".to_string();

        let err = submit_idea(State(state), Json(req)).await.err().unwrap();
        assert_eq!(err.code, ErrorCode::MissingField);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_submit_with_attachment_stores_link() {
        let (store, state) = state_with(vec![], Some(Arc::new(FakeDrive)));
        let mut req = submit_request();
        req.attachment = Some(AttachmentUpload {
            file_name: "antes.jpg".to_string(),
            content_base64: base64::engine::general_purpose::STANDARD.encode(b"jpegdata"),
        });

        let response = submit_idea(State(state), Json(req))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            store.rows()[0][Field::ImageUrl.index()],
            "https://drive.google.com/uc?id=fake"
        );
    }

    #[tokio::test]
    async fn test_submit_rejects_disallowed_extension() {
        let (store, state) = state_with(vec![], Some(Arc::new(FakeDrive)));
        let mut req = submit_request();
        req.attachment = Some(AttachmentUpload {
            file_name: "laudo.pdf".to_string(),
            content_base64: base64::engine::general_purpose::STANDARD.encode(b"pdf"),
        });

        let err = submit_idea(State(state), Json(req)).await.err().unwrap();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_failed_upload_saves_nothing() {
        let (store, state) = state_with(vec![], Some(Arc::new(BrokenDrive)));
        let mut req = submit_request();
        req.attachment = Some(AttachmentUpload {
            file_name: "antes.png".to_string(),
            content_base64: base64::engine::general_purpose::STANDARD.encode(b"png"),
        });

        let err = submit_idea(State(state), Json(req)).await.err().unwrap();
        assert_eq!(err.code, ErrorCode::AttachmentFailed);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_update_by_id() {
        let (store, state) = state_with(
            vec![
                seeded_row(1, "primeira", Status::New),
                seeded_row(2, "segunda", Status::New),
            ],
            None,
        );

        let req = UpdateIdeaRequest {
            status: Some(Status::Approved),
            ..Default::default()
        };
        let response = update_idea(State(state), Path(2), Json(req))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.rows()[1][Field::Status.index()], "Aprovada");
        assert_eq!(store.rows()[0][Field::Status.index()], "Nova");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (_, state) = state_with(vec![seeded_row(1, "a", Status::New)], None);
        let req = UpdateIdeaRequest {
            status: Some(Status::Rejected),
            ..Default::default()
        };
        let err = update_idea(State(state), Path(9), Json(req)).await.err().unwrap();
        assert_eq!(err.code, ErrorCode::IdeaNotFound);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_edit() {
        let (_, state) = state_with(vec![seeded_row(1, "a", Status::New)], None);
        let err = update_idea(State(state), Path(1), Json(UpdateIdeaRequest::default()))
            .await
            .err().unwrap();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let (store, state) = state_with(
            vec![
                seeded_row(1, "primeira", Status::New),
                seeded_row(2, "segunda", Status::New),
            ],
            None,
        );

        let status = delete_idea(State(state), Path(1)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let rows = store.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][Field::Id.index()], "2");
    }
}
