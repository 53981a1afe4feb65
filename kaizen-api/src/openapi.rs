//! OpenAPI document for the Kaizen API.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes;
use crate::types::{
    AttachmentUpload, IdeaResponse, ListIdeasResponse, SubmitIdeaRequest, UpdateIdeaRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kaizen Ideas API",
        description = "Submission and triage of operator improvement ideas",
    ),
    paths(
        routes::idea::list_ideas,
        routes::idea::submit_idea,
        routes::idea::update_idea,
        routes::idea::delete_idea,
        routes::idea::refresh_cache,
        routes::health::ping,
        routes::health::liveness,
        routes::health::readiness,
    ),
    components(schemas(
        SubmitIdeaRequest,
        UpdateIdeaRequest,
        AttachmentUpload,
        IdeaResponse,
        ListIdeasResponse,
        ApiError,
        ErrorCode,
        kaizen_core::Status,
        routes::health::HealthResponse,
        routes::health::HealthStatus,
    )),
    tags(
        (name = "Ideas", description = "Idea submission and triage"),
        (name = "Health", description = "Liveness and readiness checks"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("/api/v1/ideas"));
        assert!(json.contains("/health/ready"));
    }
}
