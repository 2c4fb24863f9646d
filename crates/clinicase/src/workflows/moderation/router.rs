use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::notifications::NotificationRepository;
use crate::store::UserId;
use crate::workflows::verification::router::workflow_error_response;

use super::domain::{ModerationAction, ReportId};
use super::repository::{ContentStore, ReportRepository};
use super::service::ModerationWorkflow;

/// Admin endpoints for the moderation queue. Authorization happens upstream
/// in the identity collaborator.
pub fn moderation_router<R, C, N>(workflow: Arc<ModerationWorkflow<R, C, N>>) -> Router
where
    R: ReportRepository + 'static,
    C: ContentStore + 'static,
    N: NotificationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/moderation/reports/pending",
            get(pending_handler::<R, C, N>),
        )
        .route(
            "/api/v1/moderation/reports/:report_id/moderate",
            post(moderate_handler::<R, C, N>),
        )
        .with_state(workflow)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModerateBody {
    pub(crate) action: ModerationAction,
    pub(crate) moderator_id: String,
}

async fn pending_handler<R, C, N>(
    State(workflow): State<Arc<ModerationWorkflow<R, C, N>>>,
) -> Response
where
    R: ReportRepository + 'static,
    C: ContentStore + 'static,
    N: NotificationRepository + 'static,
{
    match workflow.pending() {
        Ok(queue) => (StatusCode::OK, axum::Json(queue)).into_response(),
        Err(err) => workflow_error_response(err),
    }
}

async fn moderate_handler<R, C, N>(
    State(workflow): State<Arc<ModerationWorkflow<R, C, N>>>,
    Path(report_id): Path<String>,
    axum::Json(body): axum::Json<ModerateBody>,
) -> Response
where
    R: ReportRepository + 'static,
    C: ContentStore + 'static,
    N: NotificationRepository + 'static,
{
    match workflow.moderate(
        &ReportId(report_id),
        body.action,
        &UserId(body.moderator_id),
    ) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => workflow_error_response(err),
    }
}
