use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::notifications::NotificationRepository;
use crate::store::UserId;
use crate::workflows::WorkflowError;

use super::domain::RequestId;
use super::repository::{ProfileRepository, VerificationRepository};
use super::service::VerificationWorkflow;

/// Admin endpoints for the verification review queue. The caller is assumed
/// to be an already-authorized admin; authorization lives in the identity
/// collaborator, not here.
pub fn verification_router<R, P, N>(workflow: Arc<VerificationWorkflow<R, P, N>>) -> Router
where
    R: VerificationRepository + 'static,
    P: ProfileRepository + 'static,
    N: NotificationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/verification/requests/pending",
            get(pending_handler::<R, P, N>),
        )
        .route(
            "/api/v1/verification/requests/:request_id",
            get(get_handler::<R, P, N>),
        )
        .route(
            "/api/v1/verification/requests/:request_id/approve",
            post(approve_handler::<R, P, N>),
        )
        .route(
            "/api/v1/verification/requests/:request_id/reject",
            post(reject_handler::<R, P, N>),
        )
        .with_state(workflow)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApproveBody {
    pub(crate) reviewer_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RejectBody {
    pub(crate) reviewer_id: String,
    pub(crate) reason: String,
}

async fn pending_handler<R, P, N>(
    State(workflow): State<Arc<VerificationWorkflow<R, P, N>>>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ProfileRepository + 'static,
    N: NotificationRepository + 'static,
{
    match workflow.pending() {
        Ok(queue) => (StatusCode::OK, axum::Json(queue)).into_response(),
        Err(err) => workflow_error_response(err),
    }
}

async fn get_handler<R, P, N>(
    State(workflow): State<Arc<VerificationWorkflow<R, P, N>>>,
    Path(request_id): Path<String>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ProfileRepository + 'static,
    N: NotificationRepository + 'static,
{
    match workflow.get(&RequestId(request_id)) {
        Ok(detail) => (StatusCode::OK, axum::Json(detail)).into_response(),
        Err(err) => workflow_error_response(err),
    }
}

async fn approve_handler<R, P, N>(
    State(workflow): State<Arc<VerificationWorkflow<R, P, N>>>,
    Path(request_id): Path<String>,
    axum::Json(body): axum::Json<ApproveBody>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ProfileRepository + 'static,
    N: NotificationRepository + 'static,
{
    match workflow.approve(&RequestId(request_id), &UserId(body.reviewer_id)) {
        Ok(request) => (StatusCode::OK, axum::Json(request)).into_response(),
        Err(err) => workflow_error_response(err),
    }
}

async fn reject_handler<R, P, N>(
    State(workflow): State<Arc<VerificationWorkflow<R, P, N>>>,
    Path(request_id): Path<String>,
    axum::Json(body): axum::Json<RejectBody>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ProfileRepository + 'static,
    N: NotificationRepository + 'static,
{
    match workflow.reject(
        &RequestId(request_id),
        &UserId(body.reviewer_id),
        &body.reason,
    ) {
        Ok(request) => (StatusCode::OK, axum::Json(request)).into_response(),
        Err(err) => workflow_error_response(err),
    }
}

/// Shared error envelope for workflow routers.
pub(crate) fn workflow_error_response(err: WorkflowError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (err.status_code(), axum::Json(payload)).into_response()
}
