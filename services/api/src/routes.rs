use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use clinicase::notifications::{notification_router, NotificationDispatcher, NotificationRepository};
use clinicase::workflows::moderation::{
    moderation_router, ContentStore, ModerationWorkflow, ReportRepository,
};
use clinicase::workflows::verification::{
    verification_router, ProfileRepository, VerificationRepository, VerificationWorkflow,
};

/// Merge the three workflow-engine routers with the operational endpoints.
pub(crate) fn with_workflow_routes<VR, PR, RR, CS, NR>(
    verification: Arc<VerificationWorkflow<VR, PR, NR>>,
    moderation: Arc<ModerationWorkflow<RR, CS, NR>>,
    notifications: Arc<NotificationDispatcher<NR>>,
) -> axum::Router
where
    VR: VerificationRepository + 'static,
    PR: ProfileRepository + 'static,
    RR: ReportRepository + 'static,
    CS: ContentStore + 'static,
    NR: NotificationRepository + 'static,
{
    verification_router(verification)
        .merge(moderation_router(moderation))
        .merge(notification_router(notifications))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
