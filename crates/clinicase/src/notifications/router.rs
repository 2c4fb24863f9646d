use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::store::UserId;

use super::dispatcher::{NotificationDispatcher, NotificationError};
use super::domain::NotificationId;
use super::repository::NotificationRepository;

/// Router builder for the notification consumer surface (read and ack only).
pub fn notification_router<N>(dispatcher: Arc<NotificationDispatcher<N>>) -> Router
where
    N: NotificationRepository + 'static,
{
    // Both routes share the `:id` segment name; the list route reads it as a
    // user id, the ack route as a notification id.
    Router::new()
        .route("/api/v1/notifications/:id", get(list_handler::<N>))
        .route(
            "/api/v1/notifications/:id/read",
            post(mark_read_handler::<N>),
        )
        .with_state(dispatcher)
}

async fn list_handler<N>(
    State(dispatcher): State<Arc<NotificationDispatcher<N>>>,
    Path(user_id): Path<String>,
) -> Response
where
    N: NotificationRepository + 'static,
{
    match dispatcher.for_user(&UserId(user_id)) {
        Ok(notifications) => (StatusCode::OK, axum::Json(notifications)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn mark_read_handler<N>(
    State(dispatcher): State<Arc<NotificationDispatcher<N>>>,
    Path(notification_id): Path<String>,
) -> Response
where
    N: NotificationRepository + 'static,
{
    match dispatcher.mark_read(&NotificationId(notification_id)) {
        Ok(notification) => (StatusCode::OK, axum::Json(notification)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: NotificationError) -> Response {
    let status = match err {
        NotificationError::NotFound => StatusCode::NOT_FOUND,
        NotificationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
