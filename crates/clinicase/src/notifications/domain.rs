use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::UserId;

/// Identifier wrapper for persisted notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub String);

/// Closed set of notification categories the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Verification,
    Moderation,
}

impl NotificationKind {
    pub const fn label(self) -> &'static str {
        match self {
            NotificationKind::Verification => "verification",
            NotificationKind::Moderation => "moderation",
        }
    }
}

/// A notification addressed to one user. Created only by the dispatcher;
/// mutated only by `mark_read`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    /// Loosely-typed payload, e.g. the id of the request or report that
    /// triggered the notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}
