use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::store::{StoreError, UserId};

use super::domain::{Notification, NotificationId, NotificationKind};
use super::repository::NotificationRepository;

static NOTIFICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_notification_id() -> NotificationId {
    let id = NOTIFICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    NotificationId(format!("ntf-{id:06}"))
}

/// Error raised by the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Persists and retrieves notification records for users.
pub struct NotificationDispatcher<N> {
    repository: Arc<N>,
}

impl<N> NotificationDispatcher<N>
where
    N: NotificationRepository + 'static,
{
    pub fn new(repository: Arc<N>) -> Self {
        Self { repository }
    }

    /// Persist a new unread notification stamped with the current time.
    pub fn create(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        title: String,
        message: String,
        data: Option<serde_json::Value>,
    ) -> Result<Notification, NotificationError> {
        let notification = Notification {
            id: next_notification_id(),
            user_id,
            kind,
            title,
            message,
            read: false,
            created_at: Utc::now(),
            data,
        };
        let stored = self.repository.insert(notification)?;
        Ok(stored)
    }

    /// Everything addressed to `user_id`, newest first. Each call issues a
    /// fresh query, so the result is a restartable snapshot, not a cursor.
    pub fn for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, NotificationError> {
        let notifications = self.repository.for_user(user_id)?;
        Ok(notifications)
    }

    /// Mark a notification read. Already-read notifications are left alone so
    /// repeated acks from the UI are harmless.
    pub fn mark_read(&self, id: &NotificationId) -> Result<Notification, NotificationError> {
        let mut notification = self
            .repository
            .fetch(id)?
            .ok_or(NotificationError::NotFound)?;

        if notification.read {
            return Ok(notification);
        }

        notification.read = true;
        self.repository.update(notification.clone())?;
        Ok(notification)
    }
}
