use crate::store::{StoreError, UserId};

use super::domain::{Notification, NotificationId};

/// Storage abstraction over the `notifications` collection.
pub trait NotificationRepository: Send + Sync {
    fn insert(&self, notification: Notification) -> Result<Notification, StoreError>;
    fn fetch(&self, id: &NotificationId) -> Result<Option<Notification>, StoreError>;
    /// All notifications for one user, newest first. Implementations run a
    /// fresh query per call rather than holding a live cursor.
    fn for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, StoreError>;
    fn update(&self, notification: Notification) -> Result<(), StoreError>;
}
