use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::notifications::{
    Notification, NotificationDispatcher, NotificationId, NotificationRepository,
};
use crate::store::{CasOutcome, StoreError, UserId};
use crate::workflows::moderation::domain::{
    ContentId, ContentKind, ContentRef, ReportId, ReportStatus, ReportedContent,
};
use crate::workflows::moderation::repository::{ContentStore, ReportRepository};
use crate::workflows::moderation::service::ModerationWorkflow;

pub(super) fn pending_report(id: &str, kind: ContentKind, content_id: &str) -> ReportedContent {
    ReportedContent {
        id: ReportId(id.to_string()),
        content: ContentRef {
            kind,
            id: ContentId(content_id.to_string()),
        },
        reported_by: UserId("reporter1".to_string()),
        reason: "Inappropriate content".to_string(),
        status: ReportStatus::Pending,
        reported_at: Utc::now(),
        moderated_by: None,
        moderated_at: None,
    }
}

#[derive(Default)]
pub(super) struct MemoryReports {
    records: Mutex<HashMap<ReportId, ReportedContent>>,
}

impl MemoryReports {
    pub(super) fn seed(&self, report: ReportedContent) {
        self.records
            .lock()
            .expect("report mutex poisoned")
            .insert(report.id.clone(), report);
    }

    pub(super) fn snapshot(&self, id: &ReportId) -> Option<ReportedContent> {
        self.records
            .lock()
            .expect("report mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl ReportRepository for MemoryReports {
    fn fetch(&self, id: &ReportId) -> Result<Option<ReportedContent>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("report mutex poisoned")
            .get(id)
            .cloned())
    }

    fn pending(&self) -> Result<Vec<ReportedContent>, StoreError> {
        let guard = self.records.lock().expect("report mutex poisoned");
        let mut pending: Vec<ReportedContent> = guard
            .values()
            .filter(|report| report.status == ReportStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.reported_at.cmp(&b.reported_at));
        Ok(pending)
    }

    fn update_if_status(
        &self,
        expected: ReportStatus,
        updated: ReportedContent,
    ) -> Result<CasOutcome, StoreError> {
        let mut guard = self.records.lock().expect("report mutex poisoned");
        let stored = guard.get(&updated.id).ok_or(StoreError::Missing)?;
        if stored.status != expected {
            return Ok(CasOutcome::StatusMismatch);
        }
        guard.insert(updated.id.clone(), updated);
        Ok(CasOutcome::Applied)
    }

    fn restore(&self, report: ReportedContent) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("report mutex poisoned");
        guard.insert(report.id.clone(), report);
        Ok(())
    }
}

/// Report store whose conditional write times out, leaving commit status
/// unknown to the caller. Reads and restores still work.
pub(super) struct TimingOutReports {
    pub(super) inner: MemoryReports,
}

impl ReportRepository for TimingOutReports {
    fn fetch(&self, id: &ReportId) -> Result<Option<ReportedContent>, StoreError> {
        self.inner.fetch(id)
    }

    fn pending(&self) -> Result<Vec<ReportedContent>, StoreError> {
        self.inner.pending()
    }

    fn update_if_status(
        &self,
        _expected: ReportStatus,
        _updated: ReportedContent,
    ) -> Result<CasOutcome, StoreError> {
        Err(StoreError::Timeout)
    }

    fn restore(&self, report: ReportedContent) -> Result<(), StoreError> {
        self.inner.restore(report)
    }
}

/// In-memory stand-in for the per-type content collections, tracking authors
/// and recording every delete invocation.
#[derive(Default)]
pub(super) struct MemoryContent {
    records: Mutex<HashMap<ContentRef, UserId>>,
    deletes: Mutex<Vec<ContentRef>>,
}

impl MemoryContent {
    pub(super) fn seed(&self, content: ContentRef, author: &str) {
        self.records
            .lock()
            .expect("content mutex poisoned")
            .insert(content, UserId(author.to_string()));
    }

    pub(super) fn exists(&self, content: &ContentRef) -> bool {
        self.records
            .lock()
            .expect("content mutex poisoned")
            .contains_key(content)
    }

    pub(super) fn delete_calls(&self) -> Vec<ContentRef> {
        self.deletes.lock().expect("content mutex poisoned").clone()
    }
}

impl ContentStore for MemoryContent {
    fn author_of(&self, content: &ContentRef) -> Result<Option<UserId>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("content mutex poisoned")
            .get(content)
            .cloned())
    }

    fn delete(&self, content: &ContentRef) -> Result<(), StoreError> {
        self.deletes
            .lock()
            .expect("content mutex poisoned")
            .push(content.clone());
        // Idempotent: removing an absent record is not an error.
        self.records
            .lock()
            .expect("content mutex poisoned")
            .remove(content);
        Ok(())
    }
}

/// Content store whose delete always fails, for the rollback path.
pub(super) struct UndeletableContent {
    pub(super) author: UserId,
}

impl ContentStore for UndeletableContent {
    fn author_of(&self, _content: &ContentRef) -> Result<Option<UserId>, StoreError> {
        Ok(Some(self.author.clone()))
    }

    fn delete(&self, _content: &ContentRef) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("content store offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifications {
    records: Mutex<HashMap<NotificationId, Notification>>,
}

impl MemoryNotifications {
    pub(super) fn all(&self) -> Vec<Notification> {
        self.records
            .lock()
            .expect("notification mutex poisoned")
            .values()
            .cloned()
            .collect()
    }
}

impl NotificationRepository for MemoryNotifications {
    fn insert(&self, notification: Notification) -> Result<Notification, StoreError> {
        self.records
            .lock()
            .expect("notification mutex poisoned")
            .insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }

    fn fetch(&self, id: &NotificationId) -> Result<Option<Notification>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("notification mutex poisoned")
            .get(id)
            .cloned())
    }

    fn for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, StoreError> {
        let guard = self.records.lock().expect("notification mutex poisoned");
        let mut matches: Vec<Notification> = guard
            .values()
            .filter(|notification| &notification.user_id == user_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    fn update(&self, notification: Notification) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("notification mutex poisoned");
        if !guard.contains_key(&notification.id) {
            return Err(StoreError::Missing);
        }
        guard.insert(notification.id.clone(), notification);
        Ok(())
    }
}

pub(super) fn build_workflow() -> (
    Arc<ModerationWorkflow<MemoryReports, MemoryContent, MemoryNotifications>>,
    Arc<MemoryReports>,
    Arc<MemoryContent>,
    Arc<MemoryNotifications>,
) {
    let reports = Arc::new(MemoryReports::default());
    let content = Arc::new(MemoryContent::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let dispatcher = Arc::new(NotificationDispatcher::new(notifications.clone()));
    let workflow = Arc::new(ModerationWorkflow::new(
        reports.clone(),
        content.clone(),
        dispatcher,
    ));
    (workflow, reports, content, notifications)
}
