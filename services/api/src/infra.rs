use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use clinicase::notifications::{Notification, NotificationId, NotificationRepository};
use clinicase::store::{CasOutcome, StoreError, UserId};
use clinicase::workflows::moderation::{
    ContentRef, ContentStore, ReportId, ReportRepository, ReportStatus, ReportedContent,
};
use clinicase::workflows::verification::{
    DoctorVerificationStatus, ProfileRepository, RequestId, UserProfile, VerificationRepository,
    VerificationRequest, VerificationStatus,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stand-in for the `verification_requests` collection. A real
/// deployment swaps in a document-store adapter; the trait contract is the
/// same either way.
#[derive(Default)]
pub(crate) struct InMemoryVerificationRepository {
    records: Mutex<HashMap<RequestId, VerificationRequest>>,
}

impl InMemoryVerificationRepository {
    pub(crate) fn seed(&self, request: VerificationRequest) {
        self.records
            .lock()
            .expect("request mutex poisoned")
            .insert(request.id.clone(), request);
    }
}

impl VerificationRepository for InMemoryVerificationRepository {
    fn fetch(&self, id: &RequestId) -> Result<Option<VerificationRequest>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("request mutex poisoned")
            .get(id)
            .cloned())
    }

    fn pending(&self) -> Result<Vec<VerificationRequest>, StoreError> {
        let guard = self.records.lock().expect("request mutex poisoned");
        let mut pending: Vec<VerificationRequest> = guard
            .values()
            .filter(|request| request.status == VerificationStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        Ok(pending)
    }

    fn update_if_status(
        &self,
        expected: VerificationStatus,
        updated: VerificationRequest,
    ) -> Result<CasOutcome, StoreError> {
        let mut guard = self.records.lock().expect("request mutex poisoned");
        let stored = guard.get(&updated.id).ok_or(StoreError::Missing)?;
        if stored.status != expected {
            return Ok(CasOutcome::StatusMismatch);
        }
        guard.insert(updated.id.clone(), updated);
        Ok(CasOutcome::Applied)
    }

    fn restore(&self, request: VerificationRequest) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("request mutex poisoned")
            .insert(request.id.clone(), request);
        Ok(())
    }
}

/// In-memory stand-in for the verification slice of the `users` collection.
#[derive(Default)]
pub(crate) struct InMemoryProfileRepository {
    records: Mutex<HashMap<UserId, UserProfile>>,
}

impl InMemoryProfileRepository {
    pub(crate) fn seed(&self, profile: UserProfile) {
        self.records
            .lock()
            .expect("profile mutex poisoned")
            .insert(profile.id.clone(), profile);
    }

    pub(crate) fn get(&self, user_id: &UserId) -> Option<UserProfile> {
        self.records
            .lock()
            .expect("profile mutex poisoned")
            .get(user_id)
            .cloned()
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn fetch(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("profile mutex poisoned")
            .get(user_id)
            .cloned())
    }

    fn set_verification(
        &self,
        user_id: &UserId,
        status: DoctorVerificationStatus,
        rejection_reason: Option<String>,
    ) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("profile mutex poisoned");
        let profile = guard.get_mut(user_id).ok_or(StoreError::Missing)?;
        profile.doctor_verification = status;
        profile.rejection_reason = rejection_reason;
        Ok(())
    }
}

/// In-memory stand-in for the `reported_content` collection.
#[derive(Default)]
pub(crate) struct InMemoryReportRepository {
    records: Mutex<HashMap<ReportId, ReportedContent>>,
}

impl InMemoryReportRepository {
    pub(crate) fn seed(&self, report: ReportedContent) {
        self.records
            .lock()
            .expect("report mutex poisoned")
            .insert(report.id.clone(), report);
    }
}

impl ReportRepository for InMemoryReportRepository {
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
        self.records
            .lock()
            .expect("report mutex poisoned")
            .insert(report.id.clone(), report);
        Ok(())
    }
}

/// In-memory stand-in for the per-type content collections (`cases`,
/// `comments`, profiles). Deletion is idempotent; cascading cleanup of
/// dependents would live in a real adapter behind the same trait.
#[derive(Default)]
pub(crate) struct InMemoryContentStore {
    records: Mutex<HashMap<ContentRef, UserId>>,
}

impl InMemoryContentStore {
    pub(crate) fn seed(&self, content: ContentRef, author: UserId) {
        self.records
            .lock()
            .expect("content mutex poisoned")
            .insert(content, author);
    }

    pub(crate) fn exists(&self, content: &ContentRef) -> bool {
        self.records
            .lock()
            .expect("content mutex poisoned")
            .contains_key(content)
    }
}

impl ContentStore for InMemoryContentStore {
    fn author_of(&self, content: &ContentRef) -> Result<Option<UserId>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("content mutex poisoned")
            .get(content)
            .cloned())
    }

    fn delete(&self, content: &ContentRef) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("content mutex poisoned")
            .remove(content);
        Ok(())
    }
}

/// In-memory stand-in for the `notifications` collection.
#[derive(Default)]
pub(crate) struct InMemoryNotificationRepository {
    records: Mutex<HashMap<NotificationId, Notification>>,
}

impl NotificationRepository for InMemoryNotificationRepository {
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
