use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::notifications::{
    Notification, NotificationDispatcher, NotificationId, NotificationRepository,
};
use crate::store::{CasOutcome, StoreError, UserId};
use crate::workflows::verification::domain::{
    CredentialDocument, DoctorVerificationStatus, RequestId, UserProfile, VerificationRequest,
    VerificationStatus,
};
use crate::workflows::verification::repository::{ProfileRepository, VerificationRepository};
use crate::workflows::verification::service::VerificationWorkflow;

pub(super) fn pending_request(id: &str, user: &str) -> VerificationRequest {
    VerificationRequest {
        id: RequestId(id.to_string()),
        user_id: UserId(user.to_string()),
        documents: vec![CredentialDocument {
            name: "Medical license".to_string(),
            storage_key: format!("uploads/{user}/license.pdf"),
        }],
        status: VerificationStatus::Pending,
        submitted_at: Utc::now(),
        reviewed_at: None,
        reviewer_id: None,
        rejection_reason: None,
    }
}

pub(super) fn unverified_profile(user: &str) -> UserProfile {
    UserProfile {
        id: UserId(user.to_string()),
        doctor_verification: DoctorVerificationStatus::Pending,
        rejection_reason: None,
    }
}

#[derive(Default)]
pub(super) struct MemoryRequests {
    records: Mutex<HashMap<RequestId, VerificationRequest>>,
}

impl MemoryRequests {
    pub(super) fn seed(&self, request: VerificationRequest) {
        self.records
            .lock()
            .expect("request mutex poisoned")
            .insert(request.id.clone(), request);
    }

    pub(super) fn snapshot(&self, id: &RequestId) -> Option<VerificationRequest> {
        self.records
            .lock()
            .expect("request mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl VerificationRepository for MemoryRequests {
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
        let mut guard = self.records.lock().expect("request mutex poisoned");
        guard.insert(request.id.clone(), request);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryProfiles {
    records: Mutex<HashMap<UserId, UserProfile>>,
}

impl MemoryProfiles {
    pub(super) fn seed(&self, profile: UserProfile) {
        self.records
            .lock()
            .expect("profile mutex poisoned")
            .insert(profile.id.clone(), profile);
    }

    pub(super) fn snapshot(&self, user_id: &UserId) -> Option<UserProfile> {
        self.records
            .lock()
            .expect("profile mutex poisoned")
            .get(user_id)
            .cloned()
    }
}

impl ProfileRepository for MemoryProfiles {
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

/// Request store whose conditional write times out, leaving commit status
/// unknown to the caller. Reads and restores still work.
pub(super) struct TimingOutRequests {
    pub(super) inner: MemoryRequests,
}

impl VerificationRepository for TimingOutRequests {
    fn fetch(&self, id: &RequestId) -> Result<Option<VerificationRequest>, StoreError> {
        self.inner.fetch(id)
    }

    fn pending(&self) -> Result<Vec<VerificationRequest>, StoreError> {
        self.inner.pending()
    }

    fn update_if_status(
        &self,
        _expected: VerificationStatus,
        _updated: VerificationRequest,
    ) -> Result<CasOutcome, StoreError> {
        Err(StoreError::Timeout)
    }

    fn restore(&self, request: VerificationRequest) -> Result<(), StoreError> {
        self.inner.restore(request)
    }
}

/// Profile store that always fails, for exercising the rollback path.
pub(super) struct UnavailableProfiles;

impl ProfileRepository for UnavailableProfiles {
    fn fetch(&self, _user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        Err(StoreError::Unavailable("profiles offline".to_string()))
    }

    fn set_verification(
        &self,
        _user_id: &UserId,
        _status: DoctorVerificationStatus,
        _rejection_reason: Option<String>,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("profiles offline".to_string()))
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

/// Notification store that always fails, for the best-effort dispatch tests.
pub(super) struct FailingNotifications;

impl NotificationRepository for FailingNotifications {
    fn insert(&self, _notification: Notification) -> Result<Notification, StoreError> {
        Err(StoreError::Unavailable("notifications offline".to_string()))
    }

    fn fetch(&self, _id: &NotificationId) -> Result<Option<Notification>, StoreError> {
        Err(StoreError::Unavailable("notifications offline".to_string()))
    }

    fn for_user(&self, _user_id: &UserId) -> Result<Vec<Notification>, StoreError> {
        Err(StoreError::Unavailable("notifications offline".to_string()))
    }

    fn update(&self, _notification: Notification) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("notifications offline".to_string()))
    }
}

pub(super) fn build_workflow() -> (
    Arc<VerificationWorkflow<MemoryRequests, MemoryProfiles, MemoryNotifications>>,
    Arc<MemoryRequests>,
    Arc<MemoryProfiles>,
    Arc<MemoryNotifications>,
) {
    let requests = Arc::new(MemoryRequests::default());
    let profiles = Arc::new(MemoryProfiles::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let dispatcher = Arc::new(NotificationDispatcher::new(notifications.clone()));
    let workflow = Arc::new(VerificationWorkflow::new(
        requests.clone(),
        profiles.clone(),
        dispatcher,
    ));
    (workflow, requests, profiles, notifications)
}
