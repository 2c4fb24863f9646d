use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{error, warn};

use crate::notifications::{NotificationDispatcher, NotificationKind, NotificationRepository};
use crate::store::{CasOutcome, UserId};
use crate::workflows::WorkflowError;

use super::domain::{
    DoctorVerificationStatus, RequestDetail, RequestId, VerificationRequest, VerificationStatus,
};
use super::repository::{ProfileRepository, VerificationRepository};

/// The reviewed verdict, fixed before any write so both the request and the
/// profile are derived from the same decision.
enum Verdict {
    Approve,
    Reject { reason: String },
}

impl Verdict {
    fn target(&self) -> VerificationStatus {
        match self {
            Verdict::Approve => VerificationStatus::Approved,
            Verdict::Reject { .. } => VerificationStatus::Rejected,
        }
    }
}

/// Workflow service governing verification-request transitions.
pub struct VerificationWorkflow<R, P, N> {
    requests: Arc<R>,
    profiles: Arc<P>,
    notifications: Arc<NotificationDispatcher<N>>,
}

impl<R, P, N> VerificationWorkflow<R, P, N>
where
    R: VerificationRepository + 'static,
    P: ProfileRepository + 'static,
    N: NotificationRepository + 'static,
{
    pub fn new(
        requests: Arc<R>,
        profiles: Arc<P>,
        notifications: Arc<NotificationDispatcher<N>>,
    ) -> Self {
        Self {
            requests,
            profiles,
            notifications,
        }
    }

    /// Fetch one request enriched with the requester's profile snapshot.
    pub fn get(&self, id: &RequestId) -> Result<RequestDetail, WorkflowError> {
        let request = self.requests.fetch(id)?.ok_or(WorkflowError::NotFound)?;
        self.enrich(request)
    }

    /// The review queue: every pending request with its profile snapshot.
    pub fn pending(&self) -> Result<Vec<RequestDetail>, WorkflowError> {
        self.requests
            .pending()?
            .into_iter()
            .map(|request| self.enrich(request))
            .collect()
    }

    /// Approve a pending request and mark the requester verified.
    pub fn approve(
        &self,
        id: &RequestId,
        reviewer: &UserId,
    ) -> Result<VerificationRequest, WorkflowError> {
        self.transition(id, reviewer, Verdict::Approve)
    }

    /// Reject a pending request with a mandatory reason, mirrored onto the
    /// requester's profile.
    pub fn reject(
        &self,
        id: &RequestId,
        reviewer: &UserId,
        reason: &str,
    ) -> Result<VerificationRequest, WorkflowError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkflowError::Validation(
                "rejection reason must not be blank".to_string(),
            ));
        }
        self.transition(
            id,
            reviewer,
            Verdict::Reject {
                reason: reason.to_string(),
            },
        )
    }

    fn enrich(&self, request: VerificationRequest) -> Result<RequestDetail, WorkflowError> {
        let profile = self.profiles.fetch(&request.user_id)?;
        Ok(RequestDetail { request, profile })
    }

    fn transition(
        &self,
        id: &RequestId,
        reviewer: &UserId,
        verdict: Verdict,
    ) -> Result<VerificationRequest, WorkflowError> {
        let current = self.requests.fetch(id)?.ok_or(WorkflowError::NotFound)?;

        let target = verdict.target();
        if !current.status.permits(target) {
            return Err(WorkflowError::InvalidState {
                from: current.status.label(),
            });
        }

        let mut updated = current.clone();
        updated.status = target;
        updated.reviewer_id = Some(reviewer.clone());
        updated.reviewed_at = Some(Utc::now());
        updated.rejection_reason = match &verdict {
            Verdict::Approve => None,
            Verdict::Reject { reason } => Some(reason.clone()),
        };

        // Precondition-checked primary write: only one concurrent transition
        // can move the request out of pending.
        match self
            .requests
            .update_if_status(VerificationStatus::Pending, updated.clone())?
        {
            CasOutcome::Applied => {}
            CasOutcome::StatusMismatch => return Err(WorkflowError::Conflict),
        }

        let (profile_status, profile_reason) = match &verdict {
            Verdict::Approve => (DoctorVerificationStatus::Verified, None),
            Verdict::Reject { reason } => {
                (DoctorVerificationStatus::Rejected, Some(reason.clone()))
            }
        };

        // Synchronized secondary write. On failure the primary write is
        // compensated so readers never see the request changed without the
        // profile.
        if let Err(profile_err) =
            self.profiles
                .set_verification(&updated.user_id, profile_status, profile_reason)
        {
            if let Err(rollback_err) = self.requests.restore(current) {
                error!(
                    request = %updated.id.0,
                    error = %rollback_err,
                    "failed to roll back verification request after profile write failure"
                );
            }
            return Err(profile_err.into());
        }

        self.notify(&updated, &verdict);

        Ok(updated)
    }

    /// Best-effort dispatch: a failure is logged and never unwinds the
    /// committed transition.
    fn notify(&self, request: &VerificationRequest, verdict: &Verdict) {
        let (title, message) = match verdict {
            Verdict::Approve => (
                "Verification approved".to_string(),
                "Your doctor credentials have been verified.".to_string(),
            ),
            Verdict::Reject { reason } => (
                "Verification rejected".to_string(),
                format!("Your verification request was rejected: {reason}"),
            ),
        };

        let data = json!({ "request_id": request.id.0 });
        if let Err(err) = self.notifications.create(
            request.user_id.clone(),
            NotificationKind::Verification,
            title,
            message,
            Some(data),
        ) {
            warn!(
                request = %request.id.0,
                user = %request.user_id,
                error = %err,
                "verification notification dispatch failed"
            );
        }
    }
}
