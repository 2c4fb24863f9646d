use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::UserId;

/// Identifier wrapper for verification requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

/// Lifecycle states of a verification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        }
    }

    /// Transition table: the only edges are `pending -> approved` and
    /// `pending -> rejected`. Approved and rejected are terminal.
    pub const fn permits(self, target: VerificationStatus) -> bool {
        matches!(
            (self, target),
            (VerificationStatus::Pending, VerificationStatus::Approved)
                | (VerificationStatus::Pending, VerificationStatus::Rejected)
        )
    }
}

/// Reference to one uploaded credential document. Upload itself happens in an
/// external pipeline; the workflow only carries the references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDocument {
    pub name: String,
    pub storage_key: String,
}

/// A doctor's credential-verification request.
///
/// Created by the intake path with `status = pending`; mutated only by an
/// admin through the workflow; immutable once terminal. Terminal records are
/// retained as an audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub id: RequestId,
    pub user_id: UserId,
    pub documents: Vec<CredentialDocument>,
    pub status: VerificationStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewer_id: Option<UserId>,
    pub rejection_reason: Option<String>,
}

/// Verification state mirrored onto the requester's profile. The workflow is
/// the sole writer of this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctorVerificationStatus {
    Unverified,
    Pending,
    Verified,
    Rejected,
}

impl DoctorVerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DoctorVerificationStatus::Unverified => "unverified",
            DoctorVerificationStatus::Pending => "pending",
            DoctorVerificationStatus::Verified => "verified",
            DoctorVerificationStatus::Rejected => "rejected",
        }
    }
}

/// The slice of the user profile the workflow reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub doctor_verification: DoctorVerificationStatus,
    pub rejection_reason: Option<String>,
}

/// A request enriched with a denormalized snapshot of the requester's
/// profile, for the admin review queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDetail {
    pub request: VerificationRequest,
    /// `None` when the profile document is missing; the request itself is
    /// still reviewable.
    pub profile: Option<UserProfile>,
}
