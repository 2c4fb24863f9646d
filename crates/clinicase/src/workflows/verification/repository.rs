use crate::store::{CasOutcome, StoreError, UserId};

use super::domain::{
    DoctorVerificationStatus, RequestId, UserProfile, VerificationRequest, VerificationStatus,
};

/// Storage abstraction over the `verification_requests` collection.
///
/// The store offers single-document atomicity only, so the transition write
/// is expressed as a compare-and-set on the stored status. `restore` exists
/// for the compensating path when the synchronized profile write fails after
/// the request write already committed.
pub trait VerificationRepository: Send + Sync {
    fn fetch(&self, id: &RequestId) -> Result<Option<VerificationRequest>, StoreError>;
    /// All requests still awaiting review, oldest submission first.
    fn pending(&self) -> Result<Vec<VerificationRequest>, StoreError>;
    /// Persist `updated` only if the stored status still equals `expected`.
    fn update_if_status(
        &self,
        expected: VerificationStatus,
        updated: VerificationRequest,
    ) -> Result<CasOutcome, StoreError>;
    /// Unconditional write used to roll back a half-applied transition.
    fn restore(&self, request: VerificationRequest) -> Result<(), StoreError>;
}

/// Storage abstraction over the verification slice of the `users` collection.
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError>;
    /// Overwrite the profile's verification status and rejection reason.
    /// Returns `StoreError::Missing` when no profile document exists.
    fn set_verification(
        &self,
        user_id: &UserId,
        status: DoctorVerificationStatus,
        rejection_reason: Option<String>,
    ) -> Result<(), StoreError>;
}
