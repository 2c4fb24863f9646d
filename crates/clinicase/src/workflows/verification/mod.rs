//! Doctor-credential verification workflow.
//!
//! A request enters as `pending` and leaves exactly once, to `approved` or
//! `rejected`. Either transition synchronizes the requester's profile in the
//! same logical unit: if the profile write fails, the request write is rolled
//! back so readers never observe one without the other.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{
    CredentialDocument, DoctorVerificationStatus, RequestDetail, RequestId, UserProfile,
    VerificationRequest, VerificationStatus,
};
pub use repository::{ProfileRepository, VerificationRepository};
pub use router::verification_router;
pub use service::VerificationWorkflow;
