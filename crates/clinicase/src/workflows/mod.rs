//! Admin workflows governing entity lifecycles.
//!
//! Each workflow is a closed state machine: transitions are validated against
//! an explicit table on the status enum before any write, and every write
//! that commits a transition is conditioned on the expected source status so
//! concurrent admins cannot double-apply an action.

pub mod moderation;
pub mod verification;

use crate::store::StoreError;
use axum::http::StatusCode;

/// Failure surface shared by both workflows.
///
/// `NotFound`, `InvalidState`, `Validation`, and `Conflict` abort before (or
/// instead of) any write. `Timeout` means commit status is unknown and the
/// caller must re-read before retrying. Notification dispatch failures never
/// appear here; they are logged at the workflow tail and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("record not found")]
    NotFound,
    #[error("transition not allowed from status '{from}'")]
    InvalidState { from: &'static str },
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("record was modified concurrently; refresh and retry")]
    Conflict,
    #[error("document store timed out; commit status unknown, re-fetch before retrying")]
    Timeout,
    #[error("document store failure: {0}")]
    Store(String),
}

impl WorkflowError {
    /// HTTP status used by the admin routers. Invalid-state and conflict map
    /// to the same code so the UI can show a single refresh prompt.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WorkflowError::NotFound => StatusCode::NOT_FOUND,
            WorkflowError::InvalidState { .. } | WorkflowError::Conflict => StatusCode::CONFLICT,
            WorkflowError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WorkflowError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            WorkflowError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for WorkflowError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Missing => WorkflowError::Store("referenced document missing".to_string()),
            StoreError::Timeout => WorkflowError::Timeout,
            StoreError::Unavailable(detail) => WorkflowError::Store(detail),
        }
    }
}
