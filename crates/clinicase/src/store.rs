//! Document-store primitives shared by every repository trait.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque user identifier, shared across workflows and notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure surface of the document-store collaborator.
///
/// The store provides single-document atomicity only; multi-document
/// consistency is the workflow's job (see the compare-and-set contract on the
/// repository traits).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write targeted a document that does not exist.
    #[error("document not found")]
    Missing,
    /// The store did not respond within the caller's deadline. Commit status
    /// is unknown; the caller must re-read before retrying.
    #[error("document store timed out")]
    Timeout,
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// Result of a status-conditioned write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// The stored status matched the expectation and the write was applied.
    Applied,
    /// A concurrent transition got there first; nothing was written.
    StatusMismatch,
}
