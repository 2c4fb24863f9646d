use crate::store::{CasOutcome, StoreError, UserId};

use super::domain::{ContentRef, ReportId, ReportStatus, ReportedContent};

/// Storage abstraction over the `reported_content` collection. Same
/// compare-and-set contract as the verification side: the store gives
/// single-document atomicity, the workflow supplies the precondition.
pub trait ReportRepository: Send + Sync {
    fn fetch(&self, id: &ReportId) -> Result<Option<ReportedContent>, StoreError>;
    /// All reports still awaiting moderation, oldest first.
    fn pending(&self) -> Result<Vec<ReportedContent>, StoreError>;
    /// Persist `updated` only if the stored status still equals `expected`.
    fn update_if_status(
        &self,
        expected: ReportStatus,
        updated: ReportedContent,
    ) -> Result<CasOutcome, StoreError>;
    /// Unconditional write used to roll back a half-applied removal.
    fn restore(&self, report: ReportedContent) -> Result<(), StoreError>;
}

/// Per-content-type collaborator over the `cases`, `comments`, and user
/// profile collections.
///
/// `delete` is the content-deletion hook: the workflow invokes it at most
/// once per successful removal. Implementations must be idempotent (deleting
/// an id that is already gone is `Ok`) and own any cascading cleanup of
/// dependents, which may run asynchronously after the call returns.
pub trait ContentStore: Send + Sync {
    /// The author of the referenced content, if the record still exists.
    fn author_of(&self, content: &ContentRef) -> Result<Option<UserId>, StoreError>;
    fn delete(&self, content: &ContentRef) -> Result<(), StoreError>;
}
