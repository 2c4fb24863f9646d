use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::UserId;

/// Identifier wrapper for content reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

/// Identifier of the reported content record inside its own collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(pub String);

/// The content types users can report. Each maps to its own collection in
/// the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Case,
    Comment,
    Profile,
}

impl ContentKind {
    pub const fn label(self) -> &'static str {
        match self {
            ContentKind::Case => "case",
            ContentKind::Comment => "comment",
            ContentKind::Profile => "profile",
        }
    }
}

/// A (kind, id) pair locating one content record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRef {
    pub kind: ContentKind,
    pub id: ContentId,
}

/// Lifecycle states of a content report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Removed,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Reviewed => "reviewed",
            ReportStatus::Removed => "removed",
        }
    }

    /// Transition table: `pending -> reviewed` and `pending -> removed` are
    /// the only edges. Both targets are terminal.
    pub const fn permits(self, target: ReportStatus) -> bool {
        matches!(
            (self, target),
            (ReportStatus::Pending, ReportStatus::Reviewed)
                | (ReportStatus::Pending, ReportStatus::Removed)
        )
    }
}

/// The moderator's decision on a pending report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Reviewed,
    Removed,
}

impl ModerationAction {
    pub const fn target(self) -> ReportStatus {
        match self {
            ModerationAction::Reviewed => ReportStatus::Reviewed,
            ModerationAction::Removed => ReportStatus::Removed,
        }
    }
}

/// A user-filed report against one piece of content.
///
/// Created by the reporting path with `status = pending`; mutated only by an
/// admin through the workflow. Terminal records are retained as an audit
/// trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedContent {
    pub id: ReportId,
    pub content: ContentRef,
    pub reported_by: UserId,
    pub reason: String,
    pub status: ReportStatus,
    pub reported_at: DateTime<Utc>,
    pub moderated_by: Option<UserId>,
    pub moderated_at: Option<DateTime<Utc>>,
}
