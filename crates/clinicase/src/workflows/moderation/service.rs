use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{error, warn};

use crate::notifications::{NotificationDispatcher, NotificationKind, NotificationRepository};
use crate::store::{CasOutcome, UserId};
use crate::workflows::WorkflowError;

use super::domain::{ModerationAction, ReportId, ReportStatus, ReportedContent};
use super::repository::{ContentStore, ReportRepository};

/// Workflow service governing content-report transitions.
pub struct ModerationWorkflow<R, C, N> {
    reports: Arc<R>,
    content: Arc<C>,
    notifications: Arc<NotificationDispatcher<N>>,
}

impl<R, C, N> ModerationWorkflow<R, C, N>
where
    R: ReportRepository + 'static,
    C: ContentStore + 'static,
    N: NotificationRepository + 'static,
{
    pub fn new(
        reports: Arc<R>,
        content: Arc<C>,
        notifications: Arc<NotificationDispatcher<N>>,
    ) -> Self {
        Self {
            reports,
            content,
            notifications,
        }
    }

    /// The moderation queue: every report still awaiting a decision.
    pub fn pending(&self) -> Result<Vec<ReportedContent>, WorkflowError> {
        let queue = self.reports.pending()?;
        Ok(queue)
    }

    /// Apply the moderator's decision to a pending report.
    ///
    /// `Reviewed` retains the content. `Removed` deletes the content record
    /// through the per-type hook; the hook runs at most once, after the
    /// report write committed, and a hook failure rolls the report back.
    pub fn moderate(
        &self,
        id: &ReportId,
        action: ModerationAction,
        moderator: &UserId,
    ) -> Result<ReportedContent, WorkflowError> {
        let current = self.reports.fetch(id)?.ok_or(WorkflowError::NotFound)?;

        let target = action.target();
        if !current.status.permits(target) {
            return Err(WorkflowError::InvalidState {
                from: current.status.label(),
            });
        }

        // Resolve the author before any destructive write; after a removal
        // the content record is gone.
        let author = self.content.author_of(&current.content)?;

        let mut updated = current.clone();
        updated.status = target;
        updated.moderated_by = Some(moderator.clone());
        updated.moderated_at = Some(Utc::now());

        match self
            .reports
            .update_if_status(ReportStatus::Pending, updated.clone())?
        {
            CasOutcome::Applied => {}
            CasOutcome::StatusMismatch => return Err(WorkflowError::Conflict),
        }

        if action == ModerationAction::Removed {
            if let Err(delete_err) = self.content.delete(&current.content) {
                if let Err(rollback_err) = self.reports.restore(current) {
                    error!(
                        report = %updated.id.0,
                        error = %rollback_err,
                        "failed to roll back report after content deletion failure"
                    );
                }
                return Err(delete_err.into());
            }
        }

        self.notify(&updated, action, author);

        Ok(updated)
    }

    /// Best-effort dispatch to the content's author (not the reporter). A
    /// missing author means the content was already gone; skip with a log.
    fn notify(&self, report: &ReportedContent, action: ModerationAction, author: Option<UserId>) {
        let Some(author) = author else {
            warn!(
                report = %report.id.0,
                content = %report.content.id.0,
                "content author unresolved, skipping moderation notification"
            );
            return;
        };

        let kind_label = report.content.kind.label();
        let (title, message) = match action {
            ModerationAction::Reviewed => (
                "Content reviewed".to_string(),
                format!("A report against your {kind_label} was reviewed; no action was taken."),
            ),
            ModerationAction::Removed => (
                "Content removed".to_string(),
                format!("Your {kind_label} was removed after moderation review."),
            ),
        };

        let data = json!({
            "report_id": report.id.0,
            "content_id": report.content.id.0,
        });
        if let Err(err) = self.notifications.create(
            author,
            NotificationKind::Moderation,
            title,
            message,
            Some(data),
        ) {
            warn!(
                report = %report.id.0,
                error = %err,
                "moderation notification dispatch failed"
            );
        }
    }
}
