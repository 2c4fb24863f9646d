use crate::infra::{
    InMemoryContentStore, InMemoryNotificationRepository, InMemoryProfileRepository,
    InMemoryReportRepository, InMemoryVerificationRepository,
};
use chrono::Utc;
use clap::Args;
use std::sync::Arc;

use clinicase::error::AppError;
use clinicase::notifications::NotificationDispatcher;
use clinicase::store::UserId;
use clinicase::workflows::moderation::{
    ContentId, ContentKind, ContentRef, ModerationAction, ModerationWorkflow, ReportId,
    ReportStatus, ReportedContent,
};
use clinicase::workflows::verification::{
    CredentialDocument, DoctorVerificationStatus, RequestId, UserProfile, VerificationRequest,
    VerificationStatus, VerificationWorkflow,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the moderation portion of the demo.
    #[arg(long)]
    pub(crate) skip_moderation: bool,
    /// Print each user's notification inbox at the end of the demo.
    #[arg(long)]
    pub(crate) show_inbox: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        skip_moderation,
        show_inbox,
    } = args;

    println!("Moderation and verification workflow demo");

    let requests = Arc::new(InMemoryVerificationRepository::default());
    let profiles = Arc::new(InMemoryProfileRepository::default());
    let reports = Arc::new(InMemoryReportRepository::default());
    let content = Arc::new(InMemoryContentStore::default());
    let notifications = Arc::new(InMemoryNotificationRepository::default());

    let dispatcher = Arc::new(NotificationDispatcher::new(notifications));
    let verification = Arc::new(VerificationWorkflow::new(
        requests.clone(),
        profiles.clone(),
        dispatcher.clone(),
    ));
    let moderation = Arc::new(ModerationWorkflow::new(
        reports.clone(),
        content.clone(),
        dispatcher.clone(),
    ));

    seed_verification(&requests, &profiles);
    let demo_users = run_verification_demo(&verification, &profiles)?;

    if !skip_moderation {
        seed_moderation(&reports, &content);
        run_moderation_demo(&moderation, &content)?;
    }

    if show_inbox {
        println!("\nNotification inboxes");
        for user in demo_users {
            let inbox = match dispatcher.for_user(&user) {
                Ok(inbox) => inbox,
                Err(err) => {
                    println!("- {user}: inbox unavailable ({err})");
                    continue;
                }
            };
            if inbox.is_empty() {
                println!("- {user}: empty");
                continue;
            }
            for notification in inbox {
                println!(
                    "- {user}: [{}] {} | {} | read={}",
                    notification.kind.label(),
                    notification.title,
                    notification.message,
                    notification.read
                );
            }
        }
    }

    Ok(())
}

fn seed_verification(
    requests: &InMemoryVerificationRepository,
    profiles: &InMemoryProfileRepository,
) {
    for (request_id, user_id) in [("req-demo-1", "dr-alvarez"), ("req-demo-2", "dr-okafor")] {
        requests.seed(VerificationRequest {
            id: RequestId(request_id.to_string()),
            user_id: UserId(user_id.to_string()),
            documents: vec![CredentialDocument {
                name: "Medical license".to_string(),
                storage_key: format!("uploads/{user_id}/license.pdf"),
            }],
            status: VerificationStatus::Pending,
            submitted_at: Utc::now(),
            reviewed_at: None,
            reviewer_id: None,
            rejection_reason: None,
        });
        profiles.seed(UserProfile {
            id: UserId(user_id.to_string()),
            doctor_verification: DoctorVerificationStatus::Pending,
            rejection_reason: None,
        });
    }
}

fn run_verification_demo(
    verification: &VerificationWorkflow<
        InMemoryVerificationRepository,
        InMemoryProfileRepository,
        InMemoryNotificationRepository,
    >,
    profiles: &InMemoryProfileRepository,
) -> Result<Vec<UserId>, AppError> {
    println!("\nVerification review queue");
    let queue = verification.pending().map_err(AppError::Workflow)?;
    for detail in &queue {
        println!(
            "- {} from {} ({} document(s))",
            detail.request.id.0,
            detail.request.user_id,
            detail.request.documents.len()
        );
    }

    let admin = UserId("admin-demo".to_string());

    let approved = verification
        .approve(&RequestId("req-demo-1".to_string()), &admin)
        .map_err(AppError::Workflow)?;
    println!(
        "\nApproved {} -> request status {}",
        approved.id.0,
        approved.status.label()
    );

    let rejected = verification
        .reject(
            &RequestId("req-demo-2".to_string()),
            &admin,
            "License number could not be matched against the registry",
        )
        .map_err(AppError::Workflow)?;
    println!(
        "Rejected {} -> request status {}",
        rejected.id.0,
        rejected.status.label()
    );

    // A second decision on a settled request is refused.
    match verification.approve(&RequestId("req-demo-1".to_string()), &admin) {
        Ok(_) => println!("Unexpected: settled request accepted a second decision"),
        Err(err) => println!("Replayed decision refused: {err}"),
    }

    let users = vec![approved.user_id.clone(), rejected.user_id.clone()];
    for user in &users {
        if let Some(profile) = profiles.get(user) {
            println!(
                "Profile {user}: doctor_verification={} rejection_reason={}",
                profile.doctor_verification.label(),
                profile.rejection_reason.as_deref().unwrap_or("none")
            );
        }
    }

    Ok(users)
}

fn seed_moderation(reports: &InMemoryReportRepository, content: &InMemoryContentStore) {
    let spam_case = ContentRef {
        kind: ContentKind::Case,
        id: ContentId("case-demo-9".to_string()),
    };
    let heated_comment = ContentRef {
        kind: ContentKind::Comment,
        id: ContentId("comment-demo-4".to_string()),
    };
    content.seed(spam_case.clone(), UserId("dr-alvarez".to_string()));
    content.seed(heated_comment.clone(), UserId("dr-okafor".to_string()));

    reports.seed(ReportedContent {
        id: ReportId("rep-demo-1".to_string()),
        content: spam_case,
        reported_by: UserId("dr-okafor".to_string()),
        reason: "Promotional content unrelated to the case".to_string(),
        status: ReportStatus::Pending,
        reported_at: Utc::now(),
        moderated_by: None,
        moderated_at: None,
    });
    reports.seed(ReportedContent {
        id: ReportId("rep-demo-2".to_string()),
        content: heated_comment,
        reported_by: UserId("dr-alvarez".to_string()),
        reason: "Unprofessional tone".to_string(),
        status: ReportStatus::Pending,
        reported_at: Utc::now(),
        moderated_by: None,
        moderated_at: None,
    });
}

fn run_moderation_demo(
    moderation: &ModerationWorkflow<
        InMemoryReportRepository,
        InMemoryContentStore,
        InMemoryNotificationRepository,
    >,
    content: &InMemoryContentStore,
) -> Result<(), AppError> {
    println!("\nModeration queue");
    let queue = moderation.pending().map_err(AppError::Workflow)?;
    for report in &queue {
        println!(
            "- {} against {} {} (reason: {})",
            report.id.0,
            report.content.kind.label(),
            report.content.id.0,
            report.reason
        );
    }

    let moderator = UserId("admin-demo".to_string());

    let removed = moderation
        .moderate(
            &ReportId("rep-demo-1".to_string()),
            ModerationAction::Removed,
            &moderator,
        )
        .map_err(AppError::Workflow)?;
    println!(
        "\nRemoved {} {} -> report status {} | content still present: {}",
        removed.content.kind.label(),
        removed.content.id.0,
        removed.status.label(),
        content.exists(&removed.content)
    );

    let reviewed = moderation
        .moderate(
            &ReportId("rep-demo-2".to_string()),
            ModerationAction::Reviewed,
            &moderator,
        )
        .map_err(AppError::Workflow)?;
    println!(
        "Reviewed {} {} -> report status {} | content still present: {}",
        reviewed.content.kind.label(),
        reviewed.content.id.0,
        reviewed.status.label(),
        content.exists(&reviewed.content)
    );

    Ok(())
}
