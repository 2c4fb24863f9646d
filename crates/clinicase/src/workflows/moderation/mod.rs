//! Reported-content moderation workflow.
//!
//! A report enters as `pending` and leaves exactly once, to `reviewed`
//! (content retained) or `removed` (content deleted through the per-type
//! content-store hook). The report write and the content deletion are a
//! single logical unit: a failed deletion rolls the report back to pending.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{
    ContentId, ContentKind, ContentRef, ModerationAction, ReportId, ReportStatus, ReportedContent,
};
pub use repository::{ContentStore, ReportRepository};
pub use router::moderation_router;
pub use service::ModerationWorkflow;
