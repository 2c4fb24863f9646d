//! Notification persistence and dispatch.
//!
//! Both workflows call the dispatcher at the tail of a successful transition.
//! Dispatch is best-effort: a failure is logged by the caller and never rolls
//! back the transition that triggered it.

pub mod dispatcher;
pub mod domain;
pub mod repository;
pub mod router;

pub use dispatcher::{NotificationDispatcher, NotificationError};
pub use domain::{Notification, NotificationId, NotificationKind};
pub use repository::NotificationRepository;
pub use router::notification_router;
