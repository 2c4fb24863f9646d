//! Core workflow engine for the Clinicase medical community platform.
//!
//! The engine owns two admin workflows — doctor-credential verification and
//! reported-content moderation — plus the notification dispatcher both invoke
//! as a best-effort side effect. Everything talks to the document store
//! through repository traits so deployments (and tests) choose the backing
//! store at construction time.

pub mod config;
pub mod error;
pub mod notifications;
pub mod store;
pub mod telemetry;
pub mod workflows;
