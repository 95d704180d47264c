//! Append-only failure log written by the recruitment and event services.

pub mod domain;
pub mod repository;
pub mod router;

pub use domain::{ErrorTitle, LogEntry, LogType};
pub use repository::AuditLog;
pub use router::audit_router;
