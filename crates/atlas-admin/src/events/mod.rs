//! Event administration: creation with optional QR check-in codes, event detail,
//! the user directory listing, and attendance recording.

pub mod domain;
pub mod qr;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AttendanceRecord, EventCounts, EventId, EventInfo, EventRecord, NewEvent, User, UserId,
    UserSummary,
};
pub use qr::{QrError, QrRenderer};
pub use repository::{EventRepository, UserDirectory};
pub use router::event_router;
pub use service::{CheckInError, EventAdminService};
