//! Recruitment pipeline: the application status vocabulary, the status mutation service,
//! its HTTP surface, and the client-side status popup.

pub mod domain;
pub mod popup;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AppliedRole, AppliedRoleId, ApplicationStatus, CandidateId, RoleId, StatusSwatch,
    STATUS_SWATCHES,
};
pub use popup::{
    Selection, StatusIndicator, StatusPopup, Toast, ToastKind, UpdateOutcome, UpdateTicket,
};
pub use repository::AppliedRoleRepository;
pub use router::recruitment_router;
pub use service::{RecruitmentService, StatusMutation};
