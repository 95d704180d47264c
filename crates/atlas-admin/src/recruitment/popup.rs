//! Client-side status popup for one applied role.
//!
//! The popup renders the current status as a colored indicator, lists every status as a
//! selectable option, and drives a [`StatusMutation`] when a choice is committed. The
//! displayed status only moves once the mutation has succeeded and the record list has been
//! re-fetched; failed mutations leave the previous value in place and raise an error toast.
//! A failed re-fetch after a successful mutation falls back to the selected status.
//!
//! Each commit is tagged with an [`UpdateTicket`]. Only the most recent ticket may change
//! what is displayed, so a slow response to an earlier selection cannot overwrite a newer one.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::domain::{AppliedRole, AppliedRoleId, ApplicationStatus, StatusSwatch, STATUS_SWATCHES};
use super::service::StatusMutation;
use crate::error::PersistenceError;

const TOAST_DURATION_MS: i64 = 2_000;
const SUCCESS_TITLE: &str = "Success";
const SUCCESS_DESCRIPTION: &str = "Application status updated successfully!";
const ERROR_TITLE: &str = "Oops, an error occurred!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification raised after a commit settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
    pub raised_at: DateTime<Utc>,
    pub duration: Duration,
}

impl Toast {
    fn new(kind: ToastKind, title: &str, description: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description,
            raised_at: Utc::now(),
            duration: Duration::milliseconds(TOAST_DURATION_MS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.raised_at >= self.duration
    }
}

/// Colored dot shown in place of the status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIndicator {
    pub status: ApplicationStatus,
    pub color: &'static str,
}

/// Handle for one in-flight commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateTicket {
    sequence: u64,
    status: ApplicationStatus,
}

impl UpdateTicket {
    pub fn status(&self) -> ApplicationStatus {
        self.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The mutation succeeded; carries the status now displayed.
    Applied(ApplicationStatus),
    Failed { message: String },
    /// A newer commit was issued before this one settled; nothing changed.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    AwaitingConfirmation(ApplicationStatus),
    Committed(UpdateOutcome),
}

pub struct StatusPopup<M, F> {
    applied_role_id: AppliedRoleId,
    displayed: ApplicationStatus,
    awaiting_confirmation: Option<ApplicationStatus>,
    latest_sequence: u64,
    toasts: Vec<Toast>,
    mutation: Arc<M>,
    refetch: F,
}

impl<M, F, E> StatusPopup<M, F>
where
    M: StatusMutation,
    F: FnMut() -> Result<Vec<AppliedRole>, E>,
    E: fmt::Display,
{
    pub fn new(
        applied_role_id: AppliedRoleId,
        status: ApplicationStatus,
        mutation: Arc<M>,
        refetch: F,
    ) -> Self {
        Self {
            applied_role_id,
            displayed: status,
            awaiting_confirmation: None,
            latest_sequence: 0,
            toasts: Vec::new(),
            mutation,
            refetch,
        }
    }

    pub fn applied_role_id(&self) -> &AppliedRoleId {
        &self.applied_role_id
    }

    pub fn indicator(&self) -> StatusIndicator {
        StatusIndicator {
            status: self.displayed,
            color: self.displayed.color(),
        }
    }

    pub fn options(&self) -> &'static [StatusSwatch] {
        &STATUS_SWATCHES
    }

    /// Status held by the open confirmation dialog, if any.
    pub fn awaiting_confirmation(&self) -> Option<ApplicationStatus> {
        self.awaiting_confirmation
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn prune_toasts(&mut self, now: DateTime<Utc>) {
        self.toasts.retain(|toast| !toast.is_expired(now));
    }

    /// Handle a click on one of the listed statuses.
    pub fn select(&mut self, status: ApplicationStatus) -> Selection {
        if status.requires_confirmation() {
            self.awaiting_confirmation = Some(status);
            return Selection::AwaitingConfirmation(status);
        }

        self.awaiting_confirmation = None;
        Selection::Committed(self.commit(status))
    }

    /// Confirm the dialog, committing the held status. `None` when no dialog is open.
    pub fn confirm(&mut self) -> Option<UpdateOutcome> {
        let status = self.awaiting_confirmation.take()?;
        Some(self.commit(status))
    }

    /// Close the dialog without committing anything.
    pub fn cancel(&mut self) -> Option<ApplicationStatus> {
        self.awaiting_confirmation.take()
    }

    /// Open a new commit. Any ticket issued earlier becomes stale.
    pub fn begin_update(&mut self, status: ApplicationStatus) -> UpdateTicket {
        self.latest_sequence += 1;
        UpdateTicket {
            sequence: self.latest_sequence,
            status,
        }
    }

    /// Settle a commit with the mutation's result.
    pub fn complete_update(
        &mut self,
        ticket: UpdateTicket,
        result: Result<(), PersistenceError>,
    ) -> UpdateOutcome {
        if ticket.sequence != self.latest_sequence {
            debug!(
                applied_role = %self.applied_role_id,
                status = %ticket.status,
                "discarding stale status response"
            );
            return UpdateOutcome::Stale;
        }

        if let Err(error) = result {
            return self.fail(error.to_string());
        }

        let confirmed = match (self.refetch)() {
            Ok(records) => records
                .iter()
                .find(|record| record.id == self.applied_role_id)
                .map(|record| record.status)
                .unwrap_or(ticket.status),
            Err(error) => {
                warn!(
                    applied_role = %self.applied_role_id,
                    %error,
                    "refetch after status update failed"
                );
                ticket.status
            }
        };

        self.displayed = confirmed;
        self.toasts.push(Toast::new(
            ToastKind::Success,
            SUCCESS_TITLE,
            SUCCESS_DESCRIPTION.to_string(),
        ));
        UpdateOutcome::Applied(confirmed)
    }

    fn commit(&mut self, status: ApplicationStatus) -> UpdateOutcome {
        let ticket = self.begin_update(status);
        let result = self
            .mutation
            .update_applied_role_status(&self.applied_role_id, status);
        self.complete_update(ticket, result)
    }

    fn fail(&mut self, message: String) -> UpdateOutcome {
        self.toasts
            .push(Toast::new(ToastKind::Error, ERROR_TITLE, message.clone()));
        UpdateOutcome::Failed { message }
    }
}
