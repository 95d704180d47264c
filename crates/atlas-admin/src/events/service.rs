use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::domain::{
    AttendanceRecord, EventCounts, EventId, EventInfo, EventRecord, NewEvent, UserId, UserSummary,
};
use super::qr::{QrError, QrRenderer};
use super::repository::{EventRepository, UserDirectory};
use crate::audit::{AuditLog, ErrorTitle, LogEntry};
use crate::error::{InternalError, PersistenceError};
use crate::persistence::RepositoryError;

/// Reasons event creation can fail. Never returned to callers; recorded in the audit log.
#[derive(Debug, thiserror::Error)]
enum CreateEventError {
    #[error(transparent)]
    Qr(#[from] QrError),
    #[error("attendee '{0}' does not exist")]
    UnknownAttendee(UserId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckInError {
    #[error("event '{0}' not found")]
    EventNotFound(EventId),
    #[error("event '{0}' has not started")]
    NotStarted(EventId),
    #[error("user '{user}' is not an attendee of event '{event}'")]
    NotInvited { event: EventId, user: UserId },
    #[error(transparent)]
    Read(InternalError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Admin operations over events and the user directory.
pub struct EventAdminService<E, U, L> {
    events: Arc<E>,
    users: Arc<U>,
    audit: Arc<L>,
    qr: QrRenderer,
}

impl<E, U, L> EventAdminService<E, U, L>
where
    E: EventRepository + 'static,
    U: UserDirectory + 'static,
    L: AuditLog + 'static,
{
    pub fn new(events: Arc<E>, users: Arc<U>, audit: Arc<L>, qr: QrRenderer) -> Self {
        Self {
            events,
            users,
            audit,
            qr,
        }
    }

    /// Create an event with a freshly generated id. Repeated attendee ids are stored once.
    ///
    /// Failures are written to the audit log as `ERROR_CREATING_EVENT` and are not reported
    /// back to the caller.
    pub fn create_event(&self, input: NewEvent) {
        let id = EventId(Uuid::new_v4().to_string());
        match self.try_create_event(id, input) {
            Ok(event) => {
                info!(event = %event.id, attendees = event.attendees.len(), "event created");
            }
            Err(failure) => {
                error!(error = %failure, "event creation failed");
                let entry = LogEntry::error(ErrorTitle::ErrorCreatingEvent, failure.to_string());
                if let Err(audit_error) = self.audit.append(entry) {
                    error!(%audit_error, "audit log append failed");
                }
            }
        }
    }

    fn try_create_event(&self, id: EventId, input: NewEvent) -> Result<EventRecord, CreateEventError> {
        let NewEvent {
            name,
            start_date,
            end_date,
            departments,
            attendees,
            is_qr_required,
        } = input;

        let qr_code = if is_qr_required {
            Some(self.qr.data_url(&id.0)?)
        } else {
            None
        };

        let mut seen = HashSet::new();
        let attendees: Vec<UserId> = attendees
            .into_iter()
            .filter(|attendee| seen.insert(attendee.clone()))
            .collect();

        let known = self.users.find_many(&attendees)?;
        if let Some(missing) = attendees
            .iter()
            .find(|attendee| !known.iter().any(|user| &user.id == *attendee))
        {
            return Err(CreateEventError::UnknownAttendee(missing.clone()));
        }

        let event = EventRecord {
            id,
            name,
            start_date,
            end_date,
            departments,
            attendees,
            attendance: Vec::new(),
            qr_code,
            has_started: false,
        };

        Ok(self.events.insert(event)?)
    }

    pub fn get_all_users(&self) -> Result<Vec<UserSummary>, InternalError> {
        let users = self.users.all().map_err(InternalError::from_cause)?;
        Ok(users.iter().map(|user| user.summary()).collect())
    }

    /// Detail view of one event; `None` when no event carries `event_id`.
    pub fn get_event_info(&self, event_id: &EventId) -> Result<Option<EventInfo>, InternalError> {
        let Some(event) = self
            .events
            .fetch(event_id)
            .map_err(InternalError::from_cause)?
        else {
            return Ok(None);
        };

        let attendees = self
            .users
            .find_many(&event.attendees)
            .map_err(InternalError::from_cause)?
            .iter()
            .map(|user| user.summary())
            .collect();

        Ok(Some(EventInfo {
            counts: EventCounts {
                attendance: event.attendance.len(),
                attendees: event.attendees.len(),
            },
            id: event.id,
            name: event.name,
            start_date: event.start_date,
            end_date: event.end_date,
            has_started: event.has_started,
            qr_code: event.qr_code,
            attendees,
        }))
    }

    /// Open the event for check-ins.
    pub fn start_event(&self, event_id: &EventId) -> Result<(), CheckInError> {
        match self.events.mark_started(event_id) {
            Ok(()) => {
                info!(event = %event_id, "event started");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(CheckInError::EventNotFound(event_id.clone())),
            Err(other) => Err(self.attendance_failure(other)),
        }
    }

    /// Record a scanned check-in. Repeated check-ins by the same user are accepted and ignored.
    pub fn check_in(&self, event_id: &EventId, user_id: &UserId) -> Result<(), CheckInError> {
        let event = self
            .events
            .fetch(event_id)
            .map_err(|err| CheckInError::Read(InternalError::from_cause(err)))?
            .ok_or_else(|| CheckInError::EventNotFound(event_id.clone()))?;

        if !event.has_started {
            return Err(CheckInError::NotStarted(event_id.clone()));
        }
        if !event.is_attendee(user_id) {
            return Err(CheckInError::NotInvited {
                event: event_id.clone(),
                user: user_id.clone(),
            });
        }

        let attendance = AttendanceRecord {
            user_id: user_id.clone(),
            checked_in_at: Utc::now(),
        };
        match self.events.record_attendance(event_id, attendance) {
            Ok(true) => {
                info!(event = %event_id, user = %user_id, "attendance recorded");
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(RepositoryError::NotFound) => Err(CheckInError::EventNotFound(event_id.clone())),
            Err(other) => Err(self.attendance_failure(other)),
        }
    }

    fn attendance_failure(&self, cause: RepositoryError) -> CheckInError {
        let error = PersistenceError::Write(cause.to_string());
        warn!(%error, "attendance write failed");
        let entry = LogEntry::error(ErrorTitle::ErrorRecordingAttendance, error.to_string());
        if let Err(audit_error) = self.audit.append(entry) {
            warn!(%audit_error, "audit log append failed");
        }
        CheckInError::Persistence(error)
    }
}
