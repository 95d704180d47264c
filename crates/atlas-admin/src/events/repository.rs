use super::domain::{AttendanceRecord, EventId, EventRecord, User, UserId};
use crate::persistence::RepositoryError;

/// Event storage. Every mutation touches exactly one event record.
pub trait EventRepository: Send + Sync {
    fn insert(&self, event: EventRecord) -> Result<EventRecord, RepositoryError>;
    fn fetch(&self, id: &EventId) -> Result<Option<EventRecord>, RepositoryError>;
    fn mark_started(&self, id: &EventId) -> Result<(), RepositoryError>;
    /// Append a check-in unless that user already has one. Returns whether a record was added.
    fn record_attendance(
        &self,
        id: &EventId,
        attendance: AttendanceRecord,
    ) -> Result<bool, RepositoryError>;
}

/// Read access to the user directory.
pub trait UserDirectory: Send + Sync {
    fn all(&self) -> Result<Vec<User>, RepositoryError>;
    /// Users matching `ids`, in the order given. Unknown ids are skipped.
    fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError>;
}
