use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::audit::{AuditLog, LogEntry};
use crate::config::QrConfig;
use crate::events::domain::{AttendanceRecord, EventId, EventRecord, NewEvent, User, UserId};
use crate::events::qr::QrRenderer;
use crate::events::repository::{EventRepository, UserDirectory};
use crate::events::service::EventAdminService;
use crate::persistence::RepositoryError;

pub(super) type MemoryService = EventAdminService<MemoryEvents, MemoryUsers, MemoryAudit>;

pub(super) fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 3, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn user(id: &str, name: &str, department: Option<&str>) -> User {
    User {
        id: UserId(id.to_string()),
        name: name.to_string(),
        email: format!("{id}@atlas.test"),
        department: department.map(str::to_string),
        roles: vec!["MEMBER".to_string()],
    }
}

pub(super) fn directory() -> MemoryUsers {
    MemoryUsers::new(vec![
        user("u-1", "Ada", Some("Engineering")),
        user("u-2", "Grace", Some("Design")),
        user("u-3", "Linus", None),
    ])
}

pub(super) fn new_event(attendees: &[&str], is_qr_required: bool) -> NewEvent {
    NewEvent {
        name: "General meeting".to_string(),
        start_date: at(18),
        end_date: at(20),
        departments: vec!["Engineering".to_string()],
        attendees: attendees.iter().map(|id| UserId(id.to_string())).collect(),
        is_qr_required,
    }
}

pub(super) fn renderer() -> QrRenderer {
    QrRenderer::new(QrConfig { min_dimension: 64 })
}

pub(super) fn build_service() -> (MemoryService, Arc<MemoryEvents>, Arc<MemoryAudit>) {
    let events = Arc::new(MemoryEvents::default());
    let audit = Arc::new(MemoryAudit::default());
    let service = EventAdminService::new(
        events.clone(),
        Arc::new(directory()),
        audit.clone(),
        renderer(),
    );
    (service, events, audit)
}

/// Creates one event and hands back its generated id.
pub(super) fn create_one(service: &MemoryService, events: &MemoryEvents, input: NewEvent) -> EventId {
    service.create_event(input);
    events
        .all()
        .pop()
        .map(|event| event.id)
        .expect("event stored")
}

#[derive(Default)]
pub(super) struct MemoryEvents {
    records: Mutex<Vec<EventRecord>>,
}

impl MemoryEvents {
    pub(super) fn from_records(records: Vec<EventRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub(super) fn all(&self) -> Vec<EventRecord> {
        self.records.lock().expect("events mutex poisoned").clone()
    }
}

impl EventRepository for MemoryEvents {
    fn insert(&self, event: EventRecord) -> Result<EventRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("events mutex poisoned");
        if guard.iter().any(|existing| existing.id == event.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(event.clone());
        Ok(event)
    }

    fn fetch(&self, id: &EventId) -> Result<Option<EventRecord>, RepositoryError> {
        let guard = self.records.lock().expect("events mutex poisoned");
        Ok(guard.iter().find(|event| &event.id == id).cloned())
    }

    fn mark_started(&self, id: &EventId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("events mutex poisoned");
        let event = guard
            .iter_mut()
            .find(|event| &event.id == id)
            .ok_or(RepositoryError::NotFound)?;
        event.has_started = true;
        Ok(())
    }

    fn record_attendance(
        &self,
        id: &EventId,
        attendance: AttendanceRecord,
    ) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().expect("events mutex poisoned");
        let event = guard
            .iter_mut()
            .find(|event| &event.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if event.has_checked_in(&attendance.user_id) {
            return Ok(false);
        }
        event.attendance.push(attendance);
        Ok(true)
    }
}

/// Event store whose writes always fail, as if the database rejected them.
pub(super) struct RejectingEvents {
    pub(super) inner: MemoryEvents,
}

impl EventRepository for RejectingEvents {
    fn insert(&self, _event: EventRecord) -> Result<EventRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("insert rejected".to_string()))
    }

    fn fetch(&self, id: &EventId) -> Result<Option<EventRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn mark_started(&self, _id: &EventId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("update rejected".to_string()))
    }

    fn record_attendance(
        &self,
        _id: &EventId,
        _attendance: AttendanceRecord,
    ) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("update rejected".to_string()))
    }
}

/// Event store that cannot be read or written.
pub(super) struct UnavailableEvents;

impl EventRepository for UnavailableEvents {
    fn insert(&self, _event: EventRecord) -> Result<EventRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("events offline".to_string()))
    }

    fn fetch(&self, _id: &EventId) -> Result<Option<EventRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("events offline".to_string()))
    }

    fn mark_started(&self, _id: &EventId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("events offline".to_string()))
    }

    fn record_attendance(
        &self,
        _id: &EventId,
        _attendance: AttendanceRecord,
    ) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("events offline".to_string()))
    }
}

pub(super) struct MemoryUsers {
    users: HashMap<UserId, User>,
    order: Vec<UserId>,
}

impl MemoryUsers {
    pub(super) fn new(users: Vec<User>) -> Self {
        let order = users.iter().map(|user| user.id.clone()).collect();
        let users = users.into_iter().map(|user| (user.id.clone(), user)).collect();
        Self { users, order }
    }
}

impl UserDirectory for MemoryUsers {
    fn all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.users.get(id).cloned())
            .collect())
    }

    fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        Ok(ids.iter().filter_map(|id| self.users.get(id).cloned()).collect())
    }
}

pub(super) struct UnavailableUsers;

impl UserDirectory for UnavailableUsers {
    fn all(&self) -> Result<Vec<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("directory offline".to_string()))
    }

    fn find_many(&self, _ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("directory offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAudit {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl AuditLog for MemoryAudit {
    fn append(&self, entry: LogEntry) -> Result<(), RepositoryError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LogEntry>, RepositoryError> {
        Ok(self.entries.lock().expect("audit mutex poisoned").clone())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
