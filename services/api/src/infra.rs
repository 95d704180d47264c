use atlas_admin::audit::{AuditLog, LogEntry};
use atlas_admin::events::{
    AttendanceRecord, EventId, EventRecord, EventRepository, User, UserDirectory, UserId,
};
use atlas_admin::persistence::RepositoryError;
use atlas_admin::recruitment::{
    AppliedRole, AppliedRoleId, AppliedRoleRepository, ApplicationStatus, CandidateId, RoleId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAppliedRoleRepository {
    records: Arc<Mutex<BTreeMap<AppliedRoleId, AppliedRole>>>,
}

impl AppliedRoleRepository for InMemoryAppliedRoleRepository {
    fn insert(&self, record: AppliedRole) -> Result<AppliedRole, RepositoryError> {
        let mut guard = self.records.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AppliedRoleId) -> Result<Option<AppliedRole>, RepositoryError> {
        let guard = self.records.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<AppliedRole>, RepositoryError> {
        let guard = self.records.lock()?;
        Ok(guard.values().cloned().collect())
    }

    fn update_status(
        &self,
        id: &AppliedRoleId,
        status: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock()?;
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.status = status;
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEventRepository {
    records: Arc<Mutex<HashMap<EventId, EventRecord>>>,
}

impl EventRepository for InMemoryEventRepository {
    fn insert(&self, event: EventRecord) -> Result<EventRecord, RepositoryError> {
        let mut guard = self.records.lock()?;
        if guard.contains_key(&event.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    fn fetch(&self, id: &EventId) -> Result<Option<EventRecord>, RepositoryError> {
        let guard = self.records.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn mark_started(&self, id: &EventId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock()?;
        let event = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        event.has_started = true;
        Ok(())
    }

    fn record_attendance(
        &self,
        id: &EventId,
        attendance: AttendanceRecord,
    ) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock()?;
        let event = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if event.has_checked_in(&attendance.user_id) {
            return Ok(false);
        }
        event.attendance.push(attendance);
        Ok(true)
    }
}

impl InMemoryEventRepository {
    pub(crate) fn all(&self) -> Result<Vec<EventRecord>, RepositoryError> {
        let guard = self.records.lock()?;
        let mut events: Vec<_> = guard.values().cloned().collect();
        events.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.name.cmp(&b.name)));
        Ok(events)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryUserDirectory {
    users: Arc<Mutex<BTreeMap<UserId, User>>>,
}

impl InMemoryUserDirectory {
    pub(crate) fn add(&self, user: User) -> Result<(), RepositoryError> {
        let mut guard = self.users.lock()?;
        if guard.contains_key(&user.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(user.id.clone(), user);
        Ok(())
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn all(&self) -> Result<Vec<User>, RepositoryError> {
        let guard = self.users.lock()?;
        Ok(guard.values().cloned().collect())
    }

    fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        let guard = self.users.lock()?;
        Ok(ids.iter().filter_map(|id| guard.get(id).cloned()).collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl AuditLog for InMemoryAuditLog {
    fn append(&self, entry: LogEntry) -> Result<(), RepositoryError> {
        self.entries.lock()?.push(entry);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LogEntry>, RepositoryError> {
        Ok(self.entries.lock()?.clone())
    }
}

/// All storage adapters backing one process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStores {
    pub(crate) applied_roles: Arc<InMemoryAppliedRoleRepository>,
    pub(crate) events: Arc<InMemoryEventRepository>,
    pub(crate) users: Arc<InMemoryUserDirectory>,
    pub(crate) audit: Arc<InMemoryAuditLog>,
}

const DEMO_USERS: [(&str, &str, Option<&str>, &[&str]); 5] = [
    ("user-ada", "Ada Lovelace", Some("Engineering"), &["ADMIN"]),
    ("user-grace", "Grace Hopper", Some("Engineering"), &["MEMBER"]),
    ("user-katherine", "Katherine Johnson", Some("Research"), &["MEMBER"]),
    ("user-margaret", "Margaret Hamilton", Some("Operations"), &["MEMBER", "RECRUITER"]),
    ("user-alan", "Alan Turing", None, &["MEMBER"]),
];

const DEMO_APPLICATIONS: [(&str, &str, &str, ApplicationStatus); 4] = [
    ("ar-001", "cand-jordan", "role-backend", ApplicationStatus::Pending),
    ("ar-002", "cand-riley", "role-backend", ApplicationStatus::Interviewed),
    ("ar-003", "cand-sam", "role-design", ApplicationStatus::Offered),
    ("ar-004", "cand-avery", "role-ops", ApplicationStatus::Pending),
];

/// Populate empty stores with a small fixed data set.
pub(crate) fn seed_demo_data(stores: &InMemoryStores) -> Result<(), RepositoryError> {
    for (id, name, department, roles) in DEMO_USERS {
        stores.users.add(User {
            id: UserId(id.to_string()),
            name: name.to_string(),
            email: format!("{}@atlas.example", id.trim_start_matches("user-")),
            department: department.map(str::to_string),
            roles: roles.iter().map(|role| role.to_string()).collect(),
        })?;
    }

    for (id, candidate, role, status) in DEMO_APPLICATIONS {
        stores.applied_roles.insert(AppliedRole {
            id: AppliedRoleId(id.to_string()),
            status,
            candidate_id: CandidateId(candidate.to_string()),
            role_id: RoleId(role.to_string()),
        })?;
    }

    Ok(())
}
