use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::audit::{AuditLog, LogEntry};
use crate::error::PersistenceError;
use crate::persistence::RepositoryError;
use crate::recruitment::domain::{
    AppliedRole, AppliedRoleId, ApplicationStatus, CandidateId, RoleId,
};
use crate::recruitment::repository::AppliedRoleRepository;
use crate::recruitment::service::{RecruitmentService, StatusMutation};

pub(super) fn applied_role(id: &str, status: ApplicationStatus) -> AppliedRole {
    AppliedRole {
        id: AppliedRoleId(id.to_string()),
        status,
        candidate_id: CandidateId(format!("candidate-{id}")),
        role_id: RoleId("role-backend".to_string()),
    }
}

pub(super) fn build_service() -> (
    RecruitmentService<MemoryRepository, MemoryAudit>,
    Arc<MemoryRepository>,
    Arc<MemoryAudit>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let audit = Arc::new(MemoryAudit::default());
    let service = RecruitmentService::new(repository.clone(), audit.clone());
    (service, repository, audit)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AppliedRoleId, AppliedRole>>>,
}

impl MemoryRepository {
    pub(super) fn seeded(records: impl IntoIterator<Item = AppliedRole>) -> Self {
        let repository = Self::default();
        for record in records {
            repository.insert(record).expect("seed insert succeeds");
        }
        repository
    }

    pub(super) fn status_of(&self, id: &str) -> Option<ApplicationStatus> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(&AppliedRoleId(id.to_string()))
            .map(|record| record.status)
    }
}

impl AppliedRoleRepository for MemoryRepository {
    fn insert(&self, record: AppliedRole) -> Result<AppliedRole, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AppliedRoleId) -> Result<Option<AppliedRole>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<AppliedRole>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn update_status(
        &self,
        id: &AppliedRoleId,
        status: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        record.status = status;
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl AppliedRoleRepository for UnavailableRepository {
    fn insert(&self, _record: AppliedRole) -> Result<AppliedRole, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AppliedRoleId) -> Result<Option<AppliedRole>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<AppliedRole>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_status(
        &self,
        _id: &AppliedRoleId,
        _status: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
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

pub(super) struct BrokenAudit;

impl AuditLog for BrokenAudit {
    fn append(&self, _entry: LogEntry) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("log table locked".to_string()))
    }

    fn entries(&self) -> Result<Vec<LogEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("log table locked".to_string()))
    }
}

/// Mutation double that records every call and answers with a canned result.
#[derive(Default)]
pub(super) struct RecordingMutation {
    pub(super) calls: Mutex<Vec<(AppliedRoleId, ApplicationStatus)>>,
    pub(super) failure: Option<PersistenceError>,
}

impl RecordingMutation {
    pub(super) fn failing(error: PersistenceError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    pub(super) fn calls(&self) -> Vec<(AppliedRoleId, ApplicationStatus)> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

impl StatusMutation for RecordingMutation {
    fn update_applied_role_status(
        &self,
        applied_role_id: &AppliedRoleId,
        status: ApplicationStatus,
    ) -> Result<(), PersistenceError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push((applied_role_id.clone(), status));
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
