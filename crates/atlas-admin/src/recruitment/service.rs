use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::domain::{AppliedRole, AppliedRoleId, ApplicationStatus, CandidateId, RoleId};
use super::repository::AppliedRoleRepository;
use crate::audit::{AuditLog, ErrorTitle, LogEntry};
use crate::error::{InternalError, PersistenceError};
use crate::persistence::RepositoryError;

/// Port the status popup drives. Implemented by the in-process service and by any remote client.
pub trait StatusMutation {
    fn update_applied_role_status(
        &self,
        applied_role_id: &AppliedRoleId,
        status: ApplicationStatus,
    ) -> Result<(), PersistenceError>;
}

/// Service composing the applied-role repository and the audit log.
pub struct RecruitmentService<R, L> {
    repository: Arc<R>,
    audit: Arc<L>,
}

impl<R, L> RecruitmentService<R, L>
where
    R: AppliedRoleRepository + 'static,
    L: AuditLog + 'static,
{
    pub fn new(repository: Arc<R>, audit: Arc<L>) -> Self {
        Self { repository, audit }
    }

    /// Persist a new status for one applied role. Any status may follow any other.
    pub fn update_status(
        &self,
        applied_role_id: &AppliedRoleId,
        status: ApplicationStatus,
    ) -> Result<(), PersistenceError> {
        match self.repository.update_status(applied_role_id, status) {
            Ok(()) => {
                info!(applied_role = %applied_role_id, %status, "application status updated");
                Ok(())
            }
            Err(err) => {
                let error = match err {
                    RepositoryError::NotFound => PersistenceError::NotFound {
                        entity: "applied role",
                        id: applied_role_id.0.clone(),
                    },
                    other => PersistenceError::Write(other.to_string()),
                };
                self.record_failure(ErrorTitle::ErrorUpdatingApplicationStatus, &error);
                Err(error)
            }
        }
    }

    /// Register a candidate's application to a role, starting in `PENDING`.
    pub fn submit_application(
        &self,
        candidate_id: CandidateId,
        role_id: RoleId,
    ) -> Result<AppliedRole, PersistenceError> {
        let record = AppliedRole {
            id: AppliedRoleId(Uuid::new_v4().to_string()),
            status: ApplicationStatus::Pending,
            candidate_id,
            role_id,
        };

        self.repository
            .insert(record)
            .map_err(|err| PersistenceError::Write(err.to_string()))
    }

    pub fn list_applied_roles(&self) -> Result<Vec<AppliedRole>, InternalError> {
        let mut records = self.repository.list().map_err(InternalError::from_cause)?;
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    pub fn get_applied_role(
        &self,
        applied_role_id: &AppliedRoleId,
    ) -> Result<Option<AppliedRole>, InternalError> {
        self.repository
            .fetch(applied_role_id)
            .map_err(InternalError::from_cause)
    }

    fn record_failure(&self, title: ErrorTitle, error: &PersistenceError) {
        warn!(title = title.label(), %error, "recording failure in audit log");
        if let Err(audit_error) = self.audit.append(LogEntry::error(title, error.to_string())) {
            warn!(%audit_error, "audit log append failed");
        }
    }
}

impl<R, L> StatusMutation for RecruitmentService<R, L>
where
    R: AppliedRoleRepository + 'static,
    L: AuditLog + 'static,
{
    fn update_applied_role_status(
        &self,
        applied_role_id: &AppliedRoleId,
        status: ApplicationStatus,
    ) -> Result<(), PersistenceError> {
        self.update_status(applied_role_id, status)
    }
}
