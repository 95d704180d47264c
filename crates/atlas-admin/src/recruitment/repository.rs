use super::domain::{AppliedRole, AppliedRoleId, ApplicationStatus};
use crate::persistence::RepositoryError;

/// Storage abstraction so the status service can be exercised in isolation.
pub trait AppliedRoleRepository: Send + Sync {
    fn insert(&self, record: AppliedRole) -> Result<AppliedRole, RepositoryError>;
    fn fetch(&self, id: &AppliedRoleId) -> Result<Option<AppliedRole>, RepositoryError>;
    fn list(&self) -> Result<Vec<AppliedRole>, RepositoryError>;
    /// Single-record write. Fails with `NotFound` when no record carries `id`.
    fn update_status(
        &self,
        id: &AppliedRoleId,
        status: ApplicationStatus,
    ) -> Result<(), RepositoryError>;
}
