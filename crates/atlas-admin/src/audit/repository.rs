use super::domain::LogEntry;
use crate::persistence::RepositoryError;

/// Storage port for the append-only audit log.
pub trait AuditLog: Send + Sync {
    fn append(&self, entry: LogEntry) -> Result<(), RepositoryError>;
    /// All entries in append order.
    fn entries(&self) -> Result<Vec<LogEntry>, RepositoryError>;
}
