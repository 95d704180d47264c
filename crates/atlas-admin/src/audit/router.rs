use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use super::domain::LogEntry;
use super::repository::AuditLog;
use crate::error::{AppError, InternalError};

/// Read-only view over recorded failures.
pub fn audit_router<L>(log: Arc<L>) -> Router
where
    L: AuditLog + 'static,
{
    Router::new()
        .route("/api/v1/logs", get(list_handler::<L>))
        .with_state(log)
}

pub(crate) async fn list_handler<L>(
    State(log): State<Arc<L>>,
) -> Result<Json<Vec<LogEntry>>, AppError>
where
    L: AuditLog + 'static,
{
    let entries = log.entries().map_err(InternalError::from_cause)?;
    Ok(Json(entries))
}
