use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AppliedRoleId, ApplicationStatus, CandidateId, RoleId};
use super::repository::AppliedRoleRepository;
use super::service::RecruitmentService;
use crate::audit::AuditLog;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationRequest {
    pub candidate_id: CandidateId,
    pub role_id: RoleId,
}

/// Router builder exposing the recruitment pipeline endpoints.
pub fn recruitment_router<R, L>(service: Arc<RecruitmentService<R, L>>) -> Router
where
    R: AppliedRoleRepository + 'static,
    L: AuditLog + 'static,
{
    Router::new()
        .route(
            "/api/v1/recruitment/applied-roles",
            get(list_handler::<R, L>).post(submit_handler::<R, L>),
        )
        .route(
            "/api/v1/recruitment/applied-roles/:applied_role_id",
            get(fetch_handler::<R, L>),
        )
        .route(
            "/api/v1/recruitment/applied-roles/:applied_role_id/status",
            put(update_status_handler::<R, L>),
        )
        .with_state(service)
}

pub(crate) async fn update_status_handler<R, L>(
    State(service): State<Arc<RecruitmentService<R, L>>>,
    Path(applied_role_id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Response
where
    R: AppliedRoleRepository + 'static,
    L: AuditLog + 'static,
{
    let id = AppliedRoleId(applied_role_id);
    match service.update_status(&id, request.status) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (error.status_code(), Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<R, L>(
    State(service): State<Arc<RecruitmentService<R, L>>>,
) -> Result<Response, AppError>
where
    R: AppliedRoleRepository + 'static,
    L: AuditLog + 'static,
{
    let records = service.list_applied_roles()?;
    Ok((StatusCode::OK, Json(records)).into_response())
}

pub(crate) async fn fetch_handler<R, L>(
    State(service): State<Arc<RecruitmentService<R, L>>>,
    Path(applied_role_id): Path<String>,
) -> Result<Response, AppError>
where
    R: AppliedRoleRepository + 'static,
    L: AuditLog + 'static,
{
    let id = AppliedRoleId(applied_role_id);
    match service.get_applied_role(&id)? {
        Some(record) => Ok((StatusCode::OK, Json(record)).into_response()),
        None => {
            let payload = json!({ "error": format!("applied role '{id}' not found") });
            Ok((StatusCode::NOT_FOUND, Json(payload)).into_response())
        }
    }
}

pub(crate) async fn submit_handler<R, L>(
    State(service): State<Arc<RecruitmentService<R, L>>>,
    Json(request): Json<ApplicationRequest>,
) -> Result<Response, AppError>
where
    R: AppliedRoleRepository + 'static,
    L: AuditLog + 'static,
{
    let record = service.submit_application(request.candidate_id, request.role_id)?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}
