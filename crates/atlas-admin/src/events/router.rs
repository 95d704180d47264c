use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{EventId, EventInfo, NewEvent, UserId, UserSummary};
use super::repository::{EventRepository, UserDirectory};
use super::service::{CheckInError, EventAdminService};
use crate::audit::AuditLog;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub user_id: UserId,
}

type SharedService<E, U, L> = Arc<EventAdminService<E, U, L>>;

/// Router builder exposing event administration and the user listing.
pub fn event_router<E, U, L>(service: SharedService<E, U, L>) -> Router
where
    E: EventRepository + 'static,
    U: UserDirectory + 'static,
    L: AuditLog + 'static,
{
    Router::new()
        .route("/api/v1/events", post(create_handler::<E, U, L>))
        .route("/api/v1/events/:event_id", get(info_handler::<E, U, L>))
        .route("/api/v1/events/:event_id/start", post(start_handler::<E, U, L>))
        .route(
            "/api/v1/events/:event_id/check-in",
            post(check_in_handler::<E, U, L>),
        )
        .route("/api/v1/users", get(users_handler::<E, U, L>))
        .with_state(service)
}

/// Always answers 204; creation failures only reach the audit log.
pub(crate) async fn create_handler<E, U, L>(
    State(service): State<SharedService<E, U, L>>,
    Json(input): Json<NewEvent>,
) -> StatusCode
where
    E: EventRepository + 'static,
    U: UserDirectory + 'static,
    L: AuditLog + 'static,
{
    service.create_event(input);
    StatusCode::NO_CONTENT
}

pub(crate) async fn info_handler<E, U, L>(
    State(service): State<SharedService<E, U, L>>,
    Path(event_id): Path<String>,
) -> Result<Json<Option<EventInfo>>, AppError>
where
    E: EventRepository + 'static,
    U: UserDirectory + 'static,
    L: AuditLog + 'static,
{
    let info = service.get_event_info(&EventId(event_id))?;
    Ok(Json(info))
}

pub(crate) async fn users_handler<E, U, L>(
    State(service): State<SharedService<E, U, L>>,
) -> Result<Json<Vec<UserSummary>>, AppError>
where
    E: EventRepository + 'static,
    U: UserDirectory + 'static,
    L: AuditLog + 'static,
{
    Ok(Json(service.get_all_users()?))
}

pub(crate) async fn start_handler<E, U, L>(
    State(service): State<SharedService<E, U, L>>,
    Path(event_id): Path<String>,
) -> Response
where
    E: EventRepository + 'static,
    U: UserDirectory + 'static,
    L: AuditLog + 'static,
{
    match service.start_event(&EventId(event_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => check_in_error_response(error),
    }
}

pub(crate) async fn check_in_handler<E, U, L>(
    State(service): State<SharedService<E, U, L>>,
    Path(event_id): Path<String>,
    Json(request): Json<CheckInRequest>,
) -> Response
where
    E: EventRepository + 'static,
    U: UserDirectory + 'static,
    L: AuditLog + 'static,
{
    match service.check_in(&EventId(event_id), &request.user_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => check_in_error_response(error),
    }
}

fn check_in_error_response(error: CheckInError) -> Response {
    let status = match &error {
        CheckInError::EventNotFound(_) => StatusCode::NOT_FOUND,
        CheckInError::NotStarted(_) => StatusCode::CONFLICT,
        CheckInError::NotInvited { .. } => StatusCode::FORBIDDEN,
        CheckInError::Read(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CheckInError::Persistence(inner) => inner.status_code(),
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
