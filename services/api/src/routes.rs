use crate::infra::{AppState, InMemoryStores};
use atlas_admin::audit::audit_router;
use atlas_admin::events::{event_router, EventAdminService, QrRenderer};
use atlas_admin::recruitment::{recruitment_router, RecruitmentService};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::Arc;

/// Every admin surface plus the operational endpoints, backed by one set of stores.
pub(crate) fn with_admin_routes(stores: &InMemoryStores, qr: QrRenderer) -> Router {
    let recruitment = Arc::new(RecruitmentService::new(
        stores.applied_roles.clone(),
        stores.audit.clone(),
    ));
    let events = Arc::new(EventAdminService::new(
        stores.events.clone(),
        stores.users.clone(),
        stores.audit.clone(),
        qr,
    ));

    recruitment_router(recruitment)
        .merge(event_router(events))
        .merge(audit_router(stores.audit.clone()))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
