use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::audit::AuditLog;
use crate::recruitment::domain::ApplicationStatus;
use crate::recruitment::router::{recruitment_router, update_status_handler, StatusUpdateRequest};
use crate::recruitment::service::RecruitmentService;

fn seeded_router() -> (axum::Router, Arc<MemoryRepository>, Arc<MemoryAudit>) {
    let repository = Arc::new(MemoryRepository::seeded([
        applied_role("abc", ApplicationStatus::Pending),
        applied_role("def", ApplicationStatus::Offered),
    ]));
    let audit = Arc::new(MemoryAudit::default());
    let service = Arc::new(RecruitmentService::new(repository.clone(), audit.clone()));
    (recruitment_router(service), repository, audit)
}

fn put_status(id: &str, body: serde_json::Value) -> Request<Body> {
    Request::put(format!("/api/v1/recruitment/applied-roles/{id}/status"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn status_route_persists_and_returns_no_content() {
    let (router, repository, _) = seeded_router();

    let response = router
        .oneshot(put_status("abc", json!({ "status": "REJECTED" })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(repository.status_of("abc"), Some(ApplicationStatus::Rejected));
}

#[tokio::test]
async fn status_route_rejects_values_outside_the_enumeration() {
    let (router, repository, audit) = seeded_router();

    let response = router
        .oneshot(put_status("abc", json!({ "status": "HIRED" })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(repository.status_of("abc"), Some(ApplicationStatus::Pending));
    assert!(audit.entries().expect("entries readable").is_empty());
}

#[tokio::test]
async fn status_route_reports_unknown_ids_as_not_found() {
    let (router, _, audit) = seeded_router();

    let response = router
        .oneshot(put_status("nope", json!({ "status": "ACCEPTED" })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("applied role 'nope' not found"));
    assert_eq!(audit.entries().expect("entries readable").len(), 1);
}

#[tokio::test]
async fn status_handler_maps_outages_to_server_errors() {
    let service = Arc::new(RecruitmentService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryAudit::default()),
    ));

    let response = update_status_handler::<UnavailableRepository, MemoryAudit>(
        State(service),
        Path("abc".to_string()),
        Json(StatusUpdateRequest {
            status: ApplicationStatus::Accepted,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        json!("repository unavailable: database offline")
    );
}

#[tokio::test]
async fn list_route_returns_records_sorted() {
    let (router, _, _) = seeded_router();

    let response = router
        .oneshot(
            Request::get("/api/v1/recruitment/applied-roles")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload[0]["id"], json!("abc"));
    assert_eq!(payload[0]["status"], json!("PENDING"));
    assert_eq!(payload[1]["status"], json!("OFFERED"));
}

#[tokio::test]
async fn fetch_route_returns_not_found_for_missing_records() {
    let (router, _, _) = seeded_router();

    let response = router
        .oneshot(
            Request::get("/api/v1/recruitment/applied-roles/zzz")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_route_creates_pending_records() {
    let (router, repository, _) = seeded_router();

    let response = router
        .oneshot(
            Request::post("/api/v1/recruitment/applied-roles")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "candidate_id": "cand-9", "role_id": "role-design" }).to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("PENDING"));
    assert_eq!(payload["candidate_id"], json!("cand-9"));
    let id = payload["id"].as_str().expect("id present").to_string();
    assert_eq!(repository.status_of(&id), Some(ApplicationStatus::Pending));
}

#[tokio::test]
async fn list_route_surfaces_read_failures() {
    let service = Arc::new(RecruitmentService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryAudit::default()),
    ));
    let router = recruitment_router(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/recruitment/applied-roles")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        json!("repository unavailable: database offline")
    );
}
