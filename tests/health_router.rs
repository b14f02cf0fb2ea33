mod common;

use axum::http::StatusCode;
use tower::ServiceExt;
use wiremock::MockServer;

use common::*;

#[tokio::test]
async fn ping_answers_pong() {
    let server = MockServer::start().await;
    let response = app(&server, "plex").oneshot(get("/ping")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"Pong");
}

#[tokio::test]
async fn liveness_probe() {
    let server = MockServer::start().await;
    let response = app(&server, "plex")
        .oneshot(get("/health/live"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"alive");
}

#[tokio::test]
async fn health_reports_producer_and_version() {
    let server = MockServer::start().await;
    let response = app(&server, "jellyseerr")
        .oneshot(get("/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["producer"], "jellyseerr");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let server = MockServer::start().await;
    let response = app(&server, "plex")
        .oneshot(get("/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/webhook"]["post"].is_object());
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let server = MockServer::start().await;

    let request = axum::http::Request::builder()
        .uri("/ping")
        .header("x-request-id", "abc-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app(&server, "plex").oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");

    let response = app(&server, "plex").oneshot(get("/ping")).await.unwrap();
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let server = MockServer::start().await;
    let response = app(&server, "plex")
        .oneshot(get("/nowhere"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["details"]["value"], "/nowhere");
}
