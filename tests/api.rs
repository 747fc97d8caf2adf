mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{lazy_app, send};

#[tokio::test]
async fn health_check_answers_ok() {
    let app = lazy_app();
    let response = tower::ServiceExt::oneshot(
        app,
        axum::http::Request::builder()
            .uri("/api/health")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = lazy_app();

    for (method, uri) in [
        (Method::GET, "/api/users/me"),
        (Method::GET, "/api/orders/my"),
        (Method::GET, "/api/links/my"),
        (Method::POST, "/api/orders/1/reorder"),
        (Method::GET, "/api/chat/threads/1/2"),
    ] {
        let (status, body) = send(&app, method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["kind"], "INVALID_TOKEN", "{uri}");
    }
}

#[tokio::test]
async fn malformed_token_is_rejected_before_touching_the_database() {
    let app = lazy_app();
    let (status, body) = send(&app, Method::GET, "/api/users/me", Some("not-a-jwt"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "INVALID_TOKEN");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn register_validates_payload_first() {
    let app = lazy_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "not-an-email", "password": "123", "fullName": "X" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "VALIDATION_ERROR");
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn openapi_document_lists_the_workflow_routes() {
    let app = lazy_app();
    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/auth/login",
        "/api/links/{id}/status",
        "/api/orders",
        "/api/orders/{id}/reorder",
        "/api/complaints/{id}/status",
        "/api/chat/threads/{supplier_id}/{consumer_id}",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert!(doc["components"]["securitySchemes"]["api_jwt"].is_object());
}
