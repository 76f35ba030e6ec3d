//! Router smoke tests
//!
//! Drives the full middleware stack with an unconnected (lazy) pool:
//! everything exercised here must resolve before any query is issued.

use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use portal_server::api;
use portal_server::auth::JwtConfig;
use portal_server::core::{Config, ServerState};
use portal_server::payments::sign_payload;

const WEBHOOK_SECRET: &str = "whsec_smoke_test";

fn test_state() -> ServerState {
    let mut config = Config::with_overrides("postgres://localhost/portal_smoke_test", 0);
    config.jwt = JwtConfig {
        secret: "smoke-test-secret-key-of-sufficient-length".to_string(),
        expiration_minutes: 60,
        issuer: "tiffin-identity".to_string(),
        audience: "merchant-portal".to_string(),
    };
    config.razorpay.webhook_secret = WEBHOOK_SECRET.to_string();

    ServerState::connect_lazy(&config).expect("lazy state")
}

#[tokio::test]
async fn health_responds_without_database() {
    let app = api::build_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn protected_route_rejects_missing_token() {
    let app = api::build_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/wallet")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_rejects_garbage_token() {
    let app = api::build_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/wallet")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_reaches_router() {
    let state = test_state();
    let token = state
        .jwt_service
        .generate_token(17, "asha@example.com")
        .unwrap();
    let app = api::build_router(state);

    // Unknown API path: auth passes, the router answers 404 without
    // touching the database.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/does-not-exist")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn webhook_rejects_missing_signature() {
    let app = api::build_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/webhooks/razorpay")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"event":"ping"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn webhook_rejects_bad_signature() {
    let app = api::build_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/webhooks/razorpay")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-razorpay-signature", "deadbeef")
                .body(Body::from(r#"{"event":"ping"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn webhook_acknowledges_unhandled_event() {
    let app = api::build_router(test_state());

    let body = br#"{"event":"refund.processed","payload":{}}"#;
    let signature = sign_payload(WEBHOOK_SECRET, body);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/webhooks/razorpay")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-razorpay-signature", signature)
                .body(Body::from(&body[..]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["received"], true);
}
