//! Verifier Client Integration Tests
//!
//! Runs `VerifierClient` against an in-process axum stub of the
//! classification service bound to an ephemeral port.

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use nfc_checker::services::VerifierClient;
use nfc_checker::types::{ClaimVerifier, VerifyError};
use serde_json::{json, Value};
use std::time::Duration;

/// Serve `router` on 127.0.0.1:0 and return its base URL
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Stub that judges claims mentioning "moon" false, everything else true
fn healthy_stub() -> Router {
    Router::new()
        .route(
            "/predict",
            post(|Json(body): Json<Value>| async move {
                let claim = body["claim"].as_str().unwrap_or_default();
                Json(json!({
                    "isTrue": !claim.contains("moon"),
                    "confidence": 87.5
                }))
            }),
        )
        .route(
            "/health",
            get(|| async { Json(json!({ "status": "healthy", "model_loaded": true })) }),
        )
}

#[tokio::test]
async fn test_verify_success() {
    let base = spawn_stub(healthy_stub()).await;
    let client = VerifierClient::new(base, None).unwrap();

    let response = client.verify("Unemployment fell to 3%").await.unwrap();
    assert!(response.is_true);
    assert_eq!(response.confidence, 87.5);

    let response = client.verify("The moon is made of cheese").await.unwrap();
    assert!(!response.is_true);
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let router = Router::new().route(
        "/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded") }),
    );
    let base = spawn_stub(router).await;
    let client = VerifierClient::new(base, None).unwrap();

    match client.verify("Unemployment fell to 3%").await {
        Err(VerifyError::Api { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "model not loaded");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let router = Router::new().route(
        "/predict",
        post(|| async { Json(json!({ "verdict": "maybe" })) }),
    );
    let base = spawn_stub(router).await;
    let client = VerifierClient::new(base, None).unwrap();

    let result = client.verify("Unemployment fell to 3%").await;
    assert!(matches!(result, Err(VerifyError::Parse(_))));
}

#[tokio::test]
async fn test_confidence_clamped() {
    let router = Router::new().route(
        "/predict",
        post(|| async { Json(json!({ "isTrue": true, "confidence": 140.0 })) }),
    );
    let base = spawn_stub(router).await;
    let client = VerifierClient::new(base, None).unwrap();

    let response = client.verify("Unemployment fell to 3%").await.unwrap();
    assert_eq!(response.confidence, 100.0);
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let router = Router::new().route(
        "/predict",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "isTrue": true, "confidence": 90.0 }))
        }),
    );
    let base = spawn_stub(router).await;
    let client = VerifierClient::new(base, Some(Duration::from_millis(100))).unwrap();

    let result = client.verify("Unemployment fell to 3%").await;
    assert!(matches!(result, Err(VerifyError::Network(_))));
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_stub(healthy_stub()).await;
    let client = VerifierClient::new(format!("{}/", base), None).unwrap();

    let health = client.health_check().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.model_loaded, Some(true));
}

#[tokio::test]
async fn test_unhealthy_status_rejected() {
    let router = Router::new().route(
        "/health",
        get(|| async { Json(json!({ "status": "degraded" })) }),
    );
    let base = spawn_stub(router).await;
    let client = VerifierClient::new(base, None).unwrap();

    assert!(matches!(
        client.health_check().await,
        Err(VerifyError::Api { .. })
    ));
}
