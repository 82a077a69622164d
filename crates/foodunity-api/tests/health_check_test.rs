//! Liveness and health endpoint tests.

use axum::http::StatusCode;
use foodunity_testing::TestEnv;
use serde_json::json;

#[tokio::test]
async fn root_returns_the_liveness_message() {
    let env = TestEnv::new();

    let response = env.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "food unity server is running!");
}

#[tokio::test]
async fn health_reports_healthy_when_the_store_responds() {
    let env = TestEnv::new();

    let response = env.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"status": "healthy"}));
}
