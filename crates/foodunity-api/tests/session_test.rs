//! Session endpoint and middleware tests.
//!
//! The resource routes are intentionally reachable without a session, so
//! the middleware is exercised on a probe route attached here.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use foodunity_api::middleware::require_session;
use foodunity_testing::{TestEnv, TEST_SECRET, TEST_SESSION_TTL};
use serde_json::json;
use tower::ServiceExt;

/// Pulls the session token value out of a `Set-Cookie` header.
fn cookie_token(set_cookie: &str) -> &str {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.trim().strip_prefix("token="))
        .expect("Set-Cookie should carry the token cookie")
}

#[tokio::test]
async fn jwt_sets_a_decodable_session_cookie() {
    let env = TestEnv::new();

    let response = env.post_json("/jwt", &json!({"email": "a@b.com"})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"success": true}));

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .expect("response should set the session cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));

    let keys = foodunity_api::SessionKeys::new(TEST_SECRET, TEST_SESSION_TTL);
    let claims = keys.verify(cookie_token(set_cookie)).expect("cookie token should verify");
    assert_eq!(claims["email"], json!("a@b.com"));

    let now = chrono::Utc::now().timestamp();
    let exp = claims["exp"].as_i64().unwrap();
    assert!(exp > now);
    assert!(exp <= now + TEST_SESSION_TTL as i64 + 5);
}

#[tokio::test]
async fn logout_expires_the_session_cookie() {
    let env = TestEnv::new();

    let response = env.post_json("/logout", &json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"success": true}));

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .expect("response should clear the session cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn resource_routes_are_reachable_without_a_session() {
    let env = TestEnv::new();

    assert_eq!(env.get("/foods").await.status, StatusCode::OK);
    assert_eq!(env.get("/requests").await.status, StatusCode::OK);
    assert_eq!(env.get("/first-six").await.status, StatusCode::OK);
}

fn probe_router(env: &TestEnv) -> Router {
    Router::new()
        .route("/probe", get(|| async { "ok" }))
        .layer(from_fn_with_state(env.app_state(), require_session))
}

#[tokio::test]
async fn middleware_rejects_requests_without_a_cookie() {
    let env = TestEnv::new();

    let response = probe_router(&env)
        .oneshot(Request::builder().uri("/probe").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn middleware_rejects_a_garbage_token() {
    let env = TestEnv::new();

    let response = probe_router(&env)
        .oneshot(
            Request::builder()
                .uri("/probe")
                .header(header::COOKIE, "token=not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn middleware_admits_a_valid_token() {
    let env = TestEnv::new();
    let token = env.keys.issue(&json!({"email": "a@b.com"})).unwrap();

    let response = probe_router(&env)
        .oneshot(
            Request::builder()
                .uri("/probe")
                .header(header::COOKIE, format!("token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
