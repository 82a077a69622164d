//! Test infrastructure for the Food Unity backend.
//!
//! Provides a [`TestEnv`] wiring the real router to in-memory store
//! implementations, fixture builders for documents, and small helpers
//! for driving requests through `tower::ServiceExt::oneshot`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use foodunity_api::{create_router, AppState, CookiePolicy, SessionKeys};
use foodunity_core::{FoodListing, FoodRequest, Storage};
use serde_json::Value;
use tower::ServiceExt;

pub mod fixtures;
pub mod memory;

pub use fixtures::{ListingBuilder, RequestBuilder};
pub use memory::{MemoryFoodStore, MemoryRequestStore};

/// Secret used to sign session tokens in tests.
pub const TEST_SECRET: &str = "test-secret";

/// Session lifetime used in tests, in seconds.
pub const TEST_SESSION_TTL: u64 = 3600;

/// Test environment with in-memory storage behind the real router.
pub struct TestEnv {
    /// Storage backed by in-memory collections.
    pub storage: Storage,
    /// Session keys matching [`TEST_SECRET`].
    pub keys: Arc<SessionKeys>,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    /// Creates a fresh environment with empty collections.
    pub fn new() -> Self {
        Self {
            storage: Storage {
                foods: Arc::new(MemoryFoodStore::default()),
                requests: Arc::new(MemoryRequestStore::default()),
            },
            keys: Arc::new(SessionKeys::new(TEST_SECRET, TEST_SESSION_TTL)),
        }
    }

    /// Application state wired to this environment's storage.
    pub fn app_state(&self) -> AppState {
        AppState {
            storage: self.storage.clone(),
            sessions: self.keys.clone(),
            cookies: CookiePolicy { secure: false },
        }
    }

    /// Builds the full router over this environment.
    pub fn router(&self) -> Router {
        create_router(self.app_state())
    }

    /// Inserts a listing directly into storage, returning its identifier.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory insert fails, which it does not.
    pub async fn seed_listing(&self, listing: FoodListing) -> String {
        self.storage.foods.insert(listing).await.expect("in-memory insert failed").inserted_id
    }

    /// Inserts a request directly into storage, returning its identifier.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory insert fails, which it does not.
    pub async fn seed_request(&self, request: FoodRequest) -> String {
        self.storage.requests.insert(request).await.expect("in-memory insert failed").inserted_id
    }

    /// Sends a request through the router and decodes the response.
    ///
    /// # Panics
    ///
    /// Panics if the router fails to produce a response.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router().oneshot(request).await.expect("router request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let text = String::from_utf8(body.to_vec()).expect("response body was not UTF-8");

        TestResponse { status, headers, text }
    }

    /// Sends a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()).await
    }

    /// Sends a DELETE request.
    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()).await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(json_request("POST", uri, body)).await
    }

    /// Sends a PUT request with a JSON body.
    pub async fn put_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(json_request("PUT", uri, body)).await
    }
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Decoded response from a [`TestEnv`] request.
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub text: String,
}

impl TestResponse {
    /// Parses the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).expect("response body should be valid JSON")
    }
}
