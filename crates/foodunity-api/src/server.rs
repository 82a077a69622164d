//! HTTP server configuration and request routing.
//!
//! Provides the Axum router and server startup with graceful shutdown.
//! Requests flow through middleware in order:
//! 1. Request ID generation
//! 2. Request/response logging
//! 3. CORS handling (mirrored origin, credentials enabled for the
//!    cross-site session cookie)
//! 4. Handler execution
//!
//! No timeout layer is installed: the service imposes no request timeout
//! of its own beyond the store client's connection defaults.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::Request,
    http::{header, Method},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use foodunity_core::Storage;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{handlers, session::SessionKeys};

/// Cookie attributes toggled by the deployment mode.
///
/// `secure` switches the session cookie to `Secure`/`SameSite=None` for
/// cross-site frontends.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    /// Whether cookies are marked `Secure` with `SameSite=None`.
    pub secure: bool,
}

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Document-store access.
    pub storage: Storage,
    /// Session token keys.
    pub sessions: Arc<SessionKeys>,
    /// Cookie attribute policy.
    pub cookies: CookiePolicy,
}

/// Creates the Axum router with all routes and middleware.
///
/// The session verification middleware
/// (`crate::middleware::auth::require_session`) exists but is not
/// attached here: no resource route opts in, so every route below is
/// publicly reachable. Tests pin this down so attaching it later is a
/// deliberate change.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/first-six", get(handlers::foods::list_first_six))
        .route(
            "/foods",
            get(handlers::foods::list_foods).post(handlers::foods::create_food),
        )
        .route(
            "/foods/{id}",
            get(handlers::foods::get_food).delete(handlers::foods::delete_food),
        )
        .route(
            "/update/{id}",
            get(handlers::foods::get_food_for_edit).put(handlers::foods::update_food),
        )
        .route(
            "/requests",
            get(handlers::requests::list_requests).post(handlers::requests::create_request),
        )
        .route("/requests/{id}", delete(handlers::requests::delete_request))
        .route("/manage/{food_id}", get(handlers::requests::list_requests_for_listing))
        .route("/jwt", post(handlers::session::issue_session))
        .route("/logout", post(handlers::session::clear_session))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Middleware to inject a request ID into all responses.
///
/// Adds an `X-Request-Id` header for tracing requests across services.
async fn inject_request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let mut req = req;
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-Id", header_value);
    }

    response
}

/// Starts the HTTP server with graceful shutdown support.
///
/// Binds to the given address and serves requests until a shutdown signal
/// is received. The document-store client inside `state` is deliberately
/// left open through shutdown.
///
/// # Errors
///
/// Returns `std::io::Error` if the port is in use or the network
/// interface is unavailable.
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<(), std::io::Error> {
    let app = create_router(state);

    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("HTTP server listening on {}", actual_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

/// Waits for shutdown signal (CTRL+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    warn!("Waiting for in-flight requests to complete");
}
