//! Session verification middleware.
//!
//! Reads the `token` cookie, verifies signature and expiry, and injects
//! the decoded payload for downstream handlers. Known gap, preserved on
//! purpose: `create_router` never attaches this middleware, so every
//! resource route is reachable without a valid session. Tests cover both
//! the middleware itself and the unauthenticated reachability of the
//! resource routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use serde_json::Value;
use tracing::debug;

use crate::{error::ApiError, server::AppState};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Decoded session payload, available from request extensions behind
/// [`require_session`].
#[derive(Debug, Clone)]
pub struct SessionUser(pub Value);

/// Rejects requests lacking a valid session token.
///
/// On success the decoded claims are inserted into request extensions as
/// [`SessionUser`]; otherwise the request ends with 401 and a fixed
/// message.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_owned());

    let Some(token) = token else {
        debug!("session cookie missing");
        return Err(ApiError::Unauthorized);
    };

    let claims = state.sessions.verify(&token).map_err(|_| {
        debug!("session token rejected");
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(SessionUser(claims));

    Ok(next.run(req).await)
}
