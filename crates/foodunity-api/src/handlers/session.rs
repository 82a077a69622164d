//! Session cookie handlers.
//!
//! `/jwt` signs whatever payload the client submits; there is no
//! credential store behind it. `/logout` expires the cookie immediately.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};
use time::Duration;
use tracing::instrument;

use crate::{error::ApiError, middleware::auth::SESSION_COOKIE, server::AppState};

/// `POST /jwt` — sign the submitted payload and set the session cookie.
#[instrument(name = "issue_session", skip(state, jar, payload))]
pub async fn issue_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<Value>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let token = state.sessions.issue(&payload)?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(state.cookies.secure)
        .same_site(if state.cookies.secure { SameSite::None } else { SameSite::Lax })
        .max_age(Duration::seconds(state.sessions.ttl_secs()))
        .build();

    Ok((jar.add(cookie), Json(json!({ "success": true }))))
}

/// `POST /logout` — expire the session cookie.
#[instrument(name = "clear_session", skip(jar))]
pub async fn clear_session(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(Duration::ZERO)
        .build();

    (jar.add(cookie), Json(json!({ "success": true })))
}
