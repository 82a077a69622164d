//! Request middleware.

pub mod auth;

pub use auth::{require_session, SessionUser, SESSION_COOKIE};
