//! Food Unity HTTP API.
//!
//! Thin HTTP-to-document-store mapping layer: each route performs one
//! store call and echoes the result as JSON. Session tokens are issued
//! and verified here, though verification is not attached to any resource
//! route (see `middleware::auth`).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod session;

pub use config::Config;
pub use error::ApiError;
pub use server::{create_router, start_server, AppState, CookiePolicy};
pub use session::SessionKeys;
