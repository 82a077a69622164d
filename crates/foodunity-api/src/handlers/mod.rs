//! HTTP request handlers.
//!
//! One module per resource. Every handler performs a single store call
//! through the injected [`Storage`](foodunity_core::Storage) and echoes
//! the result, with identifiers validated at the boundary and failures
//! mapped to explicit status codes by [`ApiError`](crate::ApiError).

pub mod foods;
pub mod health;
pub mod requests;
pub mod session;
