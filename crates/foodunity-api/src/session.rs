//! Session token signing and verification.
//!
//! Tokens carry whatever JSON payload the client submitted to `/jwt`,
//! signed HS256 with the server secret and a fixed expiry. The payload is
//! deliberately not checked against any credential store.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from session token operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Token is missing required claims, expired, or badly signed.
    #[error("session token rejected")]
    Rejected,

    /// Token could not be signed.
    #[error("session token could not be signed")]
    Signing,
}

/// HS256 key pair plus token lifetime.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl SessionKeys {
    /// Creates keys from the shared server secret.
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// Token lifetime in seconds.
    pub const fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Signs the submitted payload into a session token.
    ///
    /// Object payloads become the claim set directly (plus `iat`/`exp`);
    /// anything else is wrapped under a `user` claim.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Signing` if encoding fails.
    pub fn issue(&self, payload: &Value) -> Result<String, SessionError> {
        let mut claims = match payload {
            Value::Object(map) => map.clone(),
            other => {
                let mut map = Map::new();
                map.insert("user".to_string(), other.clone());
                map
            },
        };

        let now = chrono::Utc::now().timestamp();
        claims.insert("iat".to_string(), Value::from(now));
        claims.insert("exp".to_string(), Value::from(now + self.ttl_secs));

        encode(&Header::default(), &Value::Object(claims), &self.encoding)
            .map_err(|_| SessionError::Signing)
    }

    /// Verifies a token's signature and expiry, returning the claim set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Rejected` for any validation failure.
    pub fn verify(&self, token: &str) -> Result<Value, SessionError> {
        decode::<Value>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| SessionError::Rejected)
    }
}
