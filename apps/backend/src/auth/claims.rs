//! Verified identity produced by token verification.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Proof of authentication for the current request.
///
/// Produced by `auth::jwt::verify_access_token` and stored in request
/// extensions by the `AuthGate` middleware. Valid only for the request that
/// produced it; never persisted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VerifiedIdentity {
    /// External user identifier (users.sub)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Any further claims the identity provider attached.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Claims-only extractor for handlers that need proof of authentication but
/// no account record (e.g. registration, which runs before one exists).
impl FromRequest for VerifiedIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<VerifiedIdentity>()
                .cloned()
                .ok_or_else(AppError::missing_bearer),
        )
    }
}
