//! Principal resolution.
//!
//! Turns the request's [`VerifiedIdentity`] (placed in extensions by the
//! `AuthGate` middleware) into the local account record, enforcing the
//! account-level gates on the way:
//!
//! - no linked account → 404, the caller should register (they are
//!   authenticated, so this is not a re-auth prompt)
//! - deactivated account → 403, regardless of role
//!
//! On success the account's last_login is refreshed best-effort; a failure
//! there is logged and the request proceeds.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use tracing::{error, warn};

use crate::auth::claims::VerifiedIdentity;
use crate::db::require_db;
use crate::error::AppError;
use crate::repos::users::{self, Principal};
use crate::state::app_state::AppState;

/// Resolved account plus the identity proof it was resolved from, threaded
/// to handlers as one immutable value.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub principal: Principal,
    pub identity: VerifiedIdentity,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { resolve(req).await })
    }
}

async fn resolve(req: HttpRequest) -> Result<CurrentUser, AppError> {
    let identity = req
        .extensions()
        .get::<VerifiedIdentity>()
        .cloned()
        .ok_or_else(AppError::missing_bearer)?;

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    // Store problems must not leak an open gate: anything unexpected between
    // here and a resolved principal fails closed as an invalid token, with
    // the real cause kept for operators.
    let db = match require_db(app_state) {
        Ok(db) => db,
        Err(err) => {
            error!(sub = %identity.sub, error = %err, "account store unavailable during principal resolution");
            return Err(AppError::invalid_token());
        }
    };

    let principal = match users::find_by_sub(db, &identity.sub).await {
        Ok(principal) => principal,
        Err(err) => {
            error!(sub = %identity.sub, error = %err, "account lookup failed during principal resolution");
            return Err(AppError::invalid_token());
        }
    };

    let principal = principal.ok_or_else(AppError::profile_not_found)?;

    if !principal.is_active {
        return Err(AppError::account_deactivated());
    }

    // Best-effort side effect; a stale last_login is acceptable.
    if let Err(err) = users::touch_last_login(db, principal.id).await {
        warn!(user_id = principal.id, error = %err, "failed to refresh last_login");
    }

    Ok(CurrentUser {
        principal,
        identity,
    })
}
