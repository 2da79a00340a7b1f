//! The caller's own account: registration and profile echo.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::auth::claims::VerifiedIdentity;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::routes::users::UserResponse;
use crate::services::users as users_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub display_name: Option<String>,
}

/// Create the account for the request's verified identity.
///
/// Needs proof of identity but not a resolved account; the account is what
/// is being created here.
async fn register(
    identity: VerifiedIdentity,
    req: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let principal =
        users_service::register_account(db, &identity, req.display_name.as_deref()).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(principal)))
}

/// Resolved account for the caller.
async fn me(current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(current_user.principal)))
}

/// Routes relative to the `/api/account` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/me", web::get().to(me));
}
