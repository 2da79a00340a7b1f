use std::time::SystemTime;

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// External identity reference from the provider callback
    #[serde(default)]
    pub sub: String,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Exchange a provider-verified login for a backend access token.
///
/// The upstream callback has already proven the identity; this endpoint only
/// mints. It does not create an account: registration is a separate, gated
/// step, so a token from here may well belong to an identity with no profile
/// yet.
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.sub.trim().is_empty() {
        return Err(AppError::bad_request("INVALID_SUB", "sub cannot be empty"));
    }

    let token = mint_access_token(
        &req.sub,
        req.email.as_deref(),
        SystemTime::now(),
        &app_state.security,
    )?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/auth/login").route(web::post().to(login)));
}
