//! Account administration surface.
//!
//! Everything here sits behind `AuthGate`; handlers compose the policy gates
//! on the resolved principal before touching the store.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::auth::policy::{self, tables, OwnerRef};
use crate::auth::role::Role;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::users as users_repo;
use crate::repos::users::Principal;
use crate::services::users as users_service;
use crate::state::app_state::AppState;

/// Account record as rendered to API consumers.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub sub: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Role,
    pub club: Option<String>,
    pub is_active: bool,
    pub last_login: Option<String>,
}

impl From<Principal> for UserResponse {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id,
            sub: principal.sub,
            email: principal.email,
            display_name: principal.display_name,
            role: principal.role,
            club: principal.club,
            is_active: principal.is_active,
            last_login: principal
                .last_login
                .and_then(|t| t.format(&Rfc3339).ok()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    /// Accepts canonical role names and the legacy "manager"/"user" aliases.
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct UpdateClubRequest {
    pub club: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub active: bool,
}

async fn list_users(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    policy::require_role(&current_user.principal, tables::ADMIN_ONLY)?;

    let db = require_db(&app_state)?;
    let users = users_repo::list_all(db).await?;

    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn get_user(
    current_user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    policy::require_owner(&current_user.principal, OwnerRef::Id(user_id))?;

    let db = require_db(&app_state)?;
    let user = users_repo::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", "User not found"))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

async fn update_role(
    current_user: CurrentUser,
    path: web::Path<i64>,
    req: web::Json<UpdateRoleRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    policy::require_role(&current_user.principal, tables::ADMIN_ONLY)?;

    let db = require_db(&app_state)?;
    let user = users_service::assign_role(db, path.into_inner(), req.role).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

async fn update_club(
    current_user: CurrentUser,
    path: web::Path<i64>,
    req: web::Json<UpdateClubRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    policy::require_role(&current_user.principal, tables::ADMIN_ONLY)?;

    let db = require_db(&app_state)?;
    let user = users_service::assign_club(db, path.into_inner(), req.club.as_deref()).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

async fn update_status(
    current_user: CurrentUser,
    path: web::Path<i64>,
    req: web::Json<UpdateStatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    policy::require_role(&current_user.principal, tables::ADMIN_ONLY)?;

    let db = require_db(&app_state)?;
    let user = users_service::set_account_status(db, path.into_inner(), req.active).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Routes relative to the `/api/users` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_users))
        .route("/{id}", web::get().to(get_user))
        .route("/{id}/role", web::patch().to(update_role))
        .route("/{id}/club", web::patch().to(update_club))
        .route("/{id}/status", web::patch().to(update_status));
}
