//! Club resource, the club-scope gate's target.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::policy::{self, tables};
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::clubs as clubs_repo;
use crate::repos::clubs::Club;
use crate::repos::users as users_repo;
use crate::routes::users::UserResponse;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct ClubResponse {
    pub id: String,
    pub name: String,
}

impl From<Club> for ClubResponse {
    fn from(club: Club) -> Self {
        Self {
            id: club.id,
            name: club.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateClubRequest {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateClubRequest {
    pub name: String,
}

fn validate_club_id(id: &str) -> Result<(), AppError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "INVALID_CLUB_ID",
            "Club id must be a lowercase slug",
        ))
    }
}

async fn create_club(
    current_user: CurrentUser,
    req: web::Json<CreateClubRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    policy::require_role(&current_user.principal, tables::ADMIN_ONLY)?;

    validate_club_id(&req.id)?;
    if req.name.trim().is_empty() {
        return Err(AppError::bad_request(
            "INVALID_CLUB_NAME",
            "Club name cannot be empty",
        ));
    }

    let db = require_db(&app_state)?;
    if clubs_repo::find_by_id(db, &req.id).await?.is_some() {
        return Err(AppError::conflict("CLUB_EXISTS", "Club already exists"));
    }

    let club = clubs_repo::insert(db, &req.id, req.name.trim()).await?;
    Ok(HttpResponse::Created().json(ClubResponse::from(club)))
}

async fn list_clubs(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    policy::require_role(&current_user.principal, tables::ANY_ROLE)?;

    let db = require_db(&app_state)?;
    let clubs = clubs_repo::list_all(db).await?;

    let body: Vec<ClubResponse> = clubs.into_iter().map(ClubResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn get_club(
    current_user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    policy::require_role(&current_user.principal, tables::ANY_ROLE)?;

    let db = require_db(&app_state)?;
    let club = clubs_repo::find_by_id(db, &path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("CLUB_NOT_FOUND", "Club not found"))?;

    Ok(HttpResponse::Ok().json(ClubResponse::from(club)))
}

async fn update_club(
    current_user: CurrentUser,
    path: web::Path<String>,
    req: web::Json<UpdateClubRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let club_id = path.into_inner();
    policy::require_role(&current_user.principal, tables::CLUB_MANAGE)?;
    policy::require_club(&current_user.principal, &club_id)?;

    if req.name.trim().is_empty() {
        return Err(AppError::bad_request(
            "INVALID_CLUB_NAME",
            "Club name cannot be empty",
        ));
    }

    let db = require_db(&app_state)?;
    clubs_repo::find_by_id(db, &club_id)
        .await?
        .ok_or_else(|| AppError::not_found("CLUB_NOT_FOUND", "Club not found"))?;

    let club = clubs_repo::update_name(db, &club_id, req.name.trim()).await?;
    Ok(HttpResponse::Ok().json(ClubResponse::from(club)))
}

/// Accounts affiliated with the club (managers, coaches).
async fn club_staff(
    current_user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let club_id = path.into_inner();
    policy::require_role(&current_user.principal, tables::CLUB_STAFF)?;
    policy::require_club(&current_user.principal, &club_id)?;

    let db = require_db(&app_state)?;
    let staff = users_repo::list_by_club(db, &club_id).await?;

    let body: Vec<UserResponse> = staff.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Routes relative to the `/api/clubs` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_club))
        .route("", web::get().to(list_clubs))
        .route("/{club_id}", web::get().to(get_club))
        .route("/{club_id}", web::patch().to(update_club))
        .route("/{club_id}/staff", web::get().to(club_staff));
}
