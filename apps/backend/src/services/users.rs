//! Account lifecycle operations.

use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use crate::auth::claims::VerifiedIdentity;
use crate::auth::role::Role;
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::repos::clubs;
use crate::repos::users::{self, NewPrincipal, Principal};

/// Create the account for a verified identity.
///
/// Registration requires proof of identity but no existing account; a second
/// registration for the same identity is a conflict, not an upsert.
pub async fn register_account(
    conn: &(impl ConnectionTrait + Send + Sync),
    identity: &VerifiedIdentity,
    display_name: Option<&str>,
) -> Result<Principal, AppError> {
    if users::find_by_sub(conn, &identity.sub).await?.is_some() {
        return Err(AppError::conflict(
            "ACCOUNT_EXISTS",
            "An account is already registered for this identity",
        ));
    }

    let principal = users::insert(
        conn,
        NewPrincipal {
            sub: &identity.sub,
            email: identity.email.as_deref(),
            display_name,
        },
    )
    .await?;

    info!(
        user_id = principal.id,
        email = %Redacted(identity.email.as_deref().unwrap_or("")),
        "account registered"
    );

    Ok(principal)
}

/// Admin operation: change an account's role.
pub async fn assign_role(
    conn: &(impl ConnectionTrait + Send + Sync),
    user_id: i64,
    role: Role,
) -> Result<Principal, AppError> {
    let existing = users::find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", "User not found"))?;

    let principal = users::update_role(conn, user_id, role).await?;

    info!(
        user_id = user_id,
        from = %existing.role,
        to = %role,
        "role changed"
    );

    Ok(principal)
}

/// Admin operation: change an account's club affiliation. The target club
/// must exist; `None` clears the affiliation.
pub async fn assign_club(
    conn: &(impl ConnectionTrait + Send + Sync),
    user_id: i64,
    club_id: Option<&str>,
) -> Result<Principal, AppError> {
    users::find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", "User not found"))?;

    if let Some(club_id) = club_id {
        clubs::find_by_id(conn, club_id)
            .await?
            .ok_or_else(|| AppError::not_found("CLUB_NOT_FOUND", "Club not found"))?;
    }

    let principal = users::update_club(conn, user_id, club_id).await?;

    info!(user_id = user_id, club = ?club_id, "club affiliation changed");

    Ok(principal)
}

/// Admin operation: activate or deactivate an account. Deactivation is a
/// flag flip; the record stays.
pub async fn set_account_status(
    conn: &(impl ConnectionTrait + Send + Sync),
    user_id: i64,
    active: bool,
) -> Result<Principal, AppError> {
    users::find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", "User not found"))?;

    let principal = users::set_active(conn, user_id, active).await?;

    if active {
        info!(user_id = user_id, "account reactivated");
    } else {
        warn!(user_id = user_id, "account deactivated");
    }

    Ok(principal)
}
