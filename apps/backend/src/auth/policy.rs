//! Access policy engine.
//!
//! Pure allow/deny decisions over a resolved [`Principal`]. Three independent
//! gates (role set, ownership, club scope) that routes compose in sequence;
//! the first denial is returned as-is, nothing aggregates.
//!
//! Decisions are computed per request and never cached: role and club can
//! change between requests.

use crate::auth::role::Role;
use crate::error::AppError;
use crate::repos::users::Principal;

/// Required-role sets per route group.
///
/// The single source of truth for which roles a route group demands. Admin is
/// never implied; every set that should admit admins lists [`Role::Admin`]
/// explicitly.
pub mod tables {
    use super::Role;

    /// Account administration: listing users, role/club/status changes.
    pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

    /// Club record changes.
    pub const CLUB_MANAGE: &[Role] = &[Role::Admin, Role::ClubManager];

    /// Club-internal reads (rosters, staff).
    pub const CLUB_STAFF: &[Role] = &[Role::Admin, Role::ClubManager, Role::Coach];

    /// Any registered account.
    pub const ANY_ROLE: &[Role] = &[
        Role::Admin,
        Role::ClubManager,
        Role::Coach,
        Role::RegisteredUser,
    ];
}

/// Identifies the owner of a target resource, by local account id or by
/// external uid.
#[derive(Debug, Clone, Copy)]
pub enum OwnerRef<'a> {
    Id(i64),
    Sub(&'a str),
}

/// Deny unless the principal's role is a member of `required`.
///
/// Membership is literal: admin passes only where the set lists admin.
pub fn require_role(principal: &Principal, required: &[Role]) -> Result<(), AppError> {
    if required.contains(&principal.role) {
        return Ok(());
    }
    Err(AppError::RoleDenied {
        required: required
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        actual: principal.role.as_str(),
    })
}

/// Deny unless the principal is admin or owns the target resource.
pub fn require_owner(principal: &Principal, target: OwnerRef<'_>) -> Result<(), AppError> {
    if principal.role == Role::Admin {
        return Ok(());
    }
    let owns = match target {
        OwnerRef::Id(id) => principal.id == id,
        OwnerRef::Sub(sub) => principal.sub == sub,
    };
    if owns {
        Ok(())
    } else {
        Err(AppError::ownership_denied())
    }
}

/// Deny unless the principal may act within `club_id`.
///
/// Admin is unconditional. Club managers and coaches pass only for their own
/// club; everyone else is denied even on a matching affiliation.
pub fn require_club(principal: &Principal, club_id: &str) -> Result<(), AppError> {
    match principal.role {
        Role::Admin => Ok(()),
        Role::ClubManager | Role::Coach if principal.club.as_deref() == Some(club_id) => Ok(()),
        _ => Err(AppError::club_scope_denied()),
    }
}
