//! Account store access, generic over `ConnectionTrait`.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::auth::role::Role;
use crate::entities::users;
use crate::error::AppError;

/// Resolved local account bound to an external identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: i64,
    /// External identity reference (users.sub)
    pub sub: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Role,
    pub club: Option<String>,
    pub is_active: bool,
    pub last_login: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Fields required to create an account at registration.
#[derive(Debug, Clone)]
pub struct NewPrincipal<'a> {
    pub sub: &'a str,
    pub email: Option<&'a str>,
    pub display_name: Option<&'a str>,
}

impl TryFrom<users::Model> for Principal {
    type Error = AppError;

    fn try_from(model: users::Model) -> Result<Self, Self::Error> {
        let role = Role::parse(&model.role).ok_or_else(|| {
            AppError::internal(format!(
                "unrecognized role '{}' stored on user {}",
                model.role, model.id
            ))
        })?;
        Ok(Self {
            id: model.id,
            sub: model.sub,
            email: model.email,
            display_name: model.display_name,
            role,
            club: model.club,
            is_active: model.is_active,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

pub async fn find_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<Principal>, AppError> {
    let model = users::Entity::find()
        .filter(users::Column::Sub.eq(sub))
        .one(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to query user by sub: {e}")))?;
    model.map(Principal::try_from).transpose()
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Principal>, AppError> {
    let model = users::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to query user by id: {e}")))?;
    model.map(Principal::try_from).transpose()
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Principal>, AppError> {
    let models = users::Entity::find()
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to list users: {e}")))?;
    models.into_iter().map(Principal::try_from).collect()
}

pub async fn list_by_club<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    club_id: &str,
) -> Result<Vec<Principal>, AppError> {
    let models = users::Entity::find()
        .filter(users::Column::Club.eq(club_id))
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to list users for club: {e}")))?;
    models.into_iter().map(Principal::try_from).collect()
}

/// Insert a new account. Role starts at `registeredUser`, active, with no
/// club affiliation; only explicit admin updates change those.
pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewPrincipal<'_>,
) -> Result<Principal, AppError> {
    let now = OffsetDateTime::now_utc();
    let active = users::ActiveModel {
        id: NotSet,
        sub: Set(new.sub.to_string()),
        email: Set(new.email.map(str::to_string)),
        display_name: Set(new.display_name.map(str::to_string)),
        role: Set(Role::RegisteredUser.as_str().to_string()),
        club: Set(None),
        is_active: Set(true),
        last_login: Set(Some(now)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let model = active
        .insert(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to insert user: {e}")))?;
    Principal::try_from(model)
}

pub async fn update_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    role: Role,
) -> Result<Principal, AppError> {
    let active = users::ActiveModel {
        id: Set(id),
        role: Set(role.as_str().to_string()),
        updated_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    };
    let model = active
        .update(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to update role: {e}")))?;
    Principal::try_from(model)
}

pub async fn update_club<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    club: Option<&str>,
) -> Result<Principal, AppError> {
    let active = users::ActiveModel {
        id: Set(id),
        club: Set(club.map(str::to_string)),
        updated_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    };
    let model = active
        .update(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to update club: {e}")))?;
    Principal::try_from(model)
}

/// Flip the active flag. Deactivation is this flag, never row removal.
pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    active: bool,
) -> Result<Principal, AppError> {
    let active_model = users::ActiveModel {
        id: Set(id),
        is_active: Set(active),
        updated_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    };
    let model = active_model
        .update(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to update active flag: {e}")))?;
    Principal::try_from(model)
}

/// Refresh last_login for an account.
///
/// Overlapping requests from the same user race on this column; last write
/// wins and a stale value is acceptable. Callers on the request path treat a
/// failure here as non-fatal.
pub async fn touch_last_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), AppError> {
    let now = OffsetDateTime::now_utc();
    users::Entity::update_many()
        .col_expr(users::Column::LastLogin, Expr::value(Some(now)))
        .col_expr(users::Column::UpdatedAt, Expr::value(now))
        .filter(users::Column::Id.eq(id))
        .exec(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to refresh last_login: {e}")))?;
    Ok(())
}
