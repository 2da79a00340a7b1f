//! Club store access, generic over `ConnectionTrait`.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use time::OffsetDateTime;

use crate::entities::clubs;
use crate::error::AppError;

/// Club domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Club {
    pub id: String,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<clubs::Model> for Club {
    fn from(model: clubs::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<Club>, AppError> {
    let model = clubs::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to query club: {e}")))?;
    Ok(model.map(Club::from))
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Club>, AppError> {
    let models = clubs::Entity::find()
        .order_by_asc(clubs::Column::Id)
        .all(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to list clubs: {e}")))?;
    Ok(models.into_iter().map(Club::from).collect())
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    name: &str,
) -> Result<Club, AppError> {
    let now = OffsetDateTime::now_utc();
    let active = clubs::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let model = active
        .insert(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to insert club: {e}")))?;
    Ok(Club::from(model))
}

pub async fn update_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    name: &str,
) -> Result<Club, AppError> {
    let active = clubs::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        updated_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    };
    let model = active
        .update(conn)
        .await
        .map_err(|e| AppError::db(format!("failed to update club: {e}")))?;
    Ok(Club::from(model))
}
