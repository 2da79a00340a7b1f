use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External identity reference (identity provider uid)
    #[sea_orm(unique)]
    pub sub: String,
    pub email: Option<String>,
    #[sea_orm(column_name = "display_name")]
    pub display_name: Option<String>,
    /// Stored canonical role name; legacy rows may carry alias spellings,
    /// which normalize on read.
    pub role: String,
    /// Club affiliation (clubs.id), unset for unaffiliated accounts
    pub club: Option<String>,
    #[sea_orm(column_name = "is_active")]
    pub is_active: bool,
    #[sea_orm(column_name = "last_login")]
    pub last_login: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
