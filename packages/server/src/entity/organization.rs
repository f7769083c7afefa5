use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Top-level tenant. Rows are provisioned outside this service.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(40))", indexed)]
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub domain: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,

    #[sea_orm(has_many)]
    pub workspaces: HasMany<super::workspace::Entity>,

    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
    /// Soft-delete marker; not written by any handler.
    pub deleted_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
