use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Location of a source's backing blob container. At most one per source,
/// enforced by keying the row on `source_id`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "azure_storage")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub source_id: i32,
    #[sea_orm(belongs_to, from = "source_id", to = "id")]
    pub source: HasOne<super::source::Entity>,

    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub container_name: String,

    /// Pre-signed URL granting access to the container.
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub sas_url: String,
}

impl ActiveModelBehavior for ActiveModel {}
