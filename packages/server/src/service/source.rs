use chrono::Utc;
use common::storage::ContainerLocation;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, Set,
};

use crate::entity::{blob_storage_ref, source, workspace};

/// A source together with its storage location, if it has one.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub source: source::Model,
    pub storage: Option<ContainerLocation>,
}

impl From<blob_storage_ref::Model> for ContainerLocation {
    fn from(model: blob_storage_ref::Model) -> Self {
        ContainerLocation::new(model.container_name, model.sas_url)
    }
}

pub struct SourceService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SourceService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn workspace_exists(&self, workspace_id: i32) -> Result<bool, DbErr> {
        let count = workspace::Entity::find_by_id(workspace_id)
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    /// Insert a source and its storage reference.
    ///
    /// Two writes; call on a transaction so that both land or neither does.
    pub async fn create(
        &self,
        workspace_id: i32,
        source_type: String,
        location: ContainerLocation,
    ) -> Result<SourceRecord, DbErr> {
        let now = Utc::now();
        let source = source::ActiveModel {
            workspace_id: Set(workspace_id),
            source_type: Set(source_type),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        let storage = blob_storage_ref::ActiveModel {
            source_id: Set(source.id),
            container_name: Set(location.container_name),
            sas_url: Set(location.sas_url),
        }
        .insert(self.conn)
        .await?;

        Ok(SourceRecord {
            source,
            storage: Some(storage.into()),
        })
    }

    /// Find a source by id, scoped to its workspace.
    pub async fn find(&self, workspace_id: i32, id: i32) -> Result<Option<SourceRecord>, DbErr> {
        let Some(source) = self.find_source(workspace_id, id, false).await? else {
            return Ok(None);
        };
        let storage = self.find_storage(source.id).await?;
        Ok(Some(SourceRecord { source, storage }))
    }

    /// Set a source's type and refresh `updated_at`; nothing else changes.
    ///
    /// Run inside a transaction: the row is locked between lookup and update.
    pub async fn update_type(
        &self,
        workspace_id: i32,
        id: i32,
        source_type: String,
    ) -> Result<Option<SourceRecord>, DbErr> {
        let Some(existing) = self.find_source(workspace_id, id, true).await? else {
            return Ok(None);
        };

        let mut active: source::ActiveModel = existing.into();
        active.source_type = Set(source_type);
        active.updated_at = Set(Utc::now());
        let source = active.update(self.conn).await?;

        let storage = self.find_storage(source.id).await?;
        Ok(Some(SourceRecord { source, storage }))
    }

    async fn find_source(
        &self,
        workspace_id: i32,
        id: i32,
        for_update: bool,
    ) -> Result<Option<source::Model>, DbErr> {
        let mut select = source::Entity::find_by_id(id)
            .filter(source::Column::WorkspaceId.eq(workspace_id));
        if for_update {
            select = select.lock_exclusive();
        }
        select.one(self.conn).await
    }

    async fn find_storage(&self, source_id: i32) -> Result<Option<ContainerLocation>, DbErr> {
        Ok(blob_storage_ref::Entity::find_by_id(source_id)
            .one(self.conn)
            .await?
            .map(ContainerLocation::from))
    }
}
