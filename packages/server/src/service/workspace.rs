use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, Set,
};

use crate::entity::{organization, workspace};

/// Fields of a workspace supplied by the caller.
#[derive(Debug, Clone)]
pub struct NewWorkspace {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub processed_chunks: i32,
}

pub struct WorkspaceService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> WorkspaceService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn organization_exists(&self, organization_id: i32) -> Result<bool, DbErr> {
        let count = organization::Entity::find_by_id(organization_id)
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    /// Insert a workspace under `organization_id`. The organization must exist.
    pub async fn create(
        &self,
        organization_id: i32,
        new: NewWorkspace,
    ) -> Result<workspace::Model, DbErr> {
        let now = Utc::now();
        let model = workspace::ActiveModel {
            organization_id: Set(organization_id),
            name: Set(new.name),
            description: Set(new.description),
            is_active: Set(new.is_active),
            processed_chunks: Set(new.processed_chunks),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };
        model.insert(self.conn).await
    }

    /// Find a workspace by id, scoped to its organization.
    pub async fn find(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<workspace::Model>, DbErr> {
        workspace::Entity::find_by_id(id)
            .filter(workspace::Column::OrganizationId.eq(organization_id))
            .one(self.conn)
            .await
    }

    /// Remove a workspace row, returning its last state with `deleted_at`
    /// stamped. Returns `None` if no such workspace exists in the organization.
    ///
    /// Run inside a transaction: the row is locked between lookup and delete.
    pub async fn delete(
        &self,
        organization_id: i32,
        id: i32,
    ) -> Result<Option<workspace::Model>, DbErr> {
        let Some(mut model) = workspace::Entity::find_by_id(id)
            .filter(workspace::Column::OrganizationId.eq(organization_id))
            .lock_exclusive()
            .one(self.conn)
            .await?
        else {
            return Ok(None);
        };

        workspace::Entity::delete_by_id(id).exec(self.conn).await?;

        model.deleted_at = Some(Utc::now());
        Ok(Some(model))
    }
}
