use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::workspace;
use crate::error::AppError;

use super::shared::validate_required_text;

pub const WORKSPACE_NAME_MAX: usize = 40;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateWorkspaceRequest {
    /// Workspace name (1-40 characters).
    #[schema(example = "Eng")]
    pub name: String,
    #[schema(example = "team")]
    pub description: Option<String>,
    /// Defaults to `false`.
    #[serde(default)]
    pub is_active: bool,
    /// Defaults to `0`.
    #[serde(default)]
    pub processed_chunks: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkspaceResponse {
    pub id: i32,
    pub organization_id: i32,
    pub name: String,
    pub is_active: bool,
    pub description: Option<String>,
    pub processed_chunks: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<workspace::Model> for WorkspaceResponse {
    fn from(model: workspace::Model) -> Self {
        Self {
            id: model.id,
            organization_id: model.organization_id,
            name: model.name,
            is_active: model.is_active,
            description: model.description,
            processed_chunks: model.processed_chunks,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

pub fn validate_create_workspace(req: &CreateWorkspaceRequest) -> Result<(), AppError> {
    validate_required_text(&req.name, "Name", WORKSPACE_NAME_MAX)?;
    if req.processed_chunks < 0 {
        return Err(AppError::Validation(
            "processed_chunks must be >= 0".into(),
        ));
    }
    Ok(())
}
