use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::TransactionTrait;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::workspace::*;
use crate::service::workspace::{NewWorkspace, WorkspaceService};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Workspaces",
    operation_id = "createWorkspace",
    summary = "Create a workspace in an organization",
    description = "Creates a workspace under an existing organization. `is_active` defaults to \
        `false` and `processed_chunks` to `0`.",
    params(("org_id" = i32, Path, description = "Organization ID")),
    request_body = CreateWorkspaceRequest,
    responses(
        (status = 201, description = "Workspace created", body = WorkspaceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Organization not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_workspace(
    State(state): State<AppState>,
    Path(org_id): Path<i32>,
    AppJson(payload): AppJson<CreateWorkspaceRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_workspace(&payload)?;

    let service = WorkspaceService::new(&state.db);
    if !service.organization_exists(org_id).await? {
        return Err(AppError::NotFound("Organization not found".into()));
    }

    let model = service
        .create(
            org_id,
            NewWorkspace {
                name: payload.name.trim().to_string(),
                description: payload.description,
                is_active: payload.is_active,
                processed_chunks: payload.processed_chunks,
            },
        )
        .await?;

    info!(workspace_id = model.id, "Workspace created");
    Ok((StatusCode::CREATED, Json(WorkspaceResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Workspaces",
    operation_id = "getWorkspace",
    summary = "Get a workspace by ID",
    description = "Returns the workspace if it exists and belongs to the given organization.",
    params(
        ("org_id" = i32, Path, description = "Organization ID"),
        ("id" = i32, Path, description = "Workspace ID"),
    ),
    responses(
        (status = 200, description = "Workspace details", body = WorkspaceResponse),
        (status = 404, description = "Workspace not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_workspace(
    State(state): State<AppState>,
    Path((org_id, id)): Path<(i32, i32)>,
) -> Result<Json<WorkspaceResponse>, AppError> {
    let model = WorkspaceService::new(&state.db)
        .find(org_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workspace not found".into()))?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Workspaces",
    operation_id = "deleteWorkspace",
    summary = "Delete a workspace",
    description = "Permanently removes the workspace and returns its final state with \
        `deleted_at` set to the deletion time. Returns 409 CONFLICT while sources or files \
        still reference the workspace.",
    params(
        ("org_id" = i32, Path, description = "Organization ID"),
        ("id" = i32, Path, description = "Workspace ID"),
    ),
    responses(
        (status = 200, description = "Workspace deleted", body = WorkspaceResponse),
        (status = 404, description = "Workspace not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Workspace still referenced (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_workspace(
    State(state): State<AppState>,
    Path((org_id, id)): Path<(i32, i32)>,
) -> Result<Json<WorkspaceResponse>, AppError> {
    let txn = state.db.begin().await?;

    let deleted = WorkspaceService::new(&txn)
        .delete(org_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workspace not found".into()))?;

    txn.commit().await?;

    info!("Workspace deleted");
    Ok(Json(deleted.into()))
}
