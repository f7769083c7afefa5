use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::storage::ContainerLocation;
use sea_orm::TransactionTrait;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::source::*;
use crate::service::source::SourceService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Sources",
    operation_id = "createSource",
    summary = "Create a source with its storage reference",
    description = "Creates a source in the workspace together with the container name and \
        pre-signed URL of its backing blob storage. Both rows are written in one transaction.",
    params(("workspace_id" = i32, Path, description = "Workspace ID")),
    request_body = CreateSourceRequest,
    responses(
        (status = 201, description = "Source created", body = SourceCreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Workspace not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(source_type = %payload.source_type))]
pub async fn create_source(
    State(state): State<AppState>,
    Path(workspace_id): Path<i32>,
    AppJson(payload): AppJson<CreateSourceRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_source(&payload)?;

    let txn = state.db.begin().await?;
    let service = SourceService::new(&txn);

    if !service.workspace_exists(workspace_id).await? {
        return Err(AppError::NotFound("Workspace not found".into()));
    }

    let record = service
        .create(
            workspace_id,
            payload.source_type.trim().to_string(),
            ContainerLocation::new(payload.container_name.trim(), payload.sas_url.trim()),
        )
        .await?;

    txn.commit().await?;

    info!(source_id = record.source.id, "Source created");
    Ok((
        StatusCode::CREATED,
        Json(SourceCreatedResponse::new(record.source.id)),
    ))
}

#[utoipa::path(
    get,
    path = "/{source_id}",
    tag = "Sources",
    operation_id = "getSource",
    summary = "Get a source by ID",
    description = "Returns the source type together with its container name and pre-signed \
        URL. The storage fields are null if the source has no storage reference.",
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID"),
        ("source_id" = i32, Path, description = "Source ID"),
    ),
    responses(
        (status = 200, description = "Source details", body = SourceResponse),
        (status = 404, description = "Source not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_source(
    State(state): State<AppState>,
    Path((workspace_id, source_id)): Path<(i32, i32)>,
) -> Result<Json<SourceResponse>, AppError> {
    let record = SourceService::new(&state.db)
        .find(workspace_id, source_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Source not found".into()))?;

    Ok(Json(record.into()))
}

#[utoipa::path(
    put,
    path = "/{source_id}",
    tag = "Sources",
    operation_id = "updateSource",
    summary = "Update a source's type",
    description = "Sets `source_type` and refreshes `updated_at`. The storage reference is \
        never changed; `container_name` and `sas_url` in the body are ignored.",
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID"),
        ("source_id" = i32, Path, description = "Source ID"),
    ),
    request_body = UpdateSourceRequest,
    responses(
        (status = 200, description = "Source updated", body = SourceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Source not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(source_type = %payload.source_type))]
pub async fn update_source(
    State(state): State<AppState>,
    Path((workspace_id, source_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<UpdateSourceRequest>,
) -> Result<Json<SourceResponse>, AppError> {
    validate_update_source(&payload)?;

    let txn = state.db.begin().await?;

    let record = SourceService::new(&txn)
        .update_type(
            workspace_id,
            source_id,
            payload.source_type.trim().to_string(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Source not found".into()))?;

    txn.commit().await?;

    Ok(Json(record.into()))
}
