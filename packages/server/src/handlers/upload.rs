use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::models::upload::UploadResponse;
use crate::service::source::SourceService;
use crate::state::AppState;

pub fn upload_body_limit(limit: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(limit)
}

struct UploadedFile {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

#[utoipa::path(
    post,
    path = "/{source_id}/upload",
    tag = "Uploads",
    operation_id = "uploadFile",
    summary = "Upload a file into a source's container",
    description = "Stores the `file` multipart field in the blob container referenced by the \
        source, under the part's filename. An existing object with the same name is \
        overwritten. The storage service is not contacted if the source has no storage \
        reference.",
    params(
        ("workspace_id" = i32, Path, description = "Workspace ID"),
        ("source_id" = i32, Path, description = "Source ID"),
    ),
    request_body(content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 201, description = "File uploaded", body = UploadResponse),
        (status = 400, description = "Missing or malformed file field (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Source, storage reference or container not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage service failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<AppState>,
    Path((workspace_id, source_id)): Path<(i32, i32)>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let record = SourceService::new(&state.db)
        .find(workspace_id, source_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Source not found".into()))?;
    let location = record
        .storage
        .ok_or_else(|| AppError::NotFound("Source has no storage reference".into()))?;

    let file = read_file_field(multipart).await?;
    let content_type = file.content_type.or_else(|| {
        mime_guess::from_path(&file.filename)
            .first()
            .map(|m| m.to_string())
    });
    let size = file.data.len();

    state
        .object_store
        .upload(
            &location,
            &file.filename,
            file.data,
            content_type.as_deref(),
        )
        .await?;

    info!(
        container = %location.container_name,
        filename = %file.filename,
        size,
        "File uploaded"
    );
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse::new(file.filename)),
    ))
}

/// Pull the `file` part out of the form. Other parts are skipped.
async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
        let content_type = field.content_type().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

        return Ok(UploadedFile {
            filename,
            content_type,
            data,
        });
    }

    Err(AppError::Validation("Missing 'file' field".into()))
}
