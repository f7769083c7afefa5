use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::service::source::SourceRecord;

use super::shared::{ResponseMeta, validate_required_text};

pub const SOURCE_TYPE_MAX: usize = 50;
pub const STORAGE_FIELD_MAX: usize = 255;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSourceRequest {
    #[schema(example = "azure_blob")]
    pub source_type: String,
    #[schema(example = "raw-documents")]
    pub container_name: String,
    /// Pre-signed URL granting access to the container.
    #[schema(example = "https://acct.blob.core.windows.net/?sv=2021-08-06&sig=...")]
    pub sas_url: String,
}

/// Only `source_type` is applied. Storage fields sent by older clients are
/// accepted and ignored.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateSourceRequest {
    #[schema(example = "sharepoint")]
    pub source_type: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SourceIdData {
    /// Source ID, as a string.
    #[schema(example = "42")]
    pub id: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SourceCreatedResponse {
    #[schema(example = "Data created correctly")]
    pub message: String,
    pub meta: ResponseMeta,
    pub data: SourceIdData,
}

impl SourceCreatedResponse {
    pub fn new(source_id: i32) -> Self {
        Self {
            message: "Data created correctly".into(),
            meta: ResponseMeta::default(),
            data: SourceIdData {
                id: source_id.to_string(),
            },
        }
    }
}

/// Flattened projection of a source and its storage reference.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SourceData {
    pub source_type: String,
    pub container_name: Option<String>,
    pub sas_url: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SourceResponse {
    #[schema(example = "Data got correctly")]
    pub message: String,
    pub meta: ResponseMeta,
    pub data: SourceData,
}

impl From<SourceRecord> for SourceResponse {
    fn from(record: SourceRecord) -> Self {
        let (container_name, sas_url) = match record.storage {
            Some(location) => (Some(location.container_name), Some(location.sas_url)),
            None => (None, None),
        };
        Self {
            message: "Data got correctly".into(),
            meta: ResponseMeta::default(),
            data: SourceData {
                source_type: record.source.source_type,
                container_name,
                sas_url,
            },
        }
    }
}

pub fn validate_create_source(req: &CreateSourceRequest) -> Result<(), AppError> {
    validate_required_text(&req.source_type, "Source type", SOURCE_TYPE_MAX)?;
    validate_required_text(&req.container_name, "Container name", STORAGE_FIELD_MAX)?;
    validate_required_text(&req.sas_url, "SAS URL", STORAGE_FIELD_MAX)?;
    Ok(())
}

pub fn validate_update_source(req: &UpdateSourceRequest) -> Result<(), AppError> {
    validate_required_text(&req.source_type, "Source type", SOURCE_TYPE_MAX)
}
