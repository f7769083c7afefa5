use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Object name the file was stored under.
    #[schema(example = "report.pdf")]
    pub filename: String,
    #[schema(example = "File uploaded successfully")]
    pub message: String,
}

impl UploadResponse {
    pub fn new(filename: String) -> Self {
        Self {
            filename,
            message: "File uploaded successfully".into(),
        }
    }
}
