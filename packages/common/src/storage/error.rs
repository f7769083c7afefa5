use thiserror::Error;

/// Errors that can occur while talking to an object store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The addressed container does not exist.
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// The object name cannot be stored (empty, absolute, or escaping its container).
    #[error("invalid object name: {0}")]
    InvalidObjectName(String),

    /// The stored container name or pre-signed URL is unusable.
    #[error("invalid storage location: {0}")]
    InvalidLocation(String),

    /// The backend could not be built from configuration.
    #[error("storage configuration error: {0}")]
    Config(String),

    /// The storage service answered with an unexpected status.
    #[error("storage service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "azure-blob")]
    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[cfg(feature = "object-storage")]
    #[error("S3 error: {0}")]
    S3(#[from] s3::error::S3Error),
}
