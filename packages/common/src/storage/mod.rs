mod config;
mod error;
mod traits;

#[cfg(feature = "azure-blob")]
pub mod azure;
pub mod filesystem;
#[cfg(feature = "object-storage")]
pub mod s3;

use std::sync::Arc;

pub use config::{AzureConfig, FilesystemConfig, S3Config, StorageBackend, StorageConfig};
pub use error::StorageError;
pub use traits::{ContainerLocation, ObjectStore};

/// Build the object store selected by `config.backend`.
pub async fn build_object_store(
    config: &StorageConfig,
) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config.backend {
        #[cfg(feature = "azure-blob")]
        StorageBackend::Azure => Ok(Arc::new(azure::AzureBlobStore::new(&config.azure)?)),
        #[cfg(feature = "object-storage")]
        StorageBackend::S3 => Ok(Arc::new(s3::S3ObjectStore::new(&config.s3)?)),
        StorageBackend::Filesystem => Ok(Arc::new(
            filesystem::FilesystemObjectStore::new(config.filesystem.base_path.clone()).await?,
        )),
        #[allow(unreachable_patterns)]
        other => Err(StorageError::Config(format!(
            "storage backend '{other}' is not compiled in"
        ))),
    }
}
