use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::error::StorageError;

/// Where a source's blobs live: the container name and the pre-signed URL
/// granting access to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerLocation {
    pub container_name: String,
    pub sas_url: String,
}

impl ContainerLocation {
    pub fn new(container_name: impl Into<String>, sas_url: impl Into<String>) -> Self {
        Self {
            container_name: container_name.into(),
            sas_url: sas_url.into(),
        }
    }
}

/// Container-addressed object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check whether the container behind `location` exists.
    async fn container_exists(&self, location: &ContainerLocation) -> Result<bool, StorageError>;

    /// Write an object into the container, replacing any object with the same name.
    async fn put_object(
        &self,
        location: &ContainerLocation,
        name: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StorageError>;

    /// Upload into an existing container.
    ///
    /// Fails with [`StorageError::ContainerNotFound`] without writing anything
    /// if the container is absent.
    async fn upload(
        &self,
        location: &ContainerLocation,
        name: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        if !self.container_exists(location).await? {
            return Err(StorageError::ContainerNotFound(
                location.container_name.clone(),
            ));
        }
        self.put_object(location, name, data, content_type).await
    }
}
