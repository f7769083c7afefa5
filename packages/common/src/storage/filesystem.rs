use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use super::error::StorageError;
use super::traits::{ContainerLocation, ObjectStore};

/// Filesystem-backed object store.
///
/// Each container is a directory directly under `base_path`; objects are
/// files inside it. Containers are never created implicitly, matching the
/// remote backends where containers are provisioned out of band.
pub struct FilesystemObjectStore {
    base_path: PathBuf,
}

impl FilesystemObjectStore {
    /// Create a new filesystem object store rooted at `base_path`.
    pub async fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self { base_path })
    }

    fn container_path(&self, location: &ContainerLocation) -> Result<PathBuf, StorageError> {
        let name = location.container_name.as_str();
        if name.is_empty()
            || name.starts_with('.')
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(StorageError::InvalidLocation(format!(
                "invalid container name: {name}"
            )));
        }
        Ok(self.base_path.join(name))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

/// Split an object name into path segments, rejecting names that would
/// escape the container directory.
fn object_segments(name: &str) -> Result<Vec<&str>, StorageError> {
    if name.is_empty() || name.starts_with('/') || name.contains('\\') {
        return Err(StorageError::InvalidObjectName(name.to_string()));
    }
    let segments: Vec<&str> = name.split('/').collect();
    if segments
        .iter()
        .any(|s| s.is_empty() || *s == "." || *s == "..")
    {
        return Err(StorageError::InvalidObjectName(name.to_string()));
    }
    Ok(segments)
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn container_exists(&self, location: &ContainerLocation) -> Result<bool, StorageError> {
        let path = self.container_path(location)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn put_object(
        &self,
        location: &ContainerLocation,
        name: &str,
        data: Bytes,
        _content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut object_path = self.container_path(location)?;
        for segment in object_segments(name)? {
            object_path.push(segment);
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, &data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = object_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &object_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }
}
