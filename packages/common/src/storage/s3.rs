use async_trait::async_trait;
use bytes::Bytes;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, info};

use super::config::S3Config;
use super::error::StorageError;
use super::traits::{ContainerLocation, ObjectStore};

/// S3-compatible object store. The container name is the bucket name;
/// access is granted by the configured credentials, not the stored
/// pre-signed URL.
pub struct S3ObjectStore {
    region: Region,
    credentials: Credentials,
    path_style: bool,
}

impl S3ObjectStore {
    pub fn new(config: &S3Config) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse()
                .map_err(|e| StorageError::Config(format!("invalid S3 region: {e}")))?,
        };

        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Config(format!("invalid S3 credentials: {e}")))?;

        info!(region = %region, path_style = config.path_style, "Using S3 object storage");

        Ok(Self {
            region,
            credentials,
            path_style: config.path_style,
        })
    }

    fn bucket(&self, location: &ContainerLocation) -> Result<Box<Bucket>, StorageError> {
        if location.container_name.is_empty() {
            return Err(StorageError::InvalidLocation(
                "container name is empty".into(),
            ));
        }
        let bucket = Bucket::new(
            &location.container_name,
            self.region.clone(),
            self.credentials.clone(),
        )?;
        Ok(if self.path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn container_exists(&self, location: &ContainerLocation) -> Result<bool, StorageError> {
        Ok(self.bucket(location)?.exists().await?)
    }

    async fn put_object(
        &self,
        location: &ContainerLocation,
        name: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let bucket = self.bucket(location)?;
        let response = bucket
            .put_object_with_content_type(
                name,
                &data,
                content_type.unwrap_or("application/octet-stream"),
            )
            .await?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(StorageError::Service {
                status,
                body: String::from_utf8_lossy(response.as_slice()).into_owned(),
            });
        }

        debug!(bucket = %location.container_name, key = name, size = data.len(), "Object written");
        Ok(())
    }
}
