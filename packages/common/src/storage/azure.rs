use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, Url, header};
use tracing::debug;

use super::config::AzureConfig;
use super::error::StorageError;
use super::traits::{ContainerLocation, ObjectStore};

/// Blob service REST version sent with every request.
const API_VERSION: &str = "2021-08-06";

/// Azure Blob Storage accessed through pre-signed (SAS) URLs.
///
/// No account key is held by the service: every call is authorized by the
/// SAS token stored alongside the source.
pub struct AzureBlobStore {
    client: Client,
}

impl AzureBlobStore {
    pub fn new(config: &AzureConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

/// Resolve the container URL (SAS query included) for a location.
///
/// An account-level SAS URL gets the container name appended to its path;
/// a URL that already names a container is used as-is.
pub(crate) fn container_url(location: &ContainerLocation) -> Result<Url, StorageError> {
    let mut url = Url::parse(&location.sas_url)
        .map_err(|e| StorageError::InvalidLocation(format!("malformed pre-signed URL: {e}")))?;

    let names_container = url
        .path_segments()
        .is_some_and(|mut segments| segments.any(|s| !s.is_empty()));

    if !names_container {
        if location.container_name.is_empty() {
            return Err(StorageError::InvalidLocation(
                "container name is empty".into(),
            ));
        }
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidLocation("pre-signed URL has no path".into()))?
            .pop_if_empty()
            .push(&location.container_name);
    }

    Ok(url)
}

/// Resolve the URL used to check that the container exists.
///
/// List Blobs (`comp=list`) is authorized by both account and container
/// SAS tokens, unlike Get Container Properties.
pub(crate) fn container_probe_url(location: &ContainerLocation) -> Result<Url, StorageError> {
    let mut url = container_url(location)?;
    url.query_pairs_mut()
        .append_pair("restype", "container")
        .append_pair("comp", "list")
        .append_pair("maxresults", "1");
    Ok(url)
}

/// Resolve the URL of a single blob inside the container.
///
/// The whole name is one percent-encoded path segment, so `/`, `\` and dot
/// segments in client filenames reach the service verbatim.
pub(crate) fn blob_url(location: &ContainerLocation, name: &str) -> Result<Url, StorageError> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(StorageError::InvalidObjectName(name.to_string()));
    }
    let mut url = container_url(location)?;
    url.path_segments_mut()
        .map_err(|_| StorageError::InvalidLocation("pre-signed URL has no path".into()))?
        .pop_if_empty()
        .push(name);
    Ok(url)
}

async fn service_error(response: reqwest::Response) -> StorageError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    StorageError::Service { status, body }
}

#[async_trait]
impl ObjectStore for AzureBlobStore {
    async fn container_exists(&self, location: &ContainerLocation) -> Result<bool, StorageError> {
        let url = container_probe_url(location)?;

        let response = self
            .client
            .get(url)
            .header("x-ms-version", API_VERSION)
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(service_error(response).await),
        }
    }

    async fn put_object(
        &self,
        location: &ContainerLocation,
        name: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        let url = blob_url(location, name)?;
        let size = data.len();

        let response = self
            .client
            .put(url)
            .header("x-ms-version", API_VERSION)
            .header("x-ms-blob-type", "BlockBlob")
            .header(
                header::CONTENT_TYPE,
                content_type.unwrap_or("application/octet-stream"),
            )
            .body(data)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        debug!(container = %location.container_name, blob = name, size, "Blob written");
        Ok(())
    }
}
