use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Which object store backs source uploads.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Azure Blob Storage addressed through each source's pre-signed URL.
    #[default]
    Azure,
    /// S3-compatible storage; the container name is the bucket name.
    S3,
    /// A directory per container under a local base path.
    Filesystem,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Azure => write!(f, "azure"),
            Self::S3 => write!(f, "s3"),
            Self::Filesystem => write!(f, "filesystem"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AzureConfig {
    /// Per-request timeout for storage calls. Default: 60.
    #[serde(default = "default_azure_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_azure_timeout_secs() -> u64 {
    60
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_azure_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    /// Default: "us-east-1".
    #[serde(default = "default_s3_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Use path-style bucket addressing. Default: false.
    #[serde(default)]
    pub path_style: bool,
}

fn default_s3_region() -> String {
    "us-east-1".into()
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            region: default_s3_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            path_style: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilesystemConfig {
    /// Default: "./data/blobs".
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
}

fn default_base_path() -> PathBuf {
    PathBuf::from("./data/blobs")
}

impl Default for FilesystemConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub azure: AzureConfig,
    #[serde(default)]
    pub s3: S3Config,
    #[serde(default)]
    pub filesystem: FilesystemConfig,
}
