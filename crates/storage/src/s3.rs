//! S3-compatible [`BlobStore`] backed by the AWS SDK.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use aws_smithy_types::error::display::DisplayErrorContext;

use crate::blob::{BlobStore, PutOptions};
use crate::config::StorageConfig;
use crate::error::StorageError;

/// Provider name reported for statically configured credentials.
const CREDENTIALS_PROVIDER: &str = "festival-storage-config";

/// Blob store writing into a single bucket.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    /// Wrap an already configured SDK client.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from [`StorageConfig`].
    ///
    /// Explicit access keys take precedence over the default AWS credential
    /// chain. A custom endpoint switches to path-style addressing, which
    /// MinIO and most S3-compatible services expect.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id.clone(),
                secret.clone(),
                None,
                None,
                CREDENTIALS_PROVIDER,
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        tracing::info!(
            bucket = %config.container,
            region = %config.region,
            endpoint = ?config.endpoint,
            "S3 blob store configured"
        );

        Self::new(Client::from_conf(s3_config), config.container.clone())
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> Result<(), StorageError> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(options.content_type)
            .cache_control(options.cache_control)
            .send()
            .await
            .map_err(|e| backend_error("put", key, &e))?;

        tracing::debug!(bucket = %self.bucket, key, size, "Uploaded object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| backend_error("delete", key, &e))?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
            Err(err) => Err(backend_error("head", key, &err)),
        }
    }
}

/// Flatten an SDK error (including its source chain) into a backend error.
fn backend_error(
    operation: &str,
    key: &str,
    err: &(dyn std::error::Error + 'static),
) -> StorageError {
    StorageError::Backend(format!(
        "S3 {operation} '{key}' failed: {}",
        DisplayErrorContext(err)
    ))
}
