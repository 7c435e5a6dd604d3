//! Storage provider seam.

use async_trait::async_trait;

use crate::error::StorageError;

/// Per-object metadata sent with an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOptions {
    pub content_type: &'static str,
    pub cache_control: &'static str,
}

/// Minimal object store contract used by the image pipeline.
///
/// Keys are relative to the configured container and use `/` separators.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `body` under `key`, replacing any existing object.
    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> Result<(), StorageError>;

    /// Remove the object at `key`. Removing a missing object is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Whether an object exists at `key`.
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;
}
