//! In-process [`BlobStore`] for tests and local development.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::blob::{BlobStore, PutOptions};
use crate::error::StorageError;

/// An object held by [`MemoryBlobStore`].
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub options: PutOptions,
}

/// Map-backed blob store.
///
/// Each operation can be made to fail per key (`fail_puts_for`,
/// `fail_deletes_for`, `fail_exists_for`) to exercise partial-upload and
/// best-effort cleanup paths.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: RwLock<BTreeMap<String, StoredObject>>,
    failing_puts: RwLock<HashSet<String>>,
    failing_deletes: RwLock<HashSet<String>>,
    failing_exists: RwLock<HashSet<String>>,
}

fn injected(op: &str, key: &str) -> StorageError {
    StorageError::Backend(format!("injected {op} failure for '{key}'"))
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future `put` of `key` return a backend error.
    pub async fn fail_puts_for(&self, key: impl Into<String>) {
        self.failing_puts.write().await.insert(key.into());
    }

    /// Make every future `delete` of `key` return a backend error.
    pub async fn fail_deletes_for(&self, key: impl Into<String>) {
        self.failing_deletes.write().await.insert(key.into());
    }

    /// Make every future `exists` of `key` return a backend error.
    pub async fn fail_exists_for(&self, key: impl Into<String>) {
        self.failing_exists.write().await.insert(key.into());
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// All stored keys in lexical order.
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> Result<(), StorageError> {
        if self.failing_puts.read().await.contains(key) {
            return Err(injected("put", key));
        }
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                body,
                options: options.clone(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        if self.failing_deletes.read().await.contains(key) {
            return Err(injected("delete", key));
        }
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        if self.failing_exists.read().await.contains(key) {
            return Err(injected("exists", key));
        }
        Ok(self.objects.read().await.contains_key(key))
    }
}
