//! Movie image upload, lookup and cleanup.

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use festival_core::images::{self, ImageSize, CACHE_CONTROL, JPEG_CONTENT_TYPE};
use festival_core::types::DbId;
use futures::future::join_all;
use serde::Serialize;

use crate::blob::{BlobStore, PutOptions};
use crate::error::StorageError;
use crate::render;

/// Metadata attached to every uploaded variant.
const VARIANT_OPTIONS: PutOptions = PutOptions {
    content_type: JPEG_CONTENT_TYPE,
    cache_control: CACHE_CONTROL,
};

/// Key looked up by [`ImageStorageService::storage_ready`].
pub const READINESS_KEY: &str = "_health/readiness";

/// Result of a successful upload: the shared base path and one public URL
/// per variant.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedImage {
    pub base_path: String,
    pub urls: BTreeMap<ImageSize, String>,
}

/// Renders and stores the five variants of a movie image.
///
/// Constructed once by the composition root and shared behind an `Arc`.
pub struct ImageStorageService {
    store: Arc<dyn BlobStore>,
    container: String,
    public_base_url: String,
}

impl ImageStorageService {
    pub fn new(
        store: Arc<dyn BlobStore>,
        container: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            container: container.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Render all variants of `data` and upload them under `{year}/{movie_id}`.
    ///
    /// Variants are uploaded one after another in table order. The first
    /// failure is returned as is; variants uploaded before it stay in place.
    pub async fn upload_movie_image(
        &self,
        data: Vec<u8>,
        year: i32,
        movie_id: DbId,
    ) -> Result<UploadedImage, StorageError> {
        let base_path = images::base_path(year, movie_id);
        let source_len = data.len();
        let source = Arc::new(tokio::task::spawn_blocking(move || render::decode(&data)).await??);

        let mut urls = BTreeMap::new();
        for size in ImageSize::ALL {
            let source = Arc::clone(&source);
            let variant =
                tokio::task::spawn_blocking(move || render::render_variant(&source, size)).await??;

            let key = images::blob_key(&base_path, size);
            tracing::debug!(
                key = %key,
                size = %variant.size,
                width = variant.width,
                height = variant.height,
                bytes = variant.bytes.len(),
                "Uploading image variant"
            );
            self.store.put(&key, variant.bytes, &VARIANT_OPTIONS).await?;
            urls.insert(size, self.url_for(&base_path, size));
        }

        tracing::info!(base_path = %base_path, source_len, "Movie image uploaded");
        Ok(UploadedImage { base_path, urls })
    }

    /// Public URL of one variant by size name.
    pub fn get_image_url(&self, base_path: &str, size: &str) -> Result<String, StorageError> {
        let size = ImageSize::from_name(size)?;
        Ok(self.url_for(base_path, size))
    }

    /// Public URLs of all five variants.
    pub fn image_urls(&self, base_path: &str) -> BTreeMap<ImageSize, String> {
        ImageSize::ALL
            .into_iter()
            .map(|size| (size, self.url_for(base_path, size)))
            .collect()
    }

    /// Remove all variants concurrently.
    ///
    /// Best effort: each failed deletion is logged and skipped, and the call
    /// itself never fails.
    pub async fn delete_movie_images(&self, year: i32, movie_id: DbId) {
        let base_path = images::base_path(year, movie_id);
        let deletions = ImageSize::ALL.into_iter().map(|size| {
            let key = images::blob_key(&base_path, size);
            async move {
                let result = self.store.delete(&key).await;
                (key, result)
            }
        });

        let mut failed = 0usize;
        for (key, result) in join_all(deletions).await {
            if let Err(e) = result {
                failed += 1;
                tracing::warn!(key = %key, error = %e, "Failed to delete image variant");
            }
        }

        tracing::info!(base_path = %base_path, failed, "Movie image deletion finished");
    }

    /// Whether the movie has an uploaded image.
    ///
    /// Only the `original` variant is checked. A storage error counts as
    /// "does not exist".
    pub async fn movie_images_exist(&self, year: i32, movie_id: DbId) -> bool {
        let key = images::blob_key(&images::base_path(year, movie_id), ImageSize::Original);
        match self.store.exists(&key).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Image existence check failed");
                false
            }
        }
    }

    /// Upload an image supplied as base64, with or without a
    /// `data:<mime>;base64,` prefix.
    ///
    /// Line breaks and other ASCII whitespace inside the payload are ignored.
    pub async fn migrate_base64_image(
        &self,
        data: &str,
        year: i32,
        movie_id: DbId,
    ) -> Result<UploadedImage, StorageError> {
        let payload: String = images::strip_data_uri_prefix(data)
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = STANDARD.decode(payload)?;
        tracing::debug!(year, movie_id, bytes = bytes.len(), "Migrating base64 image");
        self.upload_movie_image(bytes, year, movie_id).await
    }

    /// Whether the blob store answers a lookup.
    ///
    /// Reports readiness only; the looked-up key need not exist.
    pub async fn storage_ready(&self) -> bool {
        match self.store.exists(READINESS_KEY).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Blob store readiness check failed");
                false
            }
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    fn url_for(&self, base_path: &str, size: ImageSize) -> String {
        images::public_url(&self.public_base_url, &self.container, base_path, size)
    }
}
