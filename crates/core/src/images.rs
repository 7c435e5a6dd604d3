//! Movie artwork variant table and storage path rules.
//!
//! Every movie image is stored as five JPEG variants under the base path
//! `{year}/{movie_id}`. This module owns the fixed variant table and the
//! string rules for blob keys and public URLs; the storage crate does the
//! actual rendering and uploading.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// MIME type of every stored variant.
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Cache header sent with every upload (one year).
pub const CACHE_CONTROL: &str = "public, max-age=31536000";

/// File extension of every stored variant.
pub const VARIANT_EXTENSION: &str = "jpg";

/// JPEG quality for the full-size variant.
pub const ORIGINAL_QUALITY: u8 = 90;

/// JPEG quality for the resized variants.
pub const RESIZED_QUALITY: u8 = 85;

// ---------------------------------------------------------------------------
// Variant table
// ---------------------------------------------------------------------------

/// One of the five fixed renditions of a movie image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSize {
    Original,
    Large,
    Medium,
    Thumbnail,
    Small,
}

impl ImageSize {
    /// All variants, in upload order.
    pub const ALL: [ImageSize; 5] = [
        ImageSize::Original,
        ImageSize::Large,
        ImageSize::Medium,
        ImageSize::Thumbnail,
        ImageSize::Small,
    ];

    /// Parse a size name as used in URLs and API payloads.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|size| size.name() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|s| s.name()).collect();
                CoreError::Validation(format!(
                    "Unknown image size '{name}'. Must be one of: {}",
                    known.join(", ")
                ))
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Large => "large",
            Self::Medium => "medium",
            Self::Thumbnail => "thumbnail",
            Self::Small => "small",
        }
    }

    /// Filename stem of the stored blob.
    pub fn suffix(self) -> &'static str {
        self.name()
    }

    /// Maximum output width in pixels; `None` keeps the source dimensions.
    pub fn max_width(self) -> Option<u32> {
        match self {
            Self::Original => None,
            Self::Large => Some(1200),
            Self::Medium => Some(800),
            Self::Thumbnail => Some(400),
            Self::Small => Some(200),
        }
    }

    pub fn quality(self) -> u8 {
        match self {
            Self::Original => ORIGINAL_QUALITY,
            _ => RESIZED_QUALITY,
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Paths and URLs
// ---------------------------------------------------------------------------

/// Base path shared by all variants of one movie image.
pub fn base_path(year: i32, movie_id: DbId) -> String {
    format!("{year}/{movie_id}")
}

/// Blob key of one variant, relative to the container.
pub fn blob_key(base_path: &str, size: ImageSize) -> String {
    format!("{base_path}/{}.{VARIANT_EXTENSION}", size.suffix())
}

/// Public URL of one variant: `{public_base}/{container}/{base_path}/{suffix}.jpg`.
///
/// A trailing slash on `public_base` is ignored.
pub fn public_url(public_base: &str, container: &str, base_path: &str, size: ImageSize) -> String {
    format!(
        "{}/{container}/{}",
        public_base.trim_end_matches('/'),
        blob_key(base_path, size)
    )
}

/// Strip an optional `data:<mime>;base64,` prefix from an encoded image.
///
/// Input without a data-URI prefix is returned unchanged.
pub fn strip_data_uri_prefix(data: &str) -> &str {
    let trimmed = data.trim();
    if !trimmed.starts_with("data:") {
        return trimmed;
    }
    match trimmed.split_once(',') {
        Some((header, payload)) if header.ends_with(";base64") => payload,
        _ => trimmed,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
