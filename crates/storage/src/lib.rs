//! Object storage for movie artwork.
//!
//! [`ImageStorageService`] renders the five JPEG variants of a movie image
//! and uploads them through a [`BlobStore`]. The store is injected at
//! construction time: [`S3BlobStore`] in production, [`MemoryBlobStore`]
//! for tests and local development.

pub mod blob;
pub mod config;
pub mod error;
pub mod memory;
pub mod render;
pub mod s3;
pub mod service;

pub use blob::{BlobStore, PutOptions};
pub use config::{StorageBackend, StorageConfig};
pub use error::StorageError;
pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;
pub use service::{ImageStorageService, UploadedImage};
