use festival_core::error::CoreError;

/// Errors raised by blob stores and the image pipeline.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Invalid caller input (e.g. an unknown size name).
    #[error(transparent)]
    InvalidInput(#[from] CoreError),

    #[error("Image payload is empty")]
    EmptyImage,

    #[error("Invalid base64 image data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to encode JPEG: {0}")]
    Encode(String),

    /// Any failure reported by the storage backend.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
