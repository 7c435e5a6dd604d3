//! Handlers for movie artwork.
//!
//! Images are addressed by `/movies/{year}/{movie_id}/images` and stored as
//! five JPEG variants in the blob store.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use festival_core::images::{self, ImageSize};
use festival_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST .../images/migrate`.
#[derive(Debug, Deserialize)]
pub struct MigrateImageRequest {
    /// Base64 image, optionally as a `data:` URI.
    pub data: String,
}

/// Response for `GET .../images`.
#[derive(Debug, Serialize)]
pub struct MovieImageStatus {
    pub exists: bool,
    pub base_path: String,
    pub urls: BTreeMap<ImageSize, String>,
}

/// Response for `GET .../images/{size}`.
#[derive(Debug, Serialize)]
pub struct MovieImageUrl {
    pub size: String,
    pub url: String,
}

/// PUT /api/v1/movies/{year}/{movie_id}/images
///
/// The raw request body is the source image (JPEG, PNG or WebP).
pub async fn upload(
    State(state): State<AppState>,
    Path((year, movie_id)): Path<(i32, DbId)>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    if body.is_empty() {
        return Err(AppError::BadRequest("Request body must contain an image".into()));
    }
    let uploaded = state
        .images
        .upload_movie_image(body.to_vec(), year, movie_id)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: uploaded })))
}

/// GET /api/v1/movies/{year}/{movie_id}/images
pub async fn status(
    State(state): State<AppState>,
    Path((year, movie_id)): Path<(i32, DbId)>,
) -> AppResult<impl IntoResponse> {
    let base_path = images::base_path(year, movie_id);
    let exists = state.images.movie_images_exist(year, movie_id).await;
    let urls = state.images.image_urls(&base_path);
    Ok(Json(DataResponse {
        data: MovieImageStatus {
            exists,
            base_path,
            urls,
        },
    }))
}

/// GET /api/v1/movies/{year}/{movie_id}/images/{size}
pub async fn url(
    State(state): State<AppState>,
    Path((year, movie_id, size)): Path<(i32, DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let base_path = images::base_path(year, movie_id);
    let url = state.images.get_image_url(&base_path, &size)?;
    Ok(Json(DataResponse {
        data: MovieImageUrl { size, url },
    }))
}

/// DELETE /api/v1/movies/{year}/{movie_id}/images
///
/// Best effort: always 204, failed variant deletions are only logged.
pub async fn delete(
    State(state): State<AppState>,
    Path((year, movie_id)): Path<(i32, DbId)>,
) -> StatusCode {
    state.images.delete_movie_images(year, movie_id).await;
    StatusCode::NO_CONTENT
}

/// POST /api/v1/movies/{year}/{movie_id}/images/migrate
pub async fn migrate(
    State(state): State<AppState>,
    Path((year, movie_id)): Path<(i32, DbId)>,
    Json(input): Json<MigrateImageRequest>,
) -> AppResult<impl IntoResponse> {
    let uploaded = state
        .images
        .migrate_base64_image(&input.data, year, movie_id)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: uploaded })))
}
