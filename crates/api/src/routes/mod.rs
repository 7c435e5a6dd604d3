pub mod health;
pub mod movie_image;
pub mod venue;

use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /venues                                          list, create
/// /venues/{id}                                     get, update, delete
///
/// /movies/{year}/{movie_id}/images                 status, upload (PUT), delete
/// /movies/{year}/{movie_id}/images/{size}          variant URL (GET)
/// /movies/{year}/{movie_id}/images/migrate         base64 migration (POST)
/// ```
///
/// Image routes accept bodies up to `max_upload_bytes`.
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().nest("/venues", venue::router()).nest(
        "/movies/{year}/{movie_id}/images",
        movie_image::router().layer(DefaultBodyLimit::max(max_upload_bytes)),
    )
}
