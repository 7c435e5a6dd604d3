//! Route definitions for movie artwork.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::movie_image;
use crate::state::AppState;

/// Routes mounted at `/movies/{year}/{movie_id}/images`.
///
/// ```text
/// GET    /          -> status
/// PUT    /          -> upload
/// DELETE /          -> delete
/// POST   /migrate   -> migrate
/// GET    /{size}    -> url
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(movie_image::status)
                .put(movie_image::upload)
                .delete(movie_image::delete),
        )
        .route("/migrate", post(movie_image::migrate))
        .route("/{size}", get(movie_image::url))
}
