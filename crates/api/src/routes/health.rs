//! Readiness report for load balancers and deploy checks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency answered, otherwise `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
    pub blob_storage: bool,
    /// Container (bucket) movie images are written to.
    pub image_container: String,
}

/// GET /health
///
/// Checks PostgreSQL and the blob store concurrently. Answers 503 when
/// either is unreachable so the instance is taken out of rotation.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (database, blob_storage) = tokio::join!(
        festival_db::health_check(&state.pool),
        state.images.storage_ready(),
    );
    let database = database.is_ok();

    let (code, status) = if database && blob_storage {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
        blob_storage,
        image_container: state.images.container().to_string(),
    };
    (code, Json(body))
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
