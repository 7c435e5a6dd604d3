use std::sync::Arc;

use festival_storage::ImageStorageService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: festival_db::DbPool,
    /// Server configuration; read by the router builder for limits and CORS.
    pub config: Arc<ServerConfig>,
    /// Movie artwork pipeline over the configured blob store.
    pub images: Arc<ImageStorageService>,
}
