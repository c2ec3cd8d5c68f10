use std::sync::Arc;

use crate::config::ServerConfig;
use crate::selector::CameraSelector;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: parktrack_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Round-robin cursor handed out by `GET /cameras/next`.
    pub selector: Arc<CameraSelector>,
}

impl AppState {
    pub fn new(pool: parktrack_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            selector: Arc::new(CameraSelector::new()),
        }
    }
}
