use std::sync::Arc;

use noor_db::Storage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend (in-memory or PostgreSQL).
    pub storage: Arc<dyn Storage>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
