use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::DataStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// The reference-data cache.
    pub store: Arc<DataStore>,
}
