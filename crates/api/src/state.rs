use std::sync::Arc;

use packleader_store::ContentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Content store handle; a trait object so tests can substitute an
    /// in-memory store.
    pub store: Arc<dyn ContentStore>,
    /// Server configuration (signature secret, runtime mode).
    pub config: Arc<ServerConfig>,
}
