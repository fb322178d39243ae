//! Shared application state handed to every handler.

use std::sync::Arc;

use extrakt_engine::{EngineConfig, ProviderRouter};

use crate::config::ApiConfig;

/// State cloned into each request. Everything is behind an `Arc` so clones
/// are cheap and the underlying HTTP client pool is shared.
#[derive(Clone)]
pub struct AppState {
    /// Provider dispatch backed by a shared HTTP connection pool.
    pub router: Arc<ProviderRouter>,
    /// Provider credentials, base URLs and defaults.
    pub engine_config: Arc<EngineConfig>,
    /// Server-level settings (port, auth, CORS).
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(router: ProviderRouter, engine_config: EngineConfig, config: ApiConfig) -> Self {
        Self {
            router: Arc::new(router),
            engine_config: Arc::new(engine_config),
            config: Arc::new(config),
        }
    }
}
