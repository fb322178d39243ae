//! Server configuration loaded from environment variables.

/// Settings for the HTTP server itself. Provider credentials live in
/// [`extrakt_engine::EngineConfig`], not here.
///
/// NOTE: Do NOT derive `Debug`. The auth key must never end up in logs.
#[derive(Clone)]
pub struct ApiConfig {
    /// TCP port to listen on.
    pub port: u16,
    /// Shared secret callers must present in `x-api-key`. `None` disables auth.
    pub auth_key: Option<String>,
    /// Value for `Access-Control-Allow-Origin`. Defaults to `*`.
    pub cors_allow_origin: String,
}

impl ApiConfig {
    /// Build a configuration from environment variables, falling back on
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8787);

        let auth_key = std::env::var("API_AUTH_KEY")
            .ok()
            .filter(|v| !v.is_empty());

        let cors_allow_origin =
            std::env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string());

        if auth_key.is_some() {
            tracing::info!("API key auth enabled");
        } else {
            tracing::info!("API key auth disabled (API_AUTH_KEY not set)");
        }

        Self {
            port,
            auth_key,
            cors_allow_origin,
        }
    }

    /// Whether requests must carry a valid `x-api-key` header.
    pub fn is_auth_enabled(&self) -> bool {
        self.auth_key.is_some()
    }
}
