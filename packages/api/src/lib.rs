//! HTTP gateway for schema-validated LLM extraction.
//!
//! Exposes `POST /extract_json` (auth-guarded when `API_AUTH_KEY` is set)
//! and an open `GET /health`. All extraction logic lives in
//! [`extrakt_engine`]; this crate only maps HTTP to it.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ApiConfig;
pub use state::AppState;

/// Largest accepted request body. Prompts and schemas are text; anything
/// bigger than this is not an extraction payload.
pub const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Assemble the application router.
///
/// Auth guards the extraction route only; `/health` stays open. The CORS
/// layer wraps everything, so error responses carry the cross-origin
/// headers too, and browser preflights are answered before auth runs.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allow_origin);

    Router::new()
        .route(
            "/extract_json",
            post(handlers::extract_json).options(handlers::preflight),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::require_api_key,
        ))
        .route("/health", get(handlers::health).options(handlers::preflight))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allow_origin: &str) -> CorsLayer {
    let origin = if allow_origin == "*" {
        AllowOrigin::any()
    } else {
        match allow_origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!(
                    origin = %allow_origin,
                    "CORS_ALLOW_ORIGIN is not a valid header value, allowing any origin"
                );
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-api-key")])
}
