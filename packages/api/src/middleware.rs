//! Request auth middleware.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Require a valid `x-api-key` header when auth is enabled.
///
/// CORS preflights are exempt: browsers never attach custom headers to an
/// OPTIONS probe, so rejecting it would break every cross-origin caller.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.is_auth_enabled() {
        return Ok(next.run(request).await);
    }

    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let presented = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok());

    if state.config.auth_key.as_deref() == presented {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("rejected request with missing or invalid api key");
        Err(ApiError::Unauthorized)
    }
}
