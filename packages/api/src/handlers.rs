//! HTTP handlers for the extraction gateway.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use extrakt_engine::{ExtractionRequest, ExtractionResult, Extractor};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// Liveness probe. No auth, no side effects.
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Plain OPTIONS requests get an empty 204. Browser preflights (those
/// carrying `Access-Control-Request-Method`) are answered by the CORS
/// layer before they ever reach this handler.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// POST /extract_json: run one prompt through a provider and return the
/// output only if it validates against the caller's schema.
///
/// The body is validated field by field rather than deserialized in one
/// shot so that each problem gets its own message.
pub async fn extract_json(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let prompt = body
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing 'prompt' string".to_string()))?;

    let schema = body
        .get("schema")
        .filter(|v| v.is_object())
        .ok_or_else(|| ApiError::BadRequest("Missing 'schema' object".to_string()))?;

    let request = ExtractionRequest {
        prompt: prompt.to_string(),
        schema: schema.clone(),
        provider: optional_string_field(&body, "provider")?,
        model: optional_string_field(&body, "model")?,
    };

    let extractor = Extractor::new(state.router.as_ref(), state.engine_config.as_ref());

    match extractor.extract(&request).await? {
        ExtractionResult::Valid {
            provider,
            model,
            value,
        } => Ok(Json(json!({
            "ok": true,
            "provider": provider,
            "model": model,
            "result": value,
        }))
        .into_response()),
        ExtractionResult::Invalid {
            provider,
            model,
            reason,
            raw,
        } => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "ok": false,
                "error": reason,
                "provider": provider,
                "model": model,
                "raw": raw,
            })),
        )
            .into_response()),
    }
}

/// Read an optional string field. An empty string means "use the default",
/// the same as omitting the field entirely.
fn optional_string_field(body: &Value, field: &str) -> Result<Option<String>, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ApiError::BadRequest(format!(
            "Invalid '{field}': expected a string"
        ))),
    }
}
