//! HTTP error mapping.
//!
//! Engine failures are folded into a small set of API errors, each with a
//! fixed status code and a JSON body of the shape `{"error": "..."}`
//! (upstream failures add a `details` field).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use extrakt_engine::EngineError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body is malformed or references something unsupported.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or wrong `x-api-key`.
    #[error("Unauthorized")]
    Unauthorized,

    /// The provider rejected the call or could not be reached.
    #[error("{message}")]
    Upstream { message: String, details: String },

    /// Misconfiguration or another fault on our side.
    #[error("{0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::UnknownProvider(_) | EngineError::InvalidSchema(_) => {
                ApiError::BadRequest(err.to_string())
            }
            EngineError::ProviderApi { status, body } => ApiError::Upstream {
                message: format!("Provider error: status {status}"),
                details: body,
            },
            EngineError::ProviderRequest(e) => ApiError::Upstream {
                message: "Provider request failed".to_string(),
                details: e.to_string(),
            },
            EngineError::MissingCredential { .. }
            | EngineError::Config(_)
            | EngineError::SchemaValidation { .. }
            | EngineError::NotJson => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response(),
            ApiError::Upstream { message, details } => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": message, "details": details })),
            )
                .into_response(),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}
