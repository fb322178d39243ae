//! Anthropic messages adapter

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, Result};
use crate::providers::{CallParams, TEMPERATURE};

const API_VERSION: &str = "2023-06-01";

/// The messages API requires an output cap; extraction payloads fit well
/// within this.
const MAX_TOKENS: u32 = 4096;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

pub(super) async fn call(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    params: &CallParams,
) -> Result<String> {
    let url = format!("{base_url}/v1/messages");

    let body = MessagesRequest {
        model: &params.model,
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
        system: &params.system,
        messages: [UserMessage {
            role: "user",
            content: &params.user,
        }],
    };

    let resp = http
        .post(&url)
        .header("x-api-key", api_key)
        .header("anthropic-version", API_VERSION)
        .header("content-type", "application/json")
        .json(&body)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body_text = resp.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %body_text, "messages request rejected");
        return Err(EngineError::ProviderApi {
            status: status.as_u16(),
            body: body_text,
        });
    }

    let api_response: MessagesResponse = resp.json().await?;

    // Join all text blocks; non-text blocks carry no text and are skipped.
    Ok(api_response
        .content
        .into_iter()
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join(""))
}
