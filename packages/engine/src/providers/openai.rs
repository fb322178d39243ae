//! OpenAI chat-completions adapter
//!
//! Also owns the chat wire types shared with the OpenAI-compatible vendors.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, Result};
use crate::providers::{CallParams, TEMPERATURE};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

pub(super) async fn call(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    params: &CallParams,
) -> Result<String> {
    send_chat(http, &format!("{base_url}/v1/chat/completions"), api_key, params).await
}

/// Send a chat-completions request and return the first choice's text.
///
/// A success response without choices yields an empty string, which the
/// caller treats like any other non-JSON output.
pub(super) async fn send_chat(
    http: &reqwest::Client,
    url: &str,
    api_key: &str,
    params: &CallParams,
) -> Result<String> {
    let body = ChatRequest {
        model: &params.model,
        temperature: TEMPERATURE,
        messages: [
            ChatMessage {
                role: "system",
                content: &params.system,
            },
            ChatMessage {
                role: "user",
                content: &params.user,
            },
        ],
    };

    let resp = http.post(url).bearer_auth(api_key).json(&body).send().await?;

    let status = resp.status();
    if !status.is_success() {
        let body_text = resp.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %body_text, "chat completion rejected");
        return Err(EngineError::ProviderApi {
            status: status.as_u16(),
            body: body_text,
        });
    }

    let api_response: ChatResponse = resp.json().await?;

    Ok(api_response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_default())
}
