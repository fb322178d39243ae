//! DeepSeek adapter
//!
//! DeepSeek exposes an OpenAI-compatible chat-completions API, so this
//! adapter reuses the shared chat types and differs only in its endpoint:
//! the base URL already carries no `/v1` segment.

use crate::error::Result;
use crate::providers::{openai, CallParams};

pub(super) async fn call(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    params: &CallParams,
) -> Result<String> {
    openai::send_chat(http, &format!("{base_url}/chat/completions"), api_key, params).await
}
