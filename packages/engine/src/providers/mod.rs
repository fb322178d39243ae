//! Provider adapters for the supported LLM vendors
//!
//! One adapter per vendor, all consuming the same normalized [`CallParams`]:
//!
//! - `openai`: chat-completions wire format, also owns the shared chat types
//! - `deepseek`: OpenAI-compatible, reuses the chat types at its own endpoint
//! - `anthropic`: native messages API
//! - `gemini`: generateContent API, model and key travel in the URL

mod anthropic;
mod deepseek;
mod gemini;
mod openai;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// Sampling temperature sent to every vendor. Extraction wants
/// deterministic output.
pub(crate) const TEMPERATURE: f64 = 0.0;

/// Supported LLM vendors.
///
/// A closed set: adding a vendor means adding a variant and its adapter,
/// and the compiler points at every match that needs extending.
/// Inbound tags arrive as plain strings and go through [`FromStr`] so an
/// unknown tag surfaces as [`EngineError::UnknownProvider`]; `Serialize`
/// exists for the response envelopes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    DeepSeek,
    Anthropic,
    Gemini,
}

impl Provider {
    /// Stable wire tag for this provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::DeepSeek => "deepseek",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
        }
    }

    /// Model used when a request does not name one.
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::DeepSeek => "deepseek-chat",
            Provider::Anthropic => "claude-sonnet-4-5-20250929",
            Provider::Gemini => "gemini-2.0-flash",
        }
    }

    /// Environment variable holding this vendor's API key.
    pub fn key_var(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::DeepSeek => "DEEPSEEK_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "openai" => Ok(Provider::OpenAi),
            "deepseek" => Ok(Provider::DeepSeek),
            "anthropic" => Ok(Provider::Anthropic),
            "gemini" => Ok(Provider::Gemini),
            other => Err(EngineError::UnknownProvider(other.to_string())),
        }
    }
}

/// Normalized input consumed by every adapter.
#[derive(Debug, Clone)]
pub struct CallParams {
    pub model: String,
    pub system: String,
    pub user: String,
}

/// Trait for LLM transports, enabling mocking in tests.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one generation request and return the raw model text.
    async fn call(&self, provider: Provider, params: &CallParams) -> Result<String>;
}

/// Dispatches calls to the vendor adapters over a shared HTTP client.
///
/// Credentials are looked up per call, so a deployment may configure any
/// subset of vendors and only pay for what a request actually selects.
//
// NOTE: Do NOT derive `Debug` on this struct - the vendor API keys in the
// config would be exposed. If Debug is needed, implement it manually with
// the keys redacted.
pub struct ProviderRouter {
    http: reqwest::Client,
    config: EngineConfig,
}

impl ProviderRouter {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(EngineError::ProviderRequest)?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl LlmClient for ProviderRouter {
    async fn call(&self, provider: Provider, params: &CallParams) -> Result<String> {
        let vendor = self.config.vendor(provider);
        let api_key = vendor
            .api_key
            .as_deref()
            .ok_or_else(|| EngineError::MissingCredential {
                provider: provider.to_string(),
                var: provider.key_var().to_string(),
            })?;

        debug!(provider = %provider, model = %params.model, "dispatching provider call");

        match provider {
            Provider::OpenAi => openai::call(&self.http, &vendor.base_url, api_key, params).await,
            Provider::DeepSeek => {
                deepseek::call(&self.http, &vendor.base_url, api_key, params).await
            }
            Provider::Anthropic => {
                anthropic::call(&self.http, &vendor.base_url, api_key, params).await
            }
            Provider::Gemini => gemini::call(&self.http, &vendor.base_url, api_key, params).await,
        }
    }
}

/// Test utilities for the provider layer.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use std::sync::Mutex;

    use super::*;

    /// Mock LLM client for testing. Returns pre-configured responses in order
    /// and records every call it sees.
    pub struct MockLlmClient {
        responses: Mutex<Vec<Result<String>>>,
        calls: Mutex<Vec<CallParams>>,
    }

    impl MockLlmClient {
        pub fn new(responses: Vec<Result<String>>) -> Self {
            // Reverse so we can pop from the end
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_response(content: &str) -> Self {
            Self::new(vec![Ok(content.to_string())])
        }

        pub fn with_responses(contents: Vec<&str>) -> Self {
            Self::new(contents.into_iter().map(|c| Ok(c.to_string())).collect())
        }

        /// Number of calls made so far.
        pub fn call_count(&self) -> usize {
            self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
        }

        /// Params seen by each call, in order.
        pub fn calls(&self) -> Vec<CallParams> {
            self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn call(&self, _provider: Provider, params: &CallParams) -> Result<String> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(params.clone());
            }
            let mut responses = self
                .responses
                .lock()
                .map_err(|e| EngineError::Config(format!("mock lock poisoned: {e}")))?;
            responses
                .pop()
                .unwrap_or(Err(EngineError::Config("mock responses exhausted".into())))
        }
    }
}
