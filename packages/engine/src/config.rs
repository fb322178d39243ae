//! Engine configuration loaded from environment variables

use crate::error::{EngineError, Result};
use crate::providers::Provider;

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Per-vendor connection settings.
///
/// A missing API key is not a configuration error: deployments may enable
/// only a subset of vendors, and the key is checked when a request actually
/// selects the vendor.
//
// NOTE: Do NOT derive `Debug` - `api_key` would end up in logs.
#[derive(Clone)]
pub struct VendorConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl VendorConfig {
    fn without_key(base_url: &str) -> Self {
        Self {
            api_key: None,
            base_url: base_url.to_string(),
        }
    }
}

/// Configuration for the extraction engine.
//
// NOTE: Do NOT derive `Debug` - vendor API keys would end up in logs.
#[derive(Clone)]
pub struct EngineConfig {
    pub default_provider: Provider,
    pub timeout_secs: u64,
    pub openai: VendorConfig,
    pub deepseek: VendorConfig,
    pub anthropic: VendorConfig,
    pub gemini: VendorConfig,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let default_provider = match std::env::var("LLM_DEFAULT_PROVIDER") {
            Ok(tag) => tag.parse().map_err(|_| {
                EngineError::Config(format!("Unsupported LLM_DEFAULT_PROVIDER: {tag}"))
            })?,
            Err(_) => Provider::OpenAi,
        };

        let timeout_secs = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            default_provider,
            timeout_secs,
            openai: vendor_from_env("OPENAI_API_KEY", "OPENAI_BASE_URL", OPENAI_BASE_URL),
            deepseek: vendor_from_env("DEEPSEEK_API_KEY", "DEEPSEEK_BASE_URL", DEEPSEEK_BASE_URL),
            anthropic: vendor_from_env(
                "ANTHROPIC_API_KEY",
                "ANTHROPIC_BASE_URL",
                ANTHROPIC_BASE_URL,
            ),
            gemini: vendor_from_env("GEMINI_API_KEY", "GEMINI_BASE_URL", GEMINI_BASE_URL),
        })
    }

    /// Vendor settings for the given provider.
    pub fn vendor(&self, provider: Provider) -> &VendorConfig {
        match provider {
            Provider::OpenAi => &self.openai,
            Provider::DeepSeek => &self.deepseek,
            Provider::Anthropic => &self.anthropic,
            Provider::Gemini => &self.gemini,
        }
    }

    /// Create a config builder for testing.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder {
            config: EngineConfig {
                default_provider: Provider::OpenAi,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                openai: VendorConfig::without_key(OPENAI_BASE_URL),
                deepseek: VendorConfig::without_key(DEEPSEEK_BASE_URL),
                anthropic: VendorConfig::without_key(ANTHROPIC_BASE_URL),
                gemini: VendorConfig::without_key(GEMINI_BASE_URL),
            },
        }
    }
}

fn vendor_from_env(key_var: &str, base_var: &str, default_base: &str) -> VendorConfig {
    VendorConfig {
        // Treat an empty key as unset so the error names the missing variable.
        api_key: std::env::var(key_var).ok().filter(|k| !k.is_empty()),
        base_url: std::env::var(base_var).unwrap_or_else(|_| default_base.to_string()),
    }
}

/// Builder for constructing `EngineConfig` in tests.
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn default_provider(mut self, provider: Provider) -> Self {
        self.config.default_provider = provider;
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    pub fn api_key(mut self, provider: Provider, api_key: impl Into<String>) -> Self {
        self.vendor_mut(provider).api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, provider: Provider, base_url: impl Into<String>) -> Self {
        self.vendor_mut(provider).base_url = base_url.into();
        self
    }

    pub fn build(self) -> EngineConfig {
        self.config
    }

    fn vendor_mut(&mut self, provider: Provider) -> &mut VendorConfig {
        match provider {
            Provider::OpenAi => &mut self.config.openai,
            Provider::DeepSeek => &mut self.config.deepseek,
            Provider::Anthropic => &mut self.config.anthropic,
            Provider::Gemini => &mut self.config.gemini,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = EngineConfig::builder().build();

        assert_eq!(config.default_provider, Provider::OpenAi);
        assert_eq!(config.timeout_secs, 120);
        assert!(config.vendor(Provider::OpenAi).api_key.is_none());
        assert_eq!(
            config.vendor(Provider::Gemini).base_url,
            "https://generativelanguage.googleapis.com"
        );
    }

    #[test]
    fn test_builder_overrides_single_vendor() {
        let config = EngineConfig::builder()
            .default_provider(Provider::DeepSeek)
            .timeout_secs(5)
            .api_key(Provider::DeepSeek, "sk-test")
            .base_url(Provider::DeepSeek, "http://localhost:9100")
            .build();

        assert_eq!(config.default_provider, Provider::DeepSeek);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(
            config.vendor(Provider::DeepSeek).api_key.as_deref(),
            Some("sk-test")
        );
        assert_eq!(
            config.vendor(Provider::DeepSeek).base_url,
            "http://localhost:9100"
        );
        assert!(config.vendor(Provider::OpenAi).api_key.is_none());
    }
}
