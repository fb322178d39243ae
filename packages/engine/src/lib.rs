//! extrakt Engine
//!
//! Schema-constrained JSON extraction through LLM providers. This library
//! provides functionality for:
//! - Dispatching prompts to OpenAI, DeepSeek, Anthropic, or Gemini
//! - Salvaging a JSON value out of raw model output
//! - Validating the value against a caller-supplied JSON Schema
//! - Retrying once when the model's output does not conform
//!
//! # Example
//!
//! ```
//! use extrakt_engine::providers::Provider;
//! use extrakt_engine::EngineConfig;
//!
//! let config = EngineConfig::builder()
//!     .default_provider(Provider::Anthropic)
//!     .api_key(Provider::Anthropic, "sk-test")
//!     .build();
//!
//! assert_eq!(
//!     config.vendor(Provider::Anthropic).api_key.as_deref(),
//!     Some("sk-test")
//! );
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod json;
pub mod providers;
pub mod schema;

// Re-export commonly used items
pub use config::{EngineConfig, EngineConfigBuilder, VendorConfig};
pub use error::{EngineError, Result};
pub use extractor::{ExtractionRequest, ExtractionResult, Extractor, MAX_ATTEMPTS};
pub use json::extract_json;
pub use providers::{CallParams, LlmClient, Provider, ProviderRouter};
pub use schema::SchemaValidator;

#[cfg(any(test, feature = "test-utils"))]
pub use providers::test_support::MockLlmClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
