//! Error types for the extraction engine

use thiserror::Error;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider tag outside the supported set
    #[error("Unsupported provider: {0}")]
    UnknownProvider(String),

    /// Selected provider has no API key configured
    #[error("Missing {var} for provider {provider}")]
    MissingCredential { provider: String, var: String },

    /// HTTP transport failure before the provider answered
    #[error("Provider request failed: {0}")]
    ProviderRequest(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Provider API error (status {status}): {body}")]
    ProviderApi { status: u16, body: String },

    /// Caller-supplied schema does not compile
    #[error("Invalid JSON Schema: {0}")]
    InvalidSchema(String),

    /// Model output parsed as JSON but violated the schema
    #[error("Schema validation failed: {}", errors.join(", "))]
    SchemaValidation { errors: Vec<String> },

    /// No parseable JSON value found in model output
    #[error("No JSON value found in model output")]
    NotJson,
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
