//! Extraction orchestration: prompt assembly, provider calls, validation retry

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::json;
use crate::providers::{CallParams, LlmClient, Provider};
use crate::schema::SchemaValidator;

const SYSTEM_PROMPT: &str = include_str!("../prompts/system_extraction.txt");

/// Attempts per request: one initial call plus one retry when the output
/// fails to parse or validate.
pub const MAX_ATTEMPTS: u32 = 2;

const VALIDATION_FAILED: &str = "Model output did not validate against schema";

/// One extraction job: the text to read and the shape to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Natural-language instruction plus the source text.
    pub prompt: String,
    /// JSON Schema the output must satisfy.
    pub schema: Value,
    /// Provider tag; the configured default applies when absent.
    #[serde(default)]
    pub provider: Option<String>,
    /// Model override; the provider's default applies when absent.
    #[serde(default)]
    pub model: Option<String>,
}

/// Outcome of an extraction run.
///
/// `Invalid` is not an error: the pipeline worked, the model just never
/// produced conforming output within the attempt budget.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    /// Output parsed and validated against the schema.
    Valid {
        provider: Provider,
        model: String,
        value: Value,
    },
    /// Every attempt produced output that failed to parse or validate.
    /// `raw` is the last attempt's verbatim output, kept for debugging.
    Invalid {
        provider: Provider,
        model: String,
        reason: String,
        raw: String,
    },
}

/// Main extraction orchestrator.
///
/// Resolves provider and model, assembles the prompt payload, calls the
/// provider through [`LlmClient`], and retries once when the output fails
/// to parse or validate. Errors outside the model's control (unknown
/// provider, bad schema, transport and vendor failures) abort immediately
/// without consuming the retry.
pub struct Extractor<'a, C: LlmClient> {
    client: &'a C,
    config: &'a EngineConfig,
}

impl<'a, C: LlmClient> Extractor<'a, C> {
    pub fn new(client: &'a C, config: &'a EngineConfig) -> Self {
        Self { client, config }
    }

    /// Run one extraction request to completion.
    pub async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        let provider = match &request.provider {
            Some(tag) => tag.parse()?,
            None => self.config.default_provider,
        };
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string());

        let validator = SchemaValidator::new(&request.schema)?;

        let user = serde_json::json!({
            "prompt": request.prompt,
            "schema": request.schema,
        })
        .to_string();

        let params = CallParams {
            model: model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            user,
        };

        info!(provider = %provider, model = %model, "starting extraction");

        let mut last_raw = String::new();

        for attempt in 1..=MAX_ATTEMPTS {
            debug!(provider = %provider, attempt, "provider call");

            last_raw = self.client.call(provider, &params).await?;

            let value = match json::extract_json(&last_raw) {
                Ok(value) => value,
                Err(EngineError::NotJson) => {
                    warn!(provider = %provider, attempt, "no JSON in model output");
                    continue;
                }
                Err(e) => return Err(e),
            };

            match validator.validate(&value) {
                Ok(()) => {
                    debug!(provider = %provider, attempt, "schema validation passed");
                    return Ok(ExtractionResult::Valid {
                        provider,
                        model,
                        value,
                    });
                }
                Err(EngineError::SchemaValidation { errors }) => {
                    warn!(
                        provider = %provider,
                        attempt,
                        error_count = errors.len(),
                        "schema validation failed"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        warn!(provider = %provider, model = %model, "attempts exhausted without conforming output");

        Ok(ExtractionResult::Invalid {
            provider,
            model,
            reason: VALIDATION_FAILED.to_string(),
            raw: last_raw,
        })
    }
}
