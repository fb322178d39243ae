//! JSON Schema compilation and validation

use jsonschema::Validator;
use serde_json::Value;

use crate::error::{EngineError, Result};

/// Validates extracted values against a caller-supplied JSON Schema.
///
/// The schema arrives with each request, so compilation happens per request
/// rather than once at startup. Unknown schema keywords are ignored, matching
/// the lenient mode of common JavaScript validators.
#[derive(Debug)]
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    /// Compile the given schema document.
    ///
    /// Returns `Err(InvalidSchema)` when the document is not a valid schema,
    /// for example `{"type": 12}`.
    pub fn new(schema: &Value) -> Result<Self> {
        let validator = Validator::new(schema)
            .map_err(|e| EngineError::InvalidSchema(format!("failed to compile schema: {e}")))?;

        Ok(Self { validator })
    }

    /// Validate a JSON value against the compiled schema.
    ///
    /// Returns `Ok(())` if valid, or `Err(SchemaValidation)` carrying every
    /// violation, each prefixed with its instance path.
    pub fn validate(&self, value: &Value) -> Result<()> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(value)
            .map(|e| {
                let path = e.instance_path().to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{path}: {e}")
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EngineError::SchemaValidation { errors })
        }
    }
}
