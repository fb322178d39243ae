//! Salvage a JSON value from raw model output
//!
//! Models are instructed to answer with bare JSON, but they routinely wrap
//! the value in markdown fences or prose anyway. Parsing falls back to
//! scanning for a delimited span that parses, so a usable value buried in
//! chatter is still recovered.

use serde_json::Value;

use crate::error::{EngineError, Result};

/// Parse model output into a JSON value.
///
/// Tries a strict parse of the trimmed text first. If that fails, scans for
/// the first `{` or `[` whose span up to the last matching closing delimiter
/// parses as JSON. Returns [`EngineError::NotJson`] when no span parses.
pub fn extract_json(raw: &str) -> Result<Value> {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    let last_brace = trimmed.rfind('}');
    let last_bracket = trimmed.rfind(']');

    for (start, open) in trimmed.char_indices() {
        let close = match open {
            '{' => last_brace,
            '[' => last_bracket,
            _ => continue,
        };
        let Some(end) = close else { continue };
        if end <= start {
            continue;
        }
        if let Ok(value) = serde_json::from_str(&trimmed[start..=end]) {
            return Ok(value);
        }
    }

    Err(EngineError::NotJson)
}
