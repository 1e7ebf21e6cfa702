//! Response schema for the semantic extractor
//!
//! The same shape is sent to the model as a response schema and enforced on
//! receipt with a strict deserializer: every field required, strings only, no
//! unknown fields. A surrounding markdown code fence is the one wrapper that
//! is tolerated.

use crate::error::ExtractorError;
use serde::Deserialize;
use specscout_domain::RawCharacteristic;

/// JSON schema sent with every model request
pub const RESPONSE_SCHEMA: &str = r#"{
  "type": "OBJECT",
  "properties": {
    "name": { "type": "STRING" },
    "characteristics": {
      "type": "ARRAY",
      "items": {
        "type": "OBJECT",
        "properties": {
          "label": { "type": "STRING" },
          "value": { "type": "STRING" }
        },
        "required": ["label", "value"]
      }
    }
  },
  "required": ["name", "characteristics"]
}"#;

/// A model response that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductResponse {
    /// Product name
    pub name: String,

    /// Characteristics in the order the model listed them
    pub characteristics: Vec<CharacteristicResponse>,
}

/// One label/value pair in a model response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacteristicResponse {
    /// Characteristic label
    pub label: String,

    /// Characteristic value, verbatim
    pub value: String,
}

impl From<CharacteristicResponse> for RawCharacteristic {
    fn from(c: CharacteristicResponse) -> Self {
        RawCharacteristic::new(c.label, c.value)
    }
}

/// Validate a raw model response against the schema
pub fn parse_response(response: &str) -> Result<ProductResponse, ExtractorError> {
    let json = strip_code_fence(response)?;
    Ok(serde_json::from_str(json)?)
}

/// Remove a surrounding markdown code fence, if there is one
fn strip_code_fence(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return Ok(trimmed);
    }

    // Drop the opening line (```json or ```) and the closing fence
    let body = trimmed
        .split_once('\n')
        .map(|(_, rest)| rest)
        .ok_or_else(|| ExtractorError::SchemaValidation("Empty code block".to_string()))?;
    let body = body
        .trim_end()
        .strip_suffix("```")
        .ok_or_else(|| ExtractorError::SchemaValidation("Unterminated code block".to_string()))?;
    Ok(body.trim())
}
