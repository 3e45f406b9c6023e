//! Socket server protocol message codec
//!
//! Requests and responses are JSON text frames:
//!
//! ```json
//! // Client -> Server
//! {"content": "print('hi')", "model": "vscode-languagedetection", "bias": {}, "id": 7}
//!
//! // Server -> Client
//! {"data": [{"languageId": "py", "confidence": 0.91}], "id": 7}
//! {"error": "Malformed request: missing 'content' field"}
//! ```
//!
//! Fields other than `content`, `model` and `bias` are passthrough: they are
//! copied verbatim, in order, into a successful response.

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::backend::Options;
use crate::error::{LangDetectError, Result};
use crate::prediction::Prediction;

/// Text frame sent to every client right after the handshake
pub const GREETING: &str = "Welcome!";

pub const CONTENT_FIELD: &str = "content";
pub const SELECTOR_FIELD: &str = "model";
pub const OPTIONS_FIELD: &str = "bias";
pub const DATA_FIELD: &str = "data";
pub const ERROR_FIELD: &str = "error";

/// A decoded detection request
#[derive(Debug, Clone, PartialEq)]
pub struct DetectRequest {
    /// Text to classify
    pub content: String,
    /// Backend selector; `None` when absent or not a string
    pub backend: Option<String>,
    /// Backend-specific options (the `bias` object)
    pub options: Options,
    /// Every other request field, echoed in the response
    pub passthrough: Map<String, Value>,
}

/// Decode a raw text frame into a [`DetectRequest`]
pub fn decode(raw: &str) -> Result<DetectRequest> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| LangDetectError::malformed(format!("invalid JSON: {}", e)))?;

    let Value::Object(fields) = value else {
        return Err(LangDetectError::malformed("request must be a JSON object"));
    };

    let mut content = None;
    let mut backend = None;
    let mut options = Options::new();
    let mut passthrough = Map::new();

    for (key, value) in fields {
        match key.as_str() {
            CONTENT_FIELD => match value {
                Value::String(text) => content = Some(text),
                other => {
                    return Err(LangDetectError::malformed(format!(
                        "'content' must be a string, got {}",
                        json_type(&other)
                    )))
                }
            },
            SELECTOR_FIELD => match value {
                Value::String(selector) => backend = Some(selector),
                other => {
                    tracing::debug!("Ignoring non-string selector of type {}", json_type(&other))
                }
            },
            OPTIONS_FIELD => match value {
                Value::Object(map) => options = map,
                Value::Null => {}
                other => {
                    tracing::debug!("Ignoring non-object bias of type {}", json_type(&other))
                }
            },
            DATA_FIELD | ERROR_FIELD => {
                tracing::debug!("Dropping reserved request field '{}'", key);
            }
            _ => {
                passthrough.insert(key, value);
            }
        }
    }

    let content =
        content.ok_or_else(|| LangDetectError::malformed("missing 'content' field"))?;

    Ok(DetectRequest {
        content,
        backend,
        options,
        passthrough,
    })
}

/// Encode a successful response: `data` first, then the passthrough fields
pub fn encode(predictions: &[Prediction], passthrough: Map<String, Value>) -> Result<String> {
    let data = serde_json::to_value(predictions)?;

    let mut response = Map::with_capacity(passthrough.len() + 1);
    response.insert(DATA_FIELD.to_string(), data);
    for (key, value) in passthrough {
        if key == DATA_FIELD || key == ERROR_FIELD {
            continue;
        }
        response.insert(key, value);
    }

    Ok(Value::Object(response).to_string())
}

/// Encode an error response; passthrough fields are not echoed
pub fn encode_error(err: &impl Display) -> String {
    let mut response = Map::with_capacity(1);
    response.insert(ERROR_FIELD.to_string(), Value::String(err.to_string()));
    Value::Object(response).to_string()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
