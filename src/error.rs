//! Error types for langdetect-server

use thiserror::Error;

/// Main error type for detection and dispatch
#[derive(Error, Debug)]
pub enum LangDetectError {
    /// Inbound message is not a JSON object or lacks a string `content`
    #[error("Malformed request: {message}")]
    MalformedRequest { message: String },

    /// The selected backend failed while detecting
    #[error("Backend '{backend}' failed: {message}")]
    BackendInvocation { backend: String, message: String },

    /// The grammar model could not score the content
    #[error("Model failure: {message}")]
    ModelFailure { message: String },

    /// A built-in rule pattern did not compile
    #[error("Invalid rule pattern for '{language}': {source}")]
    InvalidRule {
        language: String,
        #[source]
        source: regex::Error,
    },

    /// A response could not be serialized
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    /// The configured default selector names no registered backend
    #[error("Unknown default backend: {selector}")]
    UnknownDefaultBackend { selector: String },
}

impl LangDetectError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }
}

/// Result type alias for langdetect-server operations
pub type Result<T> = std::result::Result<T, LangDetectError>;
