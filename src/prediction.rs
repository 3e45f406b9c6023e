//! Normalized detector output

use serde::{Deserialize, Serialize};

/// Confidence reported by backends that only produce a yes/no guess
pub const UNKNOWN_CONFIDENCE: f64 = -1.0;

/// A single language guess: `{"languageId": "...", "confidence": 0.93}`
///
/// Both fields are always serialized, including when `confidence` is
/// [`UNKNOWN_CONFIDENCE`]. An empty `language_id` is never constructed by
/// the backends; "no plausible language" is an empty prediction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub language_id: String,
    pub confidence: f64,
}

impl Prediction {
    /// Create a prediction with an estimated confidence in `[0.0, 1.0]`
    pub fn new(language_id: impl Into<String>, confidence: f64) -> Self {
        Self {
            language_id: language_id.into(),
            confidence,
        }
    }

    /// Create a prediction whose confidence was not estimated
    pub fn unestimated(language_id: impl Into<String>) -> Self {
        Self::new(language_id, UNKNOWN_CONFIDENCE)
    }
}
