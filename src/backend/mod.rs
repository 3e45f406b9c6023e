//! Detection backends
//!
//! Every engine is wrapped in an adapter implementing [`DetectionBackend`],
//! so the dispatcher calls `detect(content, options)` and always receives a
//! list of [`Prediction`]s regardless of the engine's native output shape.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::prediction::Prediction;

pub mod model;
pub mod regexp;

pub use model::ModelBackend;
pub use regexp::RegexpBackend;

/// Backend-specific tuning data taken from the request's `bias` field
pub type Options = Map<String, Value>;

/// Uniform detection contract shared by all backends
///
/// Implementations propagate engine failures as errors; they never retry
/// and never turn a failure into an empty result.
#[async_trait]
pub trait DetectionBackend: Send + Sync {
    /// Selector token clients use to pick this backend
    fn name(&self) -> &str;

    /// Detect the language of `content`, most likely first
    async fn detect(&self, content: &str, options: &Options) -> Result<Vec<Prediction>>;
}

/// The built-in backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Grammar-fit model with ranked confidences
    Model,
    /// Regexp rules producing one unscored guess
    Regexp,
}

impl BackendKind {
    /// Selector token carried in the request's `model` field
    pub fn selector(&self) -> &'static str {
        match self {
            Self::Model => "vscode-languagedetection",
            Self::Regexp => "vscode-regexp-languagedetection",
        }
    }
}
