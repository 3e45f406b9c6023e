//! Adapter for the grammar model

use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{BackendKind, DetectionBackend, Options};
use crate::engine::GrammarModel;
use crate::error::{LangDetectError, Result};
use crate::prediction::Prediction;

/// Passes content to [`GrammarModel::run_model`] and returns its ranking as-is
///
/// Options are ignored. Scoring parses the content once per candidate
/// grammar, so it runs on the blocking pool.
pub struct ModelBackend {
    model: Arc<GrammarModel>,
}

impl ModelBackend {
    pub fn new(model: Arc<GrammarModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl DetectionBackend for ModelBackend {
    fn name(&self) -> &str {
        BackendKind::Model.selector()
    }

    async fn detect(&self, content: &str, _options: &Options) -> Result<Vec<Prediction>> {
        let model = Arc::clone(&self.model);
        let content = content.to_owned();

        tokio::task::spawn_blocking(move || model.run_model(&content))
            .await
            .map_err(|e| LangDetectError::ModelFailure {
                message: format!("model task did not complete: {}", e),
            })?
    }
}
