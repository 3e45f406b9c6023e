//! Adapter for the regexp rule engine

use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{BackendKind, DetectionBackend, Options};
use crate::engine::RegexpRules;
use crate::error::{LangDetectError, Result};
use crate::prediction::Prediction;

/// Wraps the rule engine's single best guess into a prediction list
///
/// The request options are handed to the engine as its bias. A guess becomes
/// a one-element list with [`crate::prediction::UNKNOWN_CONFIDENCE`]; no
/// guess becomes an empty list. Matching runs over the whole frame, so it
/// happens on the blocking pool.
pub struct RegexpBackend {
    rules: Arc<RegexpRules>,
}

impl RegexpBackend {
    pub fn new(rules: Arc<RegexpRules>) -> Self {
        Self { rules }
    }
}

#[async_trait]
impl DetectionBackend for RegexpBackend {
    fn name(&self) -> &str {
        BackendKind::Regexp.selector()
    }

    async fn detect(&self, content: &str, options: &Options) -> Result<Vec<Prediction>> {
        let rules = Arc::clone(&self.rules);
        let content = content.to_owned();
        let bias = options.clone();

        let guess = tokio::task::spawn_blocking(move || rules.detect(&content, &bias))
            .await
            .map_err(|e| LangDetectError::BackendInvocation {
                backend: self.name().to_string(),
                message: format!("rule task did not complete: {}", e),
            })?;

        Ok(guess
            .filter(|id| !id.is_empty())
            .map(Prediction::unestimated)
            .into_iter()
            .collect())
    }
}
