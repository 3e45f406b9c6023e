//! Scripted backends for dispatch behavior tests

use std::time::Duration;

use async_trait::async_trait;

use langdetect_server::backend::{DetectionBackend, Options};
use langdetect_server::{LangDetectError, Prediction, Result};

/// Waits before answering with its own name as the language
pub struct SleepyBackend {
    pub name: &'static str,
    pub delay: Duration,
}

#[async_trait]
impl DetectionBackend for SleepyBackend {
    fn name(&self) -> &str {
        self.name
    }

    async fn detect(&self, _content: &str, _options: &Options) -> Result<Vec<Prediction>> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![Prediction::new(self.name, 1.0)])
    }
}

/// Always fails
pub struct FailingBackend;

#[async_trait]
impl DetectionBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn detect(&self, _content: &str, _options: &Options) -> Result<Vec<Prediction>> {
        Err(LangDetectError::ModelFailure {
            message: "inference crashed".to_string(),
        })
    }
}

/// Never answers
pub struct StuckBackend;

#[async_trait]
impl DetectionBackend for StuckBackend {
    fn name(&self) -> &str {
        "stuck"
    }

    async fn detect(&self, _content: &str, _options: &Options) -> Result<Vec<Prediction>> {
        std::future::pending::<()>().await;
        Ok(Vec::new())
    }
}
