//! Per-message request dispatch
//!
//! `decode -> resolve backend -> detect -> encode`, with a single failure
//! boundary around the whole pipeline: every inbound message produces
//! exactly one response string, even when the backend errors or panics.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;

use crate::error::{LangDetectError, Result};
use crate::socket_server::protocol;
use crate::socket_server::registry::BackendRegistry;

/// Routes decoded requests to backends; shared by every connection
pub struct Dispatcher {
    registry: Arc<BackendRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        Self { registry }
    }

    /// Handle one text frame and return the response frame
    pub async fn handle(&self, raw: &str) -> String {
        match self.dispatch(raw).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Request failed: {}", e);
                protocol::encode_error(&e)
            }
        }
    }

    /// Handle one binary frame; it must carry UTF-8 JSON text
    pub async fn handle_bytes(&self, raw: &[u8]) -> String {
        match std::str::from_utf8(raw) {
            Ok(text) => self.handle(text).await,
            Err(e) => {
                let err = LangDetectError::malformed(format!("binary frame is not UTF-8: {}", e));
                tracing::warn!("Request failed: {}", err);
                protocol::encode_error(&err)
            }
        }
    }

    async fn dispatch(&self, raw: &str) -> Result<String> {
        let request = protocol::decode(raw)?;
        let backend = self.registry.resolve(request.backend.as_deref());

        tracing::debug!(
            "Dispatching {} bytes to {} ({} passthrough fields)",
            request.content.len(),
            backend.name(),
            request.passthrough.len()
        );

        let outcome = AssertUnwindSafe(backend.detect(&request.content, &request.options))
            .catch_unwind()
            .await;

        let predictions = match outcome {
            Ok(Ok(predictions)) => predictions,
            Ok(Err(e @ LangDetectError::BackendInvocation { .. })) => return Err(e),
            Ok(Err(e)) => {
                return Err(LangDetectError::BackendInvocation {
                    backend: backend.name().to_string(),
                    message: e.to_string(),
                })
            }
            Err(panic) => {
                return Err(LangDetectError::BackendInvocation {
                    backend: backend.name().to_string(),
                    message: panic_message(panic.as_ref()),
                })
            }
        };

        protocol::encode(&predictions, request.passthrough)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked".to_string()
    }
}
