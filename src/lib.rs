//! langdetect-server: programming-language detection over WebSocket
//!
//! Clients send a snippet of source text and receive a ranked list of
//! language guesses. Requests pick one of several detection backends; every
//! backend answers in the same `{languageId, confidence}` shape.
//!
//! # Backends
//!
//! - `vscode-languagedetection` (default): grammar-fit model scoring the
//!   snippet against each linked tree-sitter grammar, with confidences
//! - `vscode-regexp-languagedetection`: weighted regexp rules returning a
//!   single guess with confidence `-1.0` (not estimated)
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use langdetect_server::engine::ModelConfig;
//! use langdetect_server::socket_server::{BackendRegistry, Dispatcher};
//!
//! let registry = BackendRegistry::standard(ModelConfig::default(), "vscode-languagedetection")?;
//! let dispatcher = Dispatcher::new(Arc::new(registry));
//!
//! let response = dispatcher.handle(r#"{"content": "print('hi')", "id": 1}"#).await;
//! // {"data":[{"languageId":"py","confidence":0.8...}, ...],"id":1}
//! ```

pub mod backend;
pub mod engine;
pub mod error;
pub mod lang;
pub mod prediction;
pub mod socket_server;

// Re-export commonly used types
pub use backend::{BackendKind, DetectionBackend, Options};
pub use error::{LangDetectError, Result};
pub use lang::Lang;
pub use prediction::{Prediction, UNKNOWN_CONFIDENCE};
pub use socket_server::{BackendRegistry, Dispatcher};
