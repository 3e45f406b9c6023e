//! Langdetect Socket Server
//!
//! A WebSocket daemon that answers language-detection requests using one
//! of several interchangeable backends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 LANGDETECT SOCKET SERVER (langdetect-daemon)        │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  WebSocket Server ──► handle_connection (per client)                │
//! │    - greeting                                                       │
//! │    - one task per inbound frame ──► Dispatcher::handle              │
//! │    - single writer task per connection                              │
//! │                                                                     │
//! │  Dispatcher (Arc, shared)                                           │
//! │    decode ──► BackendRegistry::resolve ──► detect ──► encode        │
//! │                                                                     │
//! │  BackendRegistry (read-only after startup)                          │
//! │    "vscode-languagedetection"        ──► ModelBackend (default)     │
//! │    "vscode-regexp-languagedetection" ──► RegexpBackend              │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol
//!
//! See [`protocol`] for the message format.

pub mod connection;
pub mod dispatcher;
pub mod protocol;
pub mod registry;

pub use connection::{handle_connection, serve};
pub use dispatcher::Dispatcher;
pub use protocol::{decode, encode, encode_error, DetectRequest, GREETING};
pub use registry::BackendRegistry;
