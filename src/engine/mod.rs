//! Detection engines
//!
//! Engines compute language guesses. They know nothing about the socket
//! protocol; the adapters in [`crate::backend`] put them behind one
//! contract.
//!
//! - [`model`]: grammar-fit model, ranked guesses with confidences
//! - [`rules`]: weighted regexp rules, a single best guess or none

pub mod model;
pub mod rules;

pub use model::{GrammarModel, ModelConfig};
pub use rules::RegexpRules;
