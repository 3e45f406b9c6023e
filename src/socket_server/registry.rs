//! Backend registry
//!
//! Maps selector tokens to backend instances. The set of backends is fixed
//! once the daemon starts; all connections share one registry and only
//! read from it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::{DetectionBackend, ModelBackend, RegexpBackend};
use crate::engine::{GrammarModel, ModelConfig, RegexpRules};
use crate::error::{LangDetectError, Result};

/// Selector-to-backend lookup with a default for unknown selectors
pub struct BackendRegistry {
    backends: HashMap<String, Arc<dyn DetectionBackend>>,
    default: Arc<dyn DetectionBackend>,
}

impl BackendRegistry {
    /// Create a registry whose default is `default`
    ///
    /// The default is also registered under its own name.
    pub fn new(default: Arc<dyn DetectionBackend>) -> Self {
        let mut backends = HashMap::new();
        backends.insert(default.name().to_string(), Arc::clone(&default));
        Self { backends, default }
    }

    /// Build the registry with both built-in backends
    ///
    /// Grammars are loaded and rules compiled here, once per process.
    pub fn standard(model_config: ModelConfig, default_selector: &str) -> Result<Self> {
        let model = Arc::new(GrammarModel::new(model_config)?);
        let rules = Arc::new(RegexpRules::new()?);

        let mut registry = Self::new(Arc::new(ModelBackend::new(model)));
        registry.register(Arc::new(RegexpBackend::new(rules)));
        registry.set_default(default_selector)?;
        Ok(registry)
    }

    /// Add a backend under its own name, replacing any previous one
    pub fn register(&mut self, backend: Arc<dyn DetectionBackend>) -> &mut Self {
        let name = backend.name().to_string();
        if self.default.name() == name {
            self.default = Arc::clone(&backend);
        }
        self.backends.insert(name, backend);
        self
    }

    /// Make the backend registered as `selector` the default
    pub fn set_default(&mut self, selector: &str) -> Result<()> {
        let backend = self
            .backends
            .get(selector)
            .ok_or_else(|| LangDetectError::UnknownDefaultBackend {
                selector: selector.to_string(),
            })?;
        self.default = Arc::clone(backend);
        Ok(())
    }

    /// Backend for `selector`; unknown or absent selectors get the default
    pub fn resolve(&self, selector: Option<&str>) -> Arc<dyn DetectionBackend> {
        match selector.and_then(|s| self.backends.get(s)) {
            Some(backend) => Arc::clone(backend),
            None => {
                if let Some(s) = selector {
                    tracing::debug!(
                        "Unknown backend selector {:?}, using {}",
                        s,
                        self.default.name()
                    );
                }
                Arc::clone(&self.default)
            }
        }
    }

    pub fn default_backend(&self) -> &str {
        self.default.name()
    }

    /// Registered selectors, sorted
    pub fn selectors(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
