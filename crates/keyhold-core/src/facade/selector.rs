//! Backend resolution
//!
//! Order of precedence, first match wins:
//! 1. a runtime override (held by the facade, never reaches this module)
//! 2. the configuration record (`KEYHOLD_BACKEND`, then `keyringrc.cfg`)
//! 3. the highest viability score in the registry
//! 4. the fail sentinel

use std::path::Path;
use std::sync::Arc;

use super::binding::{ActiveBackend, Binding};
use crate::backend::{score, FailKeyring, KeyringError, KeyringResult};
use crate::config::{ConfigLoader, ConfigSource};
use crate::logging::Logger;
use crate::registry::BackendRegistry;

/// One resolution pass over a registry and a config loader
pub struct Selector<'a> {
    registry: &'a BackendRegistry,
    config: &'a ConfigLoader,
    logger: &'a dyn Logger,
}

impl<'a> Selector<'a> {
    pub fn new(registry: &'a BackendRegistry, config: &'a ConfigLoader, logger: &'a dyn Logger) -> Self {
        Self { registry, config, logger }
    }

    /// Resolve the backend to bind
    ///
    /// A configured backend that can't be resolved is an `Init` error; it never
    /// falls back to automatic selection.
    pub fn select(&self) -> KeyringResult<ActiveBackend> {
        let record = self.config.load().map_err(|e| {
            self.logger.error(&format!("[Selector] config could not be read: {}", e));
            KeyringError::Init(e.to_string())
        })?;

        if let Some(config) = record {
            if let Some(name) = config.default_keyring.as_deref() {
                return self.from_config(name, config.keyring_path.as_deref(), &config.source);
            }
            self.logger.debug(&format!(
                "[Selector] {} names no backend, using automatic selection",
                config.source
            ));
        }

        Ok(self.by_score())
    }

    /// Bind the backend named by configuration
    pub fn from_config(&self, name: &str, path: Option<&Path>, source: &ConfigSource) -> KeyringResult<ActiveBackend> {
        let descriptor = self.registry.resolve(name, path).map_err(|e| {
            self.logger.error(&format!("[Selector] configured backend '{}' from {}: {}", name, source, e));
            KeyringError::Init(format!("backend '{}' configured in {} could not be loaded: {}", name, source, e))
        })?;

        Ok(ActiveBackend::new(
            descriptor.backend().clone(),
            Binding::Config {
                name: descriptor.name().to_string(),
                source: source.clone(),
            },
        ))
    }

    /// Bind the best-scoring backend, or the fail sentinel
    pub fn by_score(&self) -> ActiveBackend {
        // Each backend is asked exactly once per pass
        let scored = self.registry.scored();
        for (descriptor, value) in &scored {
            self.logger.debug(&format!("[Selector] candidate {} scored {}", descriptor.name(), value));
        }

        match BackendRegistry::pick_best(scored) {
            Some((descriptor, value)) if score::is_viable(value) => ActiveBackend::new(
                descriptor.backend().clone(),
                Binding::Scored {
                    name: descriptor.name().to_string(),
                    score: value,
                },
            ),
            _ => {
                self.logger.warn("[Selector] no viable keyring backend, binding fail sentinel");
                ActiveBackend::new(Arc::new(FailKeyring::new()), Binding::FailSentinel)
            }
        }
    }
}
