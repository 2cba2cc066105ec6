//! The `Keyring` facade
//!
//! Owns the registry, the config loader and the active-backend binding. All
//! password operations go through whichever backend is bound, binding one
//! lazily on first use.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::binding::{ActiveBackend, Binding};
use super::selector::Selector;
use crate::backend::{KeyringBackend, KeyringResult};
use crate::config::{ConfigLoader, ConfigResult, KeyringConfig};
use crate::logging::{FileLogger, SharedLogger};
use crate::registry::BackendRegistry;

/// A registered backend as seen by diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendStatus {
    pub name: String,
    pub description: String,
    pub score: i32,
    /// Whether this backend is the currently bound one
    pub active: bool,
}

/// Credential facade delegating to a single active backend
///
/// Binding states: unbound, then bound by override, config, score or the fail
/// sentinel. A bound facade only changes through `init_backend`,
/// `set_keyring` or `reset`.
///
/// # Example
///
/// ```
/// use keyhold_core::backend::MemoryKeyring;
/// use keyhold_core::config::ConfigLoader;
/// use keyhold_core::registry::BackendRegistry;
/// use keyhold_core::Keyring;
/// use std::sync::Arc;
///
/// let registry = BackendRegistry::new();
/// registry.register_backend(Arc::new(MemoryKeyring::with_score(1)));
///
/// let keyring = Keyring::with_registry(Arc::new(registry))
///     .with_config(ConfigLoader::with_paths(vec![]));
/// keyring.set_password("svc", "alice", "hunter2").unwrap();
/// assert_eq!(keyring.get_password("svc", "alice").unwrap(), Some("hunter2".to_string()));
/// ```
pub struct Keyring {
    registry: Arc<BackendRegistry>,
    config: ConfigLoader,
    logger: SharedLogger,
    active: RwLock<Option<ActiveBackend>>,
    // Serializes every unbound -> bound transition
    init_lock: Mutex<()>,
}

impl Keyring {
    /// Built-in backends, default config search, file logging
    pub fn new() -> Self {
        Self::with_parts(
            Arc::new(BackendRegistry::with_builtins()),
            ConfigLoader::new(),
            Arc::new(FileLogger::default()),
        )
    }

    /// Use a specific registry with the default config search
    pub fn with_registry(registry: Arc<BackendRegistry>) -> Self {
        Self::with_parts(registry, ConfigLoader::new(), Arc::new(FileLogger::default()))
    }

    pub fn with_parts(registry: Arc<BackendRegistry>, config: ConfigLoader, logger: SharedLogger) -> Self {
        Self {
            registry,
            config,
            logger,
            active: RwLock::new(None),
            init_lock: Mutex::new(()),
        }
    }

    pub fn with_config(mut self, config: ConfigLoader) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn registry(&self) -> &Arc<BackendRegistry> {
        &self.registry
    }

    pub fn config_loader(&self) -> &ConfigLoader {
        &self.config
    }

    /// Read the configuration record without touching the binding
    pub fn load_config(&self) -> ConfigResult<Option<KeyringConfig>> {
        self.config.load()
    }

    /// Resolve and bind the active backend
    ///
    /// Keeps a runtime override if one is set. Otherwise re-reads the config
    /// and re-runs selection, replacing any previous binding. On error the
    /// previous binding is left as it was.
    pub fn init_backend(&self) -> KeyringResult<Binding> {
        let _guard = self.init_lock.lock();

        if let Some(binding) = self.binding().filter(Binding::is_override) {
            self.logger.debug(&format!("[Keyring] keeping runtime override {}", binding.backend_name()));
            return Ok(binding);
        }

        let active = self.select()?;
        let binding = active.binding().clone();
        *self.active.write() = Some(active);
        Ok(binding)
    }

    /// Pin a backend for the rest of the process (until `reset`)
    pub fn set_keyring(&self, backend: Arc<dyn KeyringBackend>) {
        let name = backend.name().to_string();
        self.bind_override(backend, name);
    }

    /// Pin a registered (or plug-in) backend by qualified name
    pub fn set_keyring_by_name(&self, name: &str) -> KeyringResult<Binding> {
        let descriptor = self.registry.resolve(name, None)?;
        Ok(self.bind_override(descriptor.backend().clone(), descriptor.name().to_string()))
    }

    fn bind_override(&self, backend: Arc<dyn KeyringBackend>, name: String) -> Binding {
        let _guard = self.init_lock.lock();
        let binding = Binding::Override { name };
        self.logger.info(&format!("[Keyring] bound {}", binding));
        *self.active.write() = Some(ActiveBackend::new(backend, binding.clone()));
        binding
    }

    /// Return to the unbound state, dropping any override
    pub fn reset(&self) {
        let _guard = self.init_lock.lock();
        *self.active.write() = None;
    }

    /// Current binding, `None` while unbound
    pub fn binding(&self) -> Option<Binding> {
        self.active.read().as_ref().map(|a| a.binding().clone())
    }

    /// The active backend, binding one first if needed
    pub fn get_keyring(&self) -> KeyringResult<Arc<dyn KeyringBackend>> {
        if let Some(active) = self.active.read().as_ref() {
            return Ok(active.backend().clone());
        }

        let _guard = self.init_lock.lock();
        // Another caller may have bound while we waited
        if let Some(active) = self.active.read().as_ref() {
            return Ok(active.backend().clone());
        }

        let active = self.select()?;
        let backend = active.backend().clone();
        *self.active.write() = Some(active);
        Ok(backend)
    }

    pub fn get_password(&self, service: &str, username: &str) -> KeyringResult<Option<String>> {
        self.get_keyring()?.get_password(service, username)
    }

    pub fn set_password(&self, service: &str, username: &str, password: &str) -> KeyringResult<()> {
        self.get_keyring()?.set_password(service, username, password)
    }

    pub fn delete_password(&self, service: &str, username: &str) -> KeyringResult<()> {
        self.get_keyring()?.delete_password(service, username)
    }

    /// Every registered backend with its current score
    pub fn backends(&self) -> Vec<BackendStatus> {
        let active = self.binding().map(|b| b.backend_name().to_string());
        self.registry
            .scored()
            .into_iter()
            .map(|(descriptor, score)| BackendStatus {
                active: active.as_deref() == Some(descriptor.name()),
                name: descriptor.name().to_string(),
                description: descriptor.description().to_string(),
                score,
            })
            .collect()
    }

    fn select(&self) -> KeyringResult<ActiveBackend> {
        let active = Selector::new(&self.registry, &self.config, self.logger.as_ref()).select()?;
        self.logger.info(&format!("[Keyring] bound {}", active.binding()));
        Ok(active)
    }
}

impl Default for Keyring {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Keyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyring")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("binding", &self.binding())
            .finish()
    }
}
