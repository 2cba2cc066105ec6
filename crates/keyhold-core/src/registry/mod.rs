//! Backend registry: the known set of backends and their ranking
//!
//! The registry is an owned value rather than process-global state, so each
//! `Keyring` facade (and each test) can hold its own.

mod descriptor;
mod plugin;

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::backend::{
    EnvKeyring, KeychainKeyring, KeyringBackend, KeyringError, KeyringResult, MemoryKeyring,
    PlaintextFileKeyring,
};
use crate::logging::file_logger as log;

pub use descriptor::{BackendDescriptor, BackendOrigin};
pub use plugin::{PluginContext, PluginDefinition, PluginFactory, PluginSource};

const MODULE: &str = "BackendRegistry";

/// Ordered set of known backends plus the plug-in table
///
/// Registration order is significant: it breaks ties between equal scores.
///
/// # Example
///
/// ```
/// use keyhold_core::backend::MemoryKeyring;
/// use keyhold_core::registry::BackendRegistry;
/// use std::sync::Arc;
///
/// let registry = BackendRegistry::new();
/// registry.register_backend(Arc::new(MemoryKeyring::with_score(5).named("demo.A")));
/// registry.register_backend(Arc::new(MemoryKeyring::with_score(1).named("demo.B")));
///
/// let (best, score) = registry.best().unwrap();
/// assert_eq!(best.name(), "demo.A");
/// assert_eq!(score, 5);
/// ```
#[derive(Default)]
pub struct BackendRegistry {
    backends: RwLock<Vec<BackendDescriptor>>,
    plugins: RwLock<Vec<Arc<PluginDefinition>>>,
}

impl BackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in backends
    ///
    /// Order: keychain, plaintext file, environment, memory.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register_backend(Arc::new(KeychainKeyring::new()));
        registry.register_backend(Arc::new(PlaintextFileKeyring::new()));
        registry.register_backend(Arc::new(EnvKeyring::new()));
        registry.register_backend(Arc::new(MemoryKeyring::new()));
        registry
    }

    /// Add a backend to the known set
    ///
    /// Returns `false` if a backend with the same qualified name is already
    /// registered; the existing entry is kept.
    pub fn register(&self, descriptor: BackendDescriptor) -> bool {
        let mut backends = self.backends.write();
        if backends.iter().any(|d| d.name() == descriptor.name()) {
            log::debug(MODULE, &format!("register() '{}' already registered", descriptor.name()));
            return false;
        }
        log::debug(MODULE, &format!("register() '{}'", descriptor.name()));
        backends.push(descriptor);
        true
    }

    /// Register a backend under its own qualified name
    pub fn register_backend(&self, backend: Arc<dyn KeyringBackend>) -> bool {
        self.register(BackendDescriptor::new(backend))
    }

    /// Remove a backend (mainly for testing)
    pub fn unregister(&self, name: &str) -> bool {
        let mut backends = self.backends.write();
        let before = backends.len();
        backends.retain(|d| d.name() != name);
        backends.len() != before
    }

    /// All registered backends in registration order
    pub fn all_backends(&self) -> Vec<BackendDescriptor> {
        self.backends.read().clone()
    }

    pub fn len(&self) -> usize {
        self.backends.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backends.read().iter().any(|d| d.name() == name)
    }

    /// Look up a registered backend by qualified name
    pub fn find_by_name(&self, name: &str) -> KeyringResult<BackendDescriptor> {
        self.backends
            .read()
            .iter()
            .find(|d| d.name() == name)
            .cloned()
            .ok_or_else(|| KeyringError::NotFound(name.to_string()))
    }

    /// Register a plug-in factory under a qualified name
    ///
    /// A later registration under the same name replaces the factory. Backends
    /// already instantiated from the old factory stay registered.
    pub fn register_plugin<F>(&self, name: &str, description: &str, factory: F)
    where
        F: Fn(&PluginContext) -> KeyringResult<Arc<dyn KeyringBackend>> + Send + Sync + 'static,
    {
        let definition = Arc::new(PluginDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory: Box::new(factory),
        });
        let mut plugins = self.plugins.write();
        plugins.retain(|p| p.name != name);
        plugins.push(definition);
    }

    /// Check if a plug-in factory is registered
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.read().iter().any(|p| p.name == name)
    }

    /// List plug-in factories as `(name, description)` pairs
    pub fn list_plugins(&self) -> Vec<(String, String)> {
        self.plugins
            .read()
            .iter()
            .map(|p| (p.name.clone(), p.description.clone()))
            .collect()
    }

    /// Instantiate a plug-in and register the result
    ///
    /// `path`, when given, must be an existing directory; it is handed to the
    /// factory as its search path. Loading a name that is already registered
    /// returns the existing descriptor without running the factory again.
    pub fn load_plugin(&self, name: &str, path: Option<&Path>) -> KeyringResult<BackendDescriptor> {
        if let Ok(existing) = self.find_by_name(name) {
            return Ok(existing);
        }
        if let Some(dir) = path {
            if !dir.is_dir() {
                return Err(KeyringError::Init(format!(
                    "keyring-path '{}' is not a directory",
                    dir.display()
                )));
            }
        }

        // Clone the definition out so the factory runs without holding the lock
        let definition = self
            .plugins
            .read()
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| KeyringError::NotFound(name.to_string()))?;

        let backend = (definition.factory)(&PluginContext::new(path))?;
        log::info(MODULE, &format!("load_plugin() instantiated '{}'", name));
        self.register(BackendDescriptor::named(name, backend).with_origin(BackendOrigin::Plugin));
        self.find_by_name(name)
    }

    /// Load several plug-ins, skipping any that fail
    ///
    /// A broken source is logged and left out; it will surface as `NotFound`
    /// if something later asks for it by name.
    pub fn load_plugins(&self, sources: &[PluginSource]) -> Vec<BackendDescriptor> {
        sources
            .iter()
            .filter_map(|source| match self.load_plugin(&source.name, source.path.as_deref()) {
                Ok(descriptor) => Some(descriptor),
                Err(e) => {
                    log::warn(MODULE, &format!("skipping plug-in '{}': {}", source.name, e));
                    None
                }
            })
            .collect()
    }

    /// Resolve a name to a backend, loading it from the plug-in table if needed
    pub fn resolve(&self, name: &str, path: Option<&Path>) -> KeyringResult<BackendDescriptor> {
        match self.find_by_name(name) {
            Ok(descriptor) => Ok(descriptor),
            Err(_) => self.load_plugin(name, path),
        }
    }

    /// Every backend with a freshly queried score, in registration order
    pub fn scored(&self) -> Vec<(BackendDescriptor, i32)> {
        self.all_backends()
            .into_iter()
            .map(|d| {
                let score = d.score();
                (d, score)
            })
            .collect()
    }

    /// The backend with the strictly highest score
    ///
    /// Ties go to the earliest registration. The winner may still have a
    /// negative score; callers decide whether that is acceptable.
    pub fn best(&self) -> Option<(BackendDescriptor, i32)> {
        Self::pick_best(self.scored())
    }

    /// Pick the winner from an already scored listing
    pub fn pick_best(scored: Vec<(BackendDescriptor, i32)>) -> Option<(BackendDescriptor, i32)> {
        let mut best: Option<(BackendDescriptor, i32)> = None;
        for (descriptor, score) in scored {
            if best.as_ref().map_or(true, |(_, top)| score > *top) {
                best = Some((descriptor, score));
            }
        }
        best
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.all_backends().iter().map(|d| d.name().to_string()).collect::<Vec<_>>())
            .field("plugins", &self.list_plugins().into_iter().map(|(n, _)| n).collect::<Vec<_>>())
            .finish()
    }
}
