//! Plug-in table for backends that are instantiated on demand
//!
//! Configuration can name a backend that isn't registered up front. Rather
//! than loading code at runtime, hosts register a factory under the backend's
//! qualified name; the registry runs it when that name is first resolved.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backend::{KeyringBackend, KeyringResult};

/// Factory function type for creating plug-in backends
pub type PluginFactory = Box<dyn Fn(&PluginContext) -> KeyringResult<Arc<dyn KeyringBackend>> + Send + Sync>;

/// What a factory receives when it is run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginContext {
    /// Directory given by `keyring-path`, already checked to exist
    pub search_path: Option<PathBuf>,
}

impl PluginContext {
    pub fn new(search_path: Option<&Path>) -> Self {
        Self {
            search_path: search_path.map(Path::to_path_buf),
        }
    }
}

/// Definition of a registered plug-in
pub struct PluginDefinition {
    /// Qualified name the plug-in is resolved by
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: PluginFactory,
}

impl std::fmt::Debug for PluginDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// A `(directory, qualified name)` pair to load at initialization time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSource {
    pub name: String,
    pub path: Option<PathBuf>,
}

impl PluginSource {
    pub fn new(name: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self { name: name.into(), path }
    }
}
