//! Backend descriptors

use std::sync::Arc;

use crate::backend::KeyringBackend;

/// Where a registered backend came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOrigin {
    /// Shipped with this crate or registered directly by the host
    BuiltIn,
    /// Instantiated from the plug-in table
    Plugin,
}

/// Immutable identity of a registered backend
///
/// Cloning is cheap: the backend itself is shared.
#[derive(Clone)]
pub struct BackendDescriptor {
    name: String,
    description: String,
    origin: BackendOrigin,
    backend: Arc<dyn KeyringBackend>,
}

impl BackendDescriptor {
    /// Describe a backend under its own qualified name
    pub fn new(backend: Arc<dyn KeyringBackend>) -> Self {
        let name = backend.name().to_string();
        Self::named(name, backend)
    }

    /// Describe a backend under an explicit qualified name
    pub fn named(name: impl Into<String>, backend: Arc<dyn KeyringBackend>) -> Self {
        Self {
            name: name.into(),
            description: backend.description().to_string(),
            origin: BackendOrigin::BuiltIn,
            backend,
        }
    }

    pub(crate) fn with_origin(mut self, origin: BackendOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn origin(&self) -> BackendOrigin {
        self.origin
    }

    pub fn backend(&self) -> &Arc<dyn KeyringBackend> {
        &self.backend
    }

    /// Ask the backend for its current viability score
    pub fn score(&self) -> i32 {
        self.backend.viable_score()
    }
}

impl std::fmt::Debug for BackendDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("origin", &self.origin)
            .finish()
    }
}
