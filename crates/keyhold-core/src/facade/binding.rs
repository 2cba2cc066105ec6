//! The active-backend binding

use std::sync::Arc;

use crate::backend::KeyringBackend;
use crate::config::ConfigSource;

/// How the active backend came to be bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Pinned at runtime through `set_keyring`
    Override { name: String },
    /// Named by `keyringrc.cfg` or `KEYHOLD_BACKEND`
    Config { name: String, source: ConfigSource },
    /// Won automatic selection
    Scored { name: String, score: i32 },
    /// Nothing was viable; every operation fails with `NoKeyring`
    FailSentinel,
}

impl Binding {
    /// Qualified name of the bound backend
    pub fn backend_name(&self) -> &str {
        match self {
            Binding::Override { name } | Binding::Config { name, .. } | Binding::Scored { name, .. } => name,
            Binding::FailSentinel => crate::backend::FailKeyring::NAME,
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, Binding::Override { .. })
    }
}

impl std::fmt::Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Override { name } => write!(f, "{} (runtime override)", name),
            Binding::Config { name, source } => write!(f, "{} (configured in {})", name, source),
            Binding::Scored { name, score } => write!(f, "{} (score {})", name, score),
            Binding::FailSentinel => write!(f, "{} (no viable backend)", self.backend_name()),
        }
    }
}

/// A bound backend together with the reason it was bound
#[derive(Clone)]
pub struct ActiveBackend {
    backend: Arc<dyn KeyringBackend>,
    binding: Binding,
}

impl ActiveBackend {
    pub fn new(backend: Arc<dyn KeyringBackend>, binding: Binding) -> Self {
        Self { backend, binding }
    }

    pub fn backend(&self) -> &Arc<dyn KeyringBackend> {
        &self.backend
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }
}

impl std::fmt::Debug for ActiveBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveBackend")
            .field("backend", &self.backend.name())
            .field("binding", &self.binding)
            .finish()
    }
}
