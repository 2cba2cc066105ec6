//! Core traits and types for keyring backends

use thiserror::Error;

/// Viability score conventions
///
/// Negative scores are never selected automatically. Zero is a last resort:
/// it is only picked when no backend reports a positive score. Higher is better.
pub mod score {
    /// The backend cannot run on this host
    pub const UNSUPPORTED: i32 = -1;
    /// Usable, but only when nothing better exists
    pub const LAST_RESORT: i32 = 0;
    /// A native, persistent store is reachable
    pub const PREFERRED: i32 = 5;

    /// Whether a score allows automatic selection
    pub fn is_viable(score: i32) -> bool {
        score >= LAST_RESORT
    }
}

/// Why a delete failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeleteFailure {
    #[error("no entry stored for this key")]
    NoEntry,

    #[error("{0}")]
    Backend(String),
}

/// Errors surfaced by backends, the registry and the facade
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyringError {
    /// A backend name could not be resolved
    #[error("Keyring backend not found: {0}")]
    NotFound(String),

    /// An explicitly configured backend could not be loaded
    #[error("Failed to initialize keyring backend: {0}")]
    Init(String),

    #[error("Failed to set password: {0}")]
    PasswordSet(String),

    #[error("Failed to delete password: {0}")]
    PasswordDelete(DeleteFailure),

    /// Raised by the fail sentinel when no backend is viable
    #[error("No recommended keyring backend is available on this host")]
    NoKeyring,

    /// The underlying store could not be reached
    #[error("Keyring backend error: {0}")]
    Backend(String),
}

impl KeyringError {
    /// Shorthand for a delete of a key that was never stored
    pub fn no_entry() -> Self {
        KeyringError::PasswordDelete(DeleteFailure::NoEntry)
    }

    /// Whether this error reports a missing entry on delete
    pub fn is_no_entry(&self) -> bool {
        matches!(self, KeyringError::PasswordDelete(DeleteFailure::NoEntry))
    }
}

pub type KeyringResult<T> = Result<T, KeyringError>;

/// Capability protocol every storage backend implements
///
/// Implementations can be:
/// - The OS credential store (`KeychainKeyring`)
/// - A plaintext JSON file (`PlaintextFileKeyring`)
/// - Read-only environment variables (`EnvKeyring`)
/// - In-memory for testing (`MemoryKeyring`)
/// - Composed from other backends (`ChainKeyring`)
///
/// # Example
///
/// ```
/// use keyhold_core::backend::{KeyringBackend, MemoryKeyring};
///
/// let backend = MemoryKeyring::new();
/// backend.set_password("svc", "alice", "hunter2").unwrap();
/// assert_eq!(backend.get_password("svc", "alice").unwrap(), Some("hunter2".to_string()));
/// ```
pub trait KeyringBackend: Send + Sync {
    /// Qualified name, e.g. `keyhold.keychain.Keychain`
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str {
        ""
    }

    /// Retrieve the password for `(service, username)`
    ///
    /// A missing entry is `Ok(None)`, never an error.
    fn get_password(&self, service: &str, username: &str) -> KeyringResult<Option<String>>;

    /// Store or overwrite the password for `(service, username)`
    fn set_password(&self, service: &str, username: &str, password: &str) -> KeyringResult<()>;

    /// Remove the password for `(service, username)`
    ///
    /// Fails with `PasswordDelete(NoEntry)` when nothing is stored.
    fn delete_password(&self, service: &str, username: &str) -> KeyringResult<()>;

    /// How suitable this backend is on the current host
    ///
    /// Called on every automatic selection pass, so it must stay cheap and
    /// free of side effects. Report a negative score instead of panicking.
    fn viable_score(&self) -> i32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_viability() {
        assert!(!score::is_viable(score::UNSUPPORTED));
        assert!(score::is_viable(score::LAST_RESORT));
        assert!(score::is_viable(score::PREFERRED));
        assert!(!score::is_viable(-100));
    }

    #[test]
    fn test_delete_error_detail() {
        let missing = KeyringError::no_entry();
        assert!(missing.is_no_entry());
        assert_eq!(missing.to_string(), "Failed to delete password: no entry stored for this key");

        let io = KeyringError::PasswordDelete(DeleteFailure::Backend("disk full".into()));
        assert!(!io.is_no_entry());
        assert!(io.to_string().contains("disk full"));
    }
}
