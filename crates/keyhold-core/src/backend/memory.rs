//! In-memory keyring backend

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::{score, KeyringBackend, KeyringError, KeyringResult};

type Key = (String, String);

/// In-memory backend for testing and ephemeral use
///
/// Passwords are lost when the backend is dropped, so by default it reports
/// itself unsupported and is only bound when chosen by name or override.
/// `with_score` lets tests stand it in for any host situation.
///
/// # Example
///
/// ```
/// use keyhold_core::backend::{KeyringBackend, MemoryKeyring};
///
/// let backend = MemoryKeyring::with_score(3);
/// assert_eq!(backend.viable_score(), 3);
/// ```
#[derive(Debug)]
pub struct MemoryKeyring {
    name: String,
    score: i32,
    passwords: RwLock<HashMap<Key, String>>,
}

impl MemoryKeyring {
    pub const NAME: &'static str = "keyhold.memory.Memory";

    /// Create an empty memory backend that is never selected automatically
    pub fn new() -> Self {
        Self::with_score(score::UNSUPPORTED)
    }

    /// Create an empty memory backend reporting a fixed viability score
    pub fn with_score(score: i32) -> Self {
        Self {
            name: Self::NAME.to_string(),
            score,
            passwords: RwLock::new(HashMap::new()),
        }
    }

    /// Give this instance a different qualified name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.passwords.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored entry
    pub fn clear(&self) {
        self.passwords.write().clear();
    }
}

impl Default for MemoryKeyring {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringBackend for MemoryKeyring {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "In-memory storage for testing"
    }

    fn get_password(&self, service: &str, username: &str) -> KeyringResult<Option<String>> {
        let passwords = self.passwords.read();
        Ok(passwords.get(&(service.to_string(), username.to_string())).cloned())
    }

    fn set_password(&self, service: &str, username: &str, password: &str) -> KeyringResult<()> {
        let mut passwords = self.passwords.write();
        passwords.insert((service.to_string(), username.to_string()), password.to_string());
        Ok(())
    }

    fn delete_password(&self, service: &str, username: &str) -> KeyringResult<()> {
        let mut passwords = self.passwords.write();
        passwords
            .remove(&(service.to_string(), username.to_string()))
            .map(|_| ())
            .ok_or_else(KeyringError::no_entry)
    }

    fn viable_score(&self) -> i32 {
        self.score
    }
}
