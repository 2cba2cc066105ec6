//! Chained keyring backend with fallback behavior

use std::sync::Arc;

use super::traits::{score, DeleteFailure, KeyringBackend, KeyringError, KeyringResult};
use crate::logging::file_logger as log;

const MODULE: &str = "ChainKeyring";

/// A backend that chains several backends together
///
/// Reads try each viable member in order and return the first hit. Writes go
/// to the designated write member (default: first). Deletes remove the entry
/// from every viable member that has it.
///
/// # Example
///
/// ```
/// use keyhold_core::backend::{ChainKeyring, KeyringBackend, MemoryKeyring};
/// use std::sync::Arc;
///
/// let primary = Arc::new(MemoryKeyring::with_score(1));
/// let fallback = Arc::new(MemoryKeyring::with_score(0));
/// fallback.set_password("svc", "user", "old").unwrap();
///
/// let chain = ChainKeyring::new(vec![primary, fallback]).unwrap();
/// assert_eq!(chain.get_password("svc", "user").unwrap(), Some("old".to_string()));
/// ```
pub struct ChainKeyring {
    members: Vec<Arc<dyn KeyringBackend>>,
    write_index: usize,
}

impl ChainKeyring {
    pub const NAME: &'static str = "keyhold.chain.Chain";

    /// Create a chain writing to the first member
    pub fn new(members: Vec<Arc<dyn KeyringBackend>>) -> KeyringResult<Self> {
        Self::with_write_backend(members, 0)
    }

    /// Create a chain writing to `members[write_index]`
    pub fn with_write_backend(members: Vec<Arc<dyn KeyringBackend>>, write_index: usize) -> KeyringResult<Self> {
        if members.is_empty() {
            return Err(KeyringError::Init("chain requires at least one backend".to_string()));
        }
        if write_index >= members.len() {
            return Err(KeyringError::Init(format!(
                "chain write index {} out of bounds for {} backends",
                write_index,
                members.len()
            )));
        }
        Ok(Self { members, write_index })
    }

    pub fn members(&self) -> &[Arc<dyn KeyringBackend>] {
        &self.members
    }

    pub fn write_backend(&self) -> &Arc<dyn KeyringBackend> {
        &self.members[self.write_index]
    }

    fn viable_members(&self) -> impl Iterator<Item = &Arc<dyn KeyringBackend>> {
        self.members.iter().filter(|m| score::is_viable(m.viable_score()))
    }
}

impl KeyringBackend for ChainKeyring {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Reads through several backends in order"
    }

    fn get_password(&self, service: &str, username: &str) -> KeyringResult<Option<String>> {
        let mut answered = false;
        let mut last_error = None;
        for member in self.viable_members() {
            match member.get_password(service, username) {
                Ok(Some(password)) => return Ok(Some(password)),
                Ok(None) => answered = true,
                Err(e) => {
                    log::warn(MODULE, &format!("{} get_password() failed: {}", member.name(), e));
                    last_error = Some(e);
                }
            }
        }
        // A miss from any member is still a miss; only an all-failed chain errors
        match last_error {
            Some(e) if !answered => Err(e),
            _ => Ok(None),
        }
    }

    fn set_password(&self, service: &str, username: &str, password: &str) -> KeyringResult<()> {
        self.write_backend().set_password(service, username, password)
    }

    fn delete_password(&self, service: &str, username: &str) -> KeyringResult<()> {
        let mut deleted_any = false;
        let mut failure = None;
        for member in self.viable_members() {
            match member.delete_password(service, username) {
                Ok(()) => deleted_any = true,
                Err(e) if e.is_no_entry() => {}
                Err(e) => {
                    log::warn(MODULE, &format!("{} delete_password() failed: {}", member.name(), e));
                    failure = Some(e);
                }
            }
        }

        if deleted_any {
            return Ok(());
        }
        match failure {
            Some(KeyringError::PasswordDelete(detail)) => Err(KeyringError::PasswordDelete(detail)),
            Some(other) => Err(KeyringError::PasswordDelete(DeleteFailure::Backend(other.to_string()))),
            None => Err(KeyringError::no_entry()),
        }
    }

    fn viable_score(&self) -> i32 {
        self.members
            .iter()
            .map(|m| m.viable_score())
            .max()
            .unwrap_or(score::UNSUPPORTED)
    }
}

impl std::fmt::Debug for ChainKeyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainKeyring")
            .field("members", &self.members.iter().map(|m| m.name()).collect::<Vec<_>>())
            .field("write_index", &self.write_index)
            .finish()
    }
}
