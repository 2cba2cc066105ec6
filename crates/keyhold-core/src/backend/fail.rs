//! Sentinel backend bound when nothing else is viable

use super::traits::{score, KeyringBackend, KeyringError, KeyringResult};

/// Backend whose every operation fails with `NoKeyring`
///
/// Bound by automatic selection when every registered backend reports a
/// negative score, so callers get a deterministic error instead of an
/// unbound facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailKeyring;

impl FailKeyring {
    pub const NAME: &'static str = "keyhold.fail.Fail";

    pub fn new() -> Self {
        Self
    }
}

impl KeyringBackend for FailKeyring {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "No viable backend; every operation fails"
    }

    fn get_password(&self, _service: &str, _username: &str) -> KeyringResult<Option<String>> {
        Err(KeyringError::NoKeyring)
    }

    fn set_password(&self, _service: &str, _username: &str, _password: &str) -> KeyringResult<()> {
        Err(KeyringError::NoKeyring)
    }

    fn delete_password(&self, _service: &str, _username: &str) -> KeyringResult<()> {
        Err(KeyringError::NoKeyring)
    }

    fn viable_score(&self) -> i32 {
        score::UNSUPPORTED
    }
}
