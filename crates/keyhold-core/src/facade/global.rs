//! Process-wide default facade
//!
//! Built on first access with the built-in backends and the default config
//! search. Hosts that need isolation construct their own `Keyring` instead.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::binding::Binding;
use super::keyring::Keyring;
use crate::backend::{KeyringBackend, KeyringResult};
use crate::config::{ConfigResult, KeyringConfig};

static DEFAULT_KEYRING: Lazy<Keyring> = Lazy::new(Keyring::new);

/// The process-wide facade
pub fn default_keyring() -> &'static Keyring {
    &DEFAULT_KEYRING
}

/// Get a password through the process-wide facade
///
/// # Example
///
/// ```no_run
/// let password = keyhold_core::get_password("my-app", "alice").unwrap();
/// ```
pub fn get_password(service: &str, username: &str) -> KeyringResult<Option<String>> {
    DEFAULT_KEYRING.get_password(service, username)
}

pub fn set_password(service: &str, username: &str, password: &str) -> KeyringResult<()> {
    DEFAULT_KEYRING.set_password(service, username, password)
}

pub fn delete_password(service: &str, username: &str) -> KeyringResult<()> {
    DEFAULT_KEYRING.delete_password(service, username)
}

pub fn set_keyring(backend: Arc<dyn KeyringBackend>) {
    DEFAULT_KEYRING.set_keyring(backend)
}

pub fn get_keyring() -> KeyringResult<Arc<dyn KeyringBackend>> {
    DEFAULT_KEYRING.get_keyring()
}

pub fn init_backend() -> KeyringResult<Binding> {
    DEFAULT_KEYRING.init_backend()
}

pub fn load_config() -> ConfigResult<Option<KeyringConfig>> {
    DEFAULT_KEYRING.load_config()
}
