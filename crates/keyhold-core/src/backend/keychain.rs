//! System keychain backend
//!
//! Uses the OS credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)

use keyring::Entry;

use super::traits::{score, DeleteFailure, KeyringBackend, KeyringError, KeyringResult};
use crate::logging::file_logger as log;

const MODULE: &str = "KeychainKeyring";

/// Username used when probing whether the keychain can be reached
const PROBE_USERNAME: &str = "__keyhold_availability_check__";

/// Backend backed by the operating system's credential store
///
/// Each `(service, username)` pair maps to one native credential entry.
///
/// # Example
///
/// ```no_run
/// use keyhold_core::backend::{KeychainKeyring, KeyringBackend};
///
/// let backend = KeychainKeyring::new();
/// backend.set_password("my-app", "alice", "s3cret").unwrap();
/// assert!(backend.get_password("my-app", "alice").unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct KeychainKeyring {
    _private: (),
}

impl KeychainKeyring {
    pub const NAME: &'static str = "keyhold.keychain.Keychain";

    pub fn new() -> Self {
        Self { _private: () }
    }

    fn entry(&self, service: &str, username: &str) -> KeyringResult<Entry> {
        Entry::new(service, username)
            .map_err(|e| KeyringError::Backend(format!("Failed to create keychain entry: {}", e)))
    }
}

/// Whether the platform has a credential store worth probing
#[cfg(target_os = "linux")]
fn platform_supported() -> bool {
    // Secret Service lives on the session bus; headless hosts have none
    std::env::var_os("DBUS_SESSION_BUS_ADDRESS").is_some()
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn platform_supported() -> bool {
    true
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_supported() -> bool {
    false
}

impl KeyringBackend for KeychainKeyring {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "System keychain (macOS Keychain, Windows Credential Manager, Linux Secret Service)"
    }

    fn get_password(&self, service: &str, username: &str) -> KeyringResult<Option<String>> {
        log::debug(MODULE, &format!("get_password() service='{}', username='{}'", service, username));
        let entry = self.entry(service, username)?;
        match entry.get_password() {
            Ok(password) => {
                log::debug(MODULE, &format!("get_password() found, len={}", password.len()));
                Ok(Some(password))
            }
            Err(keyring::Error::NoEntry) => {
                log::debug(MODULE, "get_password() NoEntry");
                Ok(None)
            }
            Err(e) => {
                log::warn(MODULE, &format!("get_password() error: {:?}", e));
                Err(KeyringError::Backend(format!("Failed to read from keychain: {}", e)))
            }
        }
    }

    fn set_password(&self, service: &str, username: &str, password: &str) -> KeyringResult<()> {
        log::info(MODULE, &format!("set_password() service='{}', username='{}'", service, username));

        let entry = self
            .entry(service, username)
            .map_err(|e| KeyringError::PasswordSet(e.to_string()))?;
        entry.set_password(password).map_err(|e| {
            log::error(MODULE, &format!("set_password() failed: {:?}", e));
            KeyringError::PasswordSet(format!("Failed to store in keychain: {}", e))
        })?;

        // Read back through a fresh entry so a cached handle can't hide a failed write
        let verify = self
            .entry(service, username)
            .map_err(|e| KeyringError::PasswordSet(e.to_string()))?;
        match verify.get_password() {
            Ok(stored) if stored == password => Ok(()),
            Ok(stored) => {
                log::error(
                    MODULE,
                    &format!("verification mismatch: expected len={}, got len={}", password.len(), stored.len()),
                );
                Err(KeyringError::PasswordSet("keychain verification failed: value mismatch".to_string()))
            }
            Err(e) => {
                log::error(MODULE, &format!("verification read failed: {:?}", e));
                Err(KeyringError::PasswordSet(format!("keychain verification failed: {}", e)))
            }
        }
    }

    fn delete_password(&self, service: &str, username: &str) -> KeyringResult<()> {
        let entry = self
            .entry(service, username)
            .map_err(|e| KeyringError::PasswordDelete(DeleteFailure::Backend(e.to_string())))?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Err(KeyringError::no_entry()),
            Err(e) => Err(KeyringError::PasswordDelete(DeleteFailure::Backend(format!(
                "Failed to delete from keychain: {}",
                e
            )))),
        }
    }

    fn viable_score(&self) -> i32 {
        if !platform_supported() {
            log::debug(MODULE, "viable_score() platform unsupported");
            return score::UNSUPPORTED;
        }
        let entry = match Entry::new("keyhold", PROBE_USERNAME) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn(MODULE, &format!("viable_score() probe entry failed: {:?}", e));
                return score::UNSUPPORTED;
            }
        };
        // A read reaches the store without writing anything
        match entry.get_password() {
            Ok(_)
            | Err(keyring::Error::NoEntry)
            | Err(keyring::Error::Ambiguous(_))
            | Err(keyring::Error::BadEncoding(_)) => score::PREFERRED,
            Err(e) => {
                log::warn(MODULE, &format!("viable_score() store unreachable: {:?}", e));
                score::UNSUPPORTED
            }
        }
    }
}

/// Session bus address that no daemon listens on
#[cfg(all(test, target_os = "linux"))]
pub(crate) const DEAD_SESSION_BUS: &str = "unix:path=/nonexistent/keyhold-test-bus";

#[cfg(test)]
mod tests {
    use super::*;

    // These tests need a running keychain service and are skipped on CI

    #[test]
    #[ignore] // Requires system keychain
    fn test_set_get_delete() {
        let backend = KeychainKeyring::new();
        let _ = backend.delete_password("keyhold-test", "roundtrip");

        backend.set_password("keyhold-test", "roundtrip", "value").unwrap();
        assert_eq!(
            backend.get_password("keyhold-test", "roundtrip").unwrap(),
            Some("value".to_string())
        );

        backend.delete_password("keyhold-test", "roundtrip").unwrap();
        assert_eq!(backend.get_password("keyhold-test", "roundtrip").unwrap(), None);
        assert!(backend.delete_password("keyhold-test", "roundtrip").unwrap_err().is_no_entry());
    }

    #[test]
    fn test_name() {
        assert_eq!(KeychainKeyring::new().name(), "keyhold.keychain.Keychain");
    }

    #[test]
    fn test_score_is_known_value() {
        let value = KeychainKeyring::new().viable_score();
        assert!(value == score::PREFERRED || value == score::UNSUPPORTED);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_unreachable_session_bus_is_unsupported() {
        std::env::set_var("DBUS_SESSION_BUS_ADDRESS", DEAD_SESSION_BUS);
        assert_eq!(KeychainKeyring::new().viable_score(), score::UNSUPPORTED);
    }
}
