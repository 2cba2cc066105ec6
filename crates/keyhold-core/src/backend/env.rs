//! Environment variable keyring backend

use std::env;

use super::traits::{score, DeleteFailure, KeyringBackend, KeyringError, KeyringResult};

/// Prefix of every variable this backend reads
pub const ENV_PREFIX: &str = "KEYHOLD";

/// Read-only backend that reads passwords from environment variables
///
/// `(service, username)` maps to `KEYHOLD_<SERVICE>_<USERNAME>`, upper-cased,
/// with every character outside `[A-Z0-9]` replaced by `_`. Useful for CI
/// where secrets arrive through the environment.
///
/// The store can't be written, so it never wins automatic selection; bind it
/// by name or through `keyringrc.cfg`.
///
/// # Example
///
/// ```
/// use keyhold_core::backend::EnvKeyring;
///
/// assert_eq!(EnvKeyring::var_name("my-app", "alice@example.com"), "KEYHOLD_MY_APP_ALICE_EXAMPLE_COM");
/// ```
#[derive(Debug, Default)]
pub struct EnvKeyring {
    _private: (),
}

impl EnvKeyring {
    pub const NAME: &'static str = "keyhold.env.Environment";

    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Environment variable consulted for a `(service, username)` pair
    pub fn var_name(service: &str, username: &str) -> String {
        let sanitize = |s: &str| -> String {
            s.chars()
                .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
                .collect()
        };
        format!("{}_{}_{}", ENV_PREFIX, sanitize(service), sanitize(username))
    }
}

impl KeyringBackend for EnvKeyring {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Read passwords from KEYHOLD_<SERVICE>_<USERNAME> environment variables"
    }

    fn get_password(&self, service: &str, username: &str) -> KeyringResult<Option<String>> {
        match env::var(Self::var_name(service, username)) {
            Ok(value) if !value.is_empty() => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    fn set_password(&self, _service: &str, _username: &str, _password: &str) -> KeyringResult<()> {
        Err(KeyringError::PasswordSet("environment backend is read-only".to_string()))
    }

    fn delete_password(&self, service: &str, username: &str) -> KeyringResult<()> {
        if self.get_password(service, username)?.is_none() {
            return Err(KeyringError::no_entry());
        }
        Err(KeyringError::PasswordDelete(DeleteFailure::Backend(
            "environment backend is read-only".to_string(),
        )))
    }

    fn viable_score(&self) -> i32 {
        score::UNSUPPORTED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_name() {
        assert_eq!(EnvKeyring::var_name("svc", "user"), "KEYHOLD_SVC_USER");
        assert_eq!(EnvKeyring::var_name("a.b", "c d"), "KEYHOLD_A_B_C_D");
    }

    #[test]
    fn test_env_get() {
        let backend = EnvKeyring::new();
        env::set_var("KEYHOLD_ENVTEST_READER", "from-env");
        assert_eq!(
            backend.get_password("envtest", "reader").unwrap(),
            Some("from-env".to_string())
        );
        env::remove_var("KEYHOLD_ENVTEST_READER");
        assert_eq!(backend.get_password("envtest", "reader").unwrap(), None);
    }

    #[test]
    fn test_env_empty_value_is_absent() {
        let backend = EnvKeyring::new();
        env::set_var("KEYHOLD_ENVTEST_EMPTY", "");
        assert_eq!(backend.get_password("envtest", "empty").unwrap(), None);
        env::remove_var("KEYHOLD_ENVTEST_EMPTY");
    }

    #[test]
    fn test_env_is_read_only() {
        let backend = EnvKeyring::new();
        assert!(matches!(
            backend.set_password("envtest", "writer", "x"),
            Err(KeyringError::PasswordSet(_))
        ));

        assert!(backend.delete_password("envtest", "missing").unwrap_err().is_no_entry());

        env::set_var("KEYHOLD_ENVTEST_PRESENT", "x");
        let err = backend.delete_password("envtest", "present").unwrap_err();
        assert!(matches!(err, KeyringError::PasswordDelete(DeleteFailure::Backend(_))));
        env::remove_var("KEYHOLD_ENVTEST_PRESENT");
    }

    #[test]
    fn test_env_never_auto_selected() {
        assert!(!score::is_viable(EnvKeyring::new().viable_score()));
    }
}
