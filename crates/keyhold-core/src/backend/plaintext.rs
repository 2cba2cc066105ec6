//! Plaintext JSON file backend
//!
//! Last-resort store for hosts without a native credential service. Passwords
//! are written unencrypted; the file is restricted to its owner on unix.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::traits::{score, DeleteFailure, KeyringBackend, KeyringError, KeyringResult};
use crate::logging::file_logger as log;

const MODULE: &str = "PlaintextFileKeyring";

/// File name used inside the storage directory
pub const PASSWORD_FILE: &str = "keyring_pass.json";

/// On-disk layout: service -> username -> password
#[derive(Debug, Default, Serialize, Deserialize)]
struct PasswordFile {
    #[serde(default)]
    services: BTreeMap<String, BTreeMap<String, String>>,
}

/// Backend storing passwords in a JSON file
pub struct PlaintextFileKeyring {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl PlaintextFileKeyring {
    pub const NAME: &'static str = "keyhold.plaintext.PlaintextFile";

    /// Store under the platform data directory (`<data_dir>/keyhold`)
    pub fn new() -> Self {
        let dir = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyhold");
        Self::in_dir(dir)
    }

    /// Store under an explicit directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(PASSWORD_FILE),
            lock: Mutex::new(()),
        }
    }

    /// Path of the password file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<PasswordFile, String> {
        if !self.path.exists() {
            return Ok(PasswordFile::default());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;
        if content.trim().is_empty() {
            return Ok(PasswordFile::default());
        }
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", self.path.display(), e))
    }

    fn save(&self, file: &PasswordFile) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        let bytes = serde_json::to_vec_pretty(file).map_err(|e| format!("Failed to serialize passwords: {}", e))?;

        let tmp = self.path.with_extension("json.tmp");
        write_private(&tmp, &bytes).map_err(|e| format!("Failed to write {}: {}", tmp.display(), e))?;
        fs::rename(&tmp, &self.path).map_err(|e| format!("Failed to replace {}: {}", self.path.display(), e))
    }
}

/// Write `bytes` to `path`, readable by the owner only from the moment it exists
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // A leftover temp file keeps its old mode
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(bytes)?;
    file.sync_all()
}

impl Default for PlaintextFileKeyring {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlaintextFileKeyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaintextFileKeyring").field("path", &self.path).finish()
    }
}

impl KeyringBackend for PlaintextFileKeyring {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Unencrypted JSON file (last resort)"
    }

    fn get_password(&self, service: &str, username: &str) -> KeyringResult<Option<String>> {
        let _guard = self.lock.lock();
        let file = self.load().map_err(KeyringError::Backend)?;
        Ok(file.services.get(service).and_then(|users| users.get(username)).cloned())
    }

    fn set_password(&self, service: &str, username: &str, password: &str) -> KeyringResult<()> {
        let _guard = self.lock.lock();
        let mut file = self.load().map_err(KeyringError::PasswordSet)?;
        let users = file.services.entry(service.to_string()).or_default();
        if users.get(username).map(String::as_str) == Some(password) {
            return Ok(());
        }
        users.insert(username.to_string(), password.to_string());
        self.save(&file).map_err(|e| {
            log::error(MODULE, &e);
            KeyringError::PasswordSet(e)
        })
    }

    fn delete_password(&self, service: &str, username: &str) -> KeyringResult<()> {
        let _guard = self.lock.lock();
        let mut file = self
            .load()
            .map_err(|e| KeyringError::PasswordDelete(DeleteFailure::Backend(e)))?;

        let users = file.services.get_mut(service).ok_or_else(KeyringError::no_entry)?;
        users.remove(username).ok_or_else(KeyringError::no_entry)?;
        if users.is_empty() {
            file.services.remove(service);
        }

        self.save(&file).map_err(|e| {
            log::error(MODULE, &e);
            KeyringError::PasswordDelete(DeleteFailure::Backend(e))
        })
    }

    fn viable_score(&self) -> i32 {
        score::LAST_RESORT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_plaintext_roundtrip() {
        let dir = tempdir().unwrap();
        let backend = PlaintextFileKeyring::in_dir(dir.path());

        assert_eq!(backend.get_password("svc", "user").unwrap(), None);
        backend.set_password("svc", "user", "p@ss").unwrap();
        assert_eq!(backend.get_password("svc", "user").unwrap(), Some("p@ss".to_string()));
        assert!(backend.path().exists());

        backend.delete_password("svc", "user").unwrap();
        assert_eq!(backend.get_password("svc", "user").unwrap(), None);
    }

    #[test]
    fn test_plaintext_persists_across_instances() {
        let dir = tempdir().unwrap();
        PlaintextFileKeyring::in_dir(dir.path())
            .set_password("svc", "user", "kept")
            .unwrap();

        let reopened = PlaintextFileKeyring::in_dir(dir.path());
        assert_eq!(reopened.get_password("svc", "user").unwrap(), Some("kept".to_string()));
    }

    #[test]
    fn test_plaintext_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let backend = PlaintextFileKeyring::in_dir(&nested);
        backend.set_password("svc", "user", "x").unwrap();
        assert!(nested.join(PASSWORD_FILE).exists());
    }

    #[test]
    fn test_plaintext_delete_missing() {
        let dir = tempdir().unwrap();
        let backend = PlaintextFileKeyring::in_dir(dir.path());
        assert!(backend.delete_password("svc", "user").unwrap_err().is_no_entry());

        backend.set_password("svc", "other", "x").unwrap();
        assert!(backend.delete_password("svc", "user").unwrap_err().is_no_entry());
    }

    #[test]
    fn test_plaintext_corrupt_file() {
        let dir = tempdir().unwrap();
        let backend = PlaintextFileKeyring::in_dir(dir.path());
        fs::write(backend.path(), "{ not json").unwrap();

        assert!(matches!(
            backend.get_password("svc", "user"),
            Err(KeyringError::Backend(_))
        ));
        assert!(matches!(
            backend.set_password("svc", "user", "x"),
            Err(KeyringError::PasswordSet(_))
        ));
        assert!(matches!(
            backend.delete_password("svc", "user"),
            Err(KeyringError::PasswordDelete(DeleteFailure::Backend(_)))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_plaintext_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let backend = PlaintextFileKeyring::in_dir(dir.path());
        backend.set_password("svc", "user", "x").unwrap();
        let mode = fs::metadata(backend.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_plaintext_stale_temp_file_is_restricted() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let backend = PlaintextFileKeyring::in_dir(dir.path());
        let tmp = backend.path().with_extension("json.tmp");
        fs::write(&tmp, "stale").unwrap();
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o644)).unwrap();

        backend.set_password("svc", "user", "x").unwrap();
        let mode = fs::metadata(backend.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!tmp.exists());
    }

    #[test]
    fn test_plaintext_same_password_is_not_rewritten() {
        let dir = tempdir().unwrap();
        let backend = PlaintextFileKeyring::in_dir(dir.path());
        backend.set_password("svc", "user", "same").unwrap();

        // Compact form differs from what a save would write
        let compact = r#"{"services":{"svc":{"user":"same"}}}"#;
        fs::write(backend.path(), compact).unwrap();

        backend.set_password("svc", "user", "same").unwrap();
        assert_eq!(fs::read_to_string(backend.path()).unwrap(), compact);
        assert_eq!(backend.get_password("svc", "user").unwrap(), Some("same".to_string()));
    }

    #[test]
    fn test_plaintext_score() {
        assert_eq!(PlaintextFileKeyring::new().viable_score(), score::LAST_RESORT);
    }
}
