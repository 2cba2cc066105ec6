//! File-based configuration loader (INI)
//!
//! Candidate files, first existing wins:
//! 1. `./keyringrc.cfg` (current working directory)
//! 2. `<config_root>/keyringrc.cfg`
//!
//! `KEYHOLD_BACKEND`, when set, takes precedence over any file.

use std::fs;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};

use super::record::{ConfigError, ConfigResult, ConfigSource, KeyringConfig};

pub const CONFIG_FILE_NAME: &str = "keyringrc.cfg";
pub const BACKEND_SECTION: &str = "backend";
pub const DEFAULT_KEYRING_KEY: &str = "default-keyring";
pub const KEYRING_PATH_KEY: &str = "keyring-path";
pub const BACKEND_ENV_VAR: &str = "KEYHOLD_BACKEND";

/// Platform config root (`~/.config/keyhold` on Linux, `~/Library/Application Support/keyhold` on macOS)
pub fn config_root() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"))
        .join("keyhold")
}

/// Locates and reads the configuration record
///
/// Loading is a pure read: nothing is cached, so a re-run of backend
/// initialization sees edits made since the last one. The default loader
/// resolves the working directory and `KEYHOLD_BACKEND` on every load.
///
/// # Example
///
/// ```no_run
/// use keyhold_core::config::ConfigLoader;
///
/// let loader = ConfigLoader::new();
/// if let Some(config) = loader.load().unwrap() {
///     println!("backend override from {}", config.source);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    search: SearchPaths,
    env_backend: EnvBackend,
}

#[derive(Debug, Clone)]
enum SearchPaths {
    /// Working directory, then the config root, as of each load
    Default,
    Fixed(Vec<PathBuf>),
}

#[derive(Debug, Clone)]
enum EnvBackend {
    /// Read `KEYHOLD_BACKEND` on each load
    Process,
    Fixed(Option<String>),
}

impl ConfigLoader {
    /// Search the working directory and the config root, honoring `KEYHOLD_BACKEND`
    pub fn new() -> Self {
        Self {
            search: SearchPaths::Default,
            env_backend: EnvBackend::Process,
        }
    }

    /// Search exactly these files, ignoring the environment
    pub fn with_paths(candidates: Vec<PathBuf>) -> Self {
        Self {
            search: SearchPaths::Fixed(candidates),
            env_backend: EnvBackend::Fixed(None),
        }
    }

    /// Search only `<dir>/keyringrc.cfg`, ignoring the environment
    pub fn with_config_root(dir: impl AsRef<Path>) -> Self {
        Self::with_paths(vec![dir.as_ref().join(CONFIG_FILE_NAME)])
    }

    /// Override the environment-provided backend name
    pub fn with_env_backend(mut self, name: Option<String>) -> Self {
        self.env_backend = EnvBackend::Fixed(name);
        self
    }

    /// Candidate files in search order
    pub fn candidates(&self) -> Vec<PathBuf> {
        match &self.search {
            SearchPaths::Fixed(paths) => paths.clone(),
            SearchPaths::Default => {
                let mut candidates = Vec::new();
                if let Ok(cwd) = std::env::current_dir() {
                    candidates.push(cwd.join(CONFIG_FILE_NAME));
                }
                candidates.push(config_root().join(CONFIG_FILE_NAME));
                candidates
            }
        }
    }

    /// The first candidate that exists
    pub fn config_path(&self) -> Option<PathBuf> {
        self.candidates().into_iter().find(|p| p.is_file())
    }

    fn backend_from_env(&self) -> Option<String> {
        match &self.env_backend {
            EnvBackend::Fixed(name) => name.clone(),
            EnvBackend::Process => std::env::var(BACKEND_ENV_VAR)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }

    /// Read the configuration record
    ///
    /// `Ok(None)` when no file exists. A file without a `[backend]` section
    /// or `default-keyring` key yields a record that names no backend.
    pub fn load(&self) -> ConfigResult<Option<KeyringConfig>> {
        if let Some(name) = self.backend_from_env() {
            return Ok(Some(KeyringConfig {
                default_keyring: Some(name),
                keyring_path: None,
                source: ConfigSource::Environment,
            }));
        }

        let path = match self.config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        parse_config(&content, &path).map(Some)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `keyringrc.cfg` content read from `path`
///
/// A relative `keyring-path` is taken relative to the file's directory.
pub fn parse_config(content: &str, path: &Path) -> ConfigResult<KeyringConfig> {
    // Backslashes are literal so Windows paths survive
    let options = ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(content, options).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut config = KeyringConfig::empty(ConfigSource::File(path.to_path_buf()));
    let section = match ini.section(Some(BACKEND_SECTION)) {
        Some(section) => section,
        None => return Ok(config),
    };

    let value = |key: &str| {
        section
            .get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    config.default_keyring = value(DEFAULT_KEYRING_KEY);
    config.keyring_path = value(KEYRING_PATH_KEY).map(|raw| {
        let dir = PathBuf::from(raw);
        match path.parent() {
            Some(base) if dir.is_relative() => base.join(dir),
            _ => dir,
        }
    });
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::with_config_root(dir.path());
        assert!(loader.config_path().is_none());
        assert!(loader.load().unwrap().is_none());
    }

    #[test]
    fn test_file_without_backend_section() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[keyring]\n");
        let config = ConfigLoader::with_config_root(dir.path()).load().unwrap().unwrap();
        assert!(!config.names_backend());
        assert!(config.keyring_path.is_none());
    }

    #[test]
    fn test_empty_backend_section() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[backend]");
        let config = ConfigLoader::with_config_root(dir.path()).load().unwrap().unwrap();
        assert!(!config.names_backend());
    }

    #[test]
    fn test_blank_value_is_absent() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[backend]\ndefault-keyring =   \n");
        let config = ConfigLoader::with_config_root(dir.path()).load().unwrap().unwrap();
        assert!(!config.names_backend());
    }

    #[test]
    fn test_full_backend_section() {
        let dir = tempdir().unwrap();
        let plugins = dir.path().join("plugins");
        fs::create_dir(&plugins).unwrap();
        let path = write_config(
            dir.path(),
            &format!(
                "[backend]\nkeyring-path= {}\ndefault-keyring=test_core.TestKeyring2\n",
                plugins.display()
            ),
        );

        let config = ConfigLoader::with_config_root(dir.path()).load().unwrap().unwrap();
        assert_eq!(config.default_keyring.as_deref(), Some("test_core.TestKeyring2"));
        assert_eq!(config.keyring_path, Some(plugins));
        assert_eq!(config.source, ConfigSource::File(path));
    }

    #[test]
    fn test_relative_keyring_path() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[backend]\nkeyring-path = plugins\n");
        let config = ConfigLoader::with_config_root(dir.path()).load().unwrap().unwrap();
        assert_eq!(config.keyring_path, Some(dir.path().join("plugins")));
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let local = tempdir().unwrap();
        let root = tempdir().unwrap();
        write_config(root.path(), "[backend]\ndefault-keyring = from.Root\n");

        let loader = ConfigLoader::with_paths(vec![
            local.path().join(CONFIG_FILE_NAME),
            root.path().join(CONFIG_FILE_NAME),
        ]);
        assert_eq!(
            loader.load().unwrap().unwrap().default_keyring.as_deref(),
            Some("from.Root")
        );

        write_config(local.path(), "[backend]\ndefault-keyring = from.Local\n");
        assert_eq!(
            loader.load().unwrap().unwrap().default_keyring.as_deref(),
            Some("from.Local")
        );
    }

    #[test]
    fn test_environment_takes_precedence() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[backend]\ndefault-keyring = from.File\n");
        let loader = ConfigLoader::with_config_root(dir.path())
            .with_env_backend(Some("from.Env".to_string()));

        let config = loader.load().unwrap().unwrap();
        assert_eq!(config.default_keyring.as_deref(), Some("from.Env"));
        assert_eq!(config.source, ConfigSource::Environment);
    }

    #[test]
    fn test_default_search_follows_working_directory() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[backend]\n");
        let loader = ConfigLoader::new().with_env_backend(None);

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let loaded = loader.load();
        let found = loader.config_path();
        std::env::set_current_dir(previous).unwrap();

        let config = loaded.unwrap().unwrap();
        assert_eq!(config.source, ConfigSource::File(path.canonicalize().unwrap()));
        assert_eq!(found, Some(dir.path().canonicalize().unwrap().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[backend\ndefault-keyring = x\n");
        let err = ConfigLoader::with_config_root(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
