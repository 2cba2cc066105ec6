//! Parsed configuration record

use std::path::PathBuf;

/// Where a configuration record was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A `keyringrc.cfg` file
    File(PathBuf),
    /// The `KEYHOLD_BACKEND` environment variable
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// Backend override read from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyringConfig {
    /// Qualified name of the backend to bind (`default-keyring`)
    pub default_keyring: Option<String>,
    /// Plug-in search directory (`keyring-path`)
    pub keyring_path: Option<PathBuf>,
    pub source: ConfigSource,
}

impl KeyringConfig {
    /// A record that names no backend
    pub fn empty(source: ConfigSource) -> Self {
        Self {
            default_keyring: None,
            keyring_path: None,
            source,
        }
    }

    /// Whether this record asks for a specific backend
    pub fn names_backend(&self) -> bool {
        self.default_keyring.is_some()
    }
}

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
