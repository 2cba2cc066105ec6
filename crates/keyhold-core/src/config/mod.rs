//! Configuration for backend selection
//!
//! Reads the optional `keyringrc.cfg` override:
//!
//! ```ini
//! [backend]
//! default-keyring = keyhold.plaintext.PlaintextFile
//! keyring-path = /opt/keyhold/plugins
//! ```

mod record;
mod file;

pub use record::{ConfigError, ConfigResult, ConfigSource, KeyringConfig};
pub use file::{
    config_root, parse_config, ConfigLoader, BACKEND_ENV_VAR, BACKEND_SECTION, CONFIG_FILE_NAME,
    DEFAULT_KEYRING_KEY, KEYRING_PATH_KEY,
};
