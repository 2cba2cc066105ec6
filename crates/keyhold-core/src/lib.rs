//! Keyhold Core
//!
//! Store, retrieve and delete a password for a `(service, username)` pair
//! without knowing which secret store the host provides.
//!
//! ## Backend selection
//!
//! Every store implements [`KeyringBackend`] and reports a viability score.
//! The [`Keyring`] facade binds one backend, in order of precedence:
//! - a runtime override (`set_keyring`)
//! - `KEYHOLD_BACKEND`, then `[backend] default-keyring` in `keyringrc.cfg`
//! - the registered backend with the highest non-negative score
//! - a fail sentinel whose every operation returns `KeyringError::NoKeyring`
//!
//! ```rust,no_run
//! use keyhold_core::{get_password, set_password};
//!
//! set_password("my-app", "alice", "s3cret")?;
//! assert_eq!(get_password("my-app", "alice")?.as_deref(), Some("s3cret"));
//! # Ok::<(), keyhold_core::KeyringError>(())
//! ```

pub mod backend;
pub mod registry;
pub mod config;
pub mod logging;
pub mod facade;

pub use backend::{
    score, ChainKeyring, DeleteFailure, EnvKeyring, FailKeyring, KeychainKeyring, KeyringBackend,
    KeyringError, KeyringResult, MemoryKeyring, PlaintextFileKeyring,
};

pub use registry::{BackendDescriptor, BackendOrigin, BackendRegistry, PluginContext, PluginSource};

pub use config::{ConfigError, ConfigLoader, ConfigSource, KeyringConfig};

pub use logging::{ConsoleLogger, FileLogger, Logger, NoOpLogger};

pub use facade::{
    default_keyring, delete_password, get_keyring, get_password, init_backend, load_config,
    set_keyring, set_password, ActiveBackend, BackendStatus, Binding, Keyring, Selector,
};
