//! Keyring backend abstractions and built-in implementations
//!
//! This module provides:
//! - `KeyringBackend`, the capability protocol every store implements
//! - Built-in backends: `KeychainKeyring`, `PlaintextFileKeyring`, `EnvKeyring`, `MemoryKeyring`
//! - `ChainKeyring` for composing backends and `FailKeyring`, the no-backend sentinel

mod traits;
mod keychain;
mod plaintext;
mod env;
mod memory;
mod chain;
mod fail;

pub use traits::{score, DeleteFailure, KeyringBackend, KeyringError, KeyringResult};
pub use keychain::KeychainKeyring;
#[cfg(all(test, target_os = "linux"))]
pub(crate) use keychain::DEAD_SESSION_BUS;
pub use plaintext::{PlaintextFileKeyring, PASSWORD_FILE};
pub use env::{EnvKeyring, ENV_PREFIX};
pub use memory::MemoryKeyring;
pub use chain::ChainKeyring;
pub use fail::FailKeyring;
