//! Backend selection and the password facade

mod binding;
mod selector;
mod keyring;
mod global;

pub use binding::{ActiveBackend, Binding};
pub use selector::Selector;
pub use keyring::{BackendStatus, Keyring};
pub use global::{
    default_keyring, delete_password, get_keyring, get_password, init_backend, load_config,
    set_keyring, set_password,
};
