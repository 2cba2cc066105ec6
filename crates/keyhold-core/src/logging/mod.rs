//! Logging abstractions
//!
//! Hosts inject a `Logger` into the facade; backends write to the global
//! `file_logger`, which stays silent unless `KEYHOLD_DEBUG` is set.

mod traits;
mod noop;
mod console;
pub mod file_logger;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use file_logger::{log_file_path, FileLogger, LogLevel};

#[cfg(test)]
pub(crate) use traits::testing;
