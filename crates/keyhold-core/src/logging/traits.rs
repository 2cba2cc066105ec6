//! Logger trait definition

use std::sync::Arc;

/// Logger abstraction used by the facade to report backend selection
///
/// Implementations:
/// - `NoOpLogger`: Silent logger for testing
/// - `ConsoleLogger`: Logs to stderr
/// - `FileLogger`: Forwards to the global debug log file
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);

    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

#[cfg(test)]
pub(crate) mod testing {
    use parking_lot::Mutex;

    use super::Logger;

    /// Logger that records every line for assertions
    #[derive(Debug, Default)]
    pub struct RecordingLogger {
        pub lines: Mutex<Vec<String>>,
    }

    impl RecordingLogger {
        pub fn contains(&self, needle: &str) -> bool {
            self.lines.lock().iter().any(|l| l.contains(needle))
        }
    }

    impl Logger for RecordingLogger {
        fn debug(&self, message: &str) {
            self.lines.lock().push(format!("DEBUG {}", message));
        }

        fn info(&self, message: &str) {
            self.lines.lock().push(format!("INFO {}", message));
        }

        fn warn(&self, message: &str) {
            self.lines.lock().push(format!("WARN {}", message));
        }

        fn error(&self, message: &str) {
            self.lines.lock().push(format!("ERROR {}", message));
        }
    }
}
