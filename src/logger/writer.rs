//! Log writer module
//!
//! Routes info/access lines to stdout and error lines to stderr.
//! A capturing writer records lines in memory so tests can inspect them.

use std::sync::{Arc, Mutex};

/// Log output target
#[derive(Clone)]
enum LogTarget {
    /// Write to stdout
    Stdout,
    /// Write to stderr
    Stderr,
    /// Append to a shared in-memory buffer
    Memory(Arc<Mutex<Vec<String>>>),
}

impl LogTarget {
    fn write(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::Memory(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(message.to_string());
                }
            }
        }
    }
}

/// Cloneable log writer shared by all connections
#[derive(Clone)]
pub struct LogWriter {
    /// Access and info target
    access: LogTarget,
    /// Error and warning target
    error: LogTarget,
}

impl LogWriter {
    /// Console writer: access/info to stdout, errors to stderr
    pub const fn stdio() -> Self {
        Self {
            access: LogTarget::Stdout,
            error: LogTarget::Stderr,
        }
    }

    /// In-memory writer plus a handle for reading back what was written
    pub fn capture() -> (Self, LogCapture) {
        let access = Arc::new(Mutex::new(Vec::new()));
        let error = Arc::new(Mutex::new(Vec::new()));
        let writer = Self {
            access: LogTarget::Memory(Arc::clone(&access)),
            error: LogTarget::Memory(Arc::clone(&error)),
        };
        (writer, LogCapture { access, error })
    }

    /// Write to access log
    pub fn write_access(&self, message: &str) {
        self.access.write(message);
    }

    /// Write info message (to access log target)
    pub fn write_info(&self, message: &str) {
        self.access.write(message);
    }

    /// Write to error log
    pub fn write_error(&self, message: &str) {
        self.error.write(message);
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::stdio()
    }
}

/// Read side of [`LogWriter::capture`]
#[derive(Clone)]
pub struct LogCapture {
    access: Arc<Mutex<Vec<String>>>,
    error: Arc<Mutex<Vec<String>>>,
}

impl LogCapture {
    /// Lines written to the access/info target so far
    pub fn access_lines(&self) -> Vec<String> {
        self.access.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Lines written to the error target so far
    pub fn error_lines(&self) -> Vec<String> {
        self.error.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_separates_targets() {
        let (writer, capture) = LogWriter::capture();
        writer.write_access("GET / 200");
        writer.write_info("banner");
        writer.write_error("boom");

        assert_eq!(capture.access_lines(), vec!["GET / 200", "banner"]);
        assert_eq!(capture.error_lines(), vec!["boom"]);
    }

    #[test]
    fn test_clones_share_buffer() {
        let (writer, capture) = LogWriter::capture();
        let clone = writer.clone();
        clone.write_access("from clone");
        assert_eq!(capture.access_lines().len(), 1);
    }
}
