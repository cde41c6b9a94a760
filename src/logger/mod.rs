//! Logger module
//!
//! Provides logging utilities for the dev server including:
//! - Startup banner and shutdown messages
//! - One access log line per request
//! - Error and warning logging

mod format;
mod writer;

pub use format::AccessLogEntry;
pub use writer::{LogCapture, LogWriter};

use std::path::Path;

const RULE: &str = "======================================";

pub fn log_server_start(log: &LogWriter, url: &str, root: &Path, open_browser: bool) {
    log.write_info(RULE);
    log.write_info("Static dev server started");
    log.write_info(&format!("Listening on: {url}"));
    log.write_info(&format!("Root directory: {}", root.display()));
    if open_browser {
        log.write_info("Opening browser...");
    }
    log.write_info("Press Ctrl+C to stop");
    log.write_info(RULE);
}

/// Log formatted access log entry
pub fn log_access(log: &LogWriter, entry: &AccessLogEntry, format: &str) {
    log.write_access(&entry.format(format));
}

pub fn log_browser_failed(log: &LogWriter, url: &str, err: &std::io::Error) {
    log_warning(
        log,
        &format!("Could not open a browser ({err}), visit {url} manually"),
    );
}

pub fn log_shutdown_started(log: &LogWriter) {
    log.write_info("\nShutting down server...");
}

pub fn log_shutdown_complete(log: &LogWriter) {
    log.write_info("Server stopped");
}

pub fn log_connection_error(log: &LogWriter, err: &hyper::Error) {
    log.write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(log: &LogWriter, message: &str) {
    log.write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(log: &LogWriter, message: &str) {
    log.write_error(&format!("[WARN] {message}"));
}
