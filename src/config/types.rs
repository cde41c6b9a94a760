// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served as `/`
    pub root_directory: PathBuf,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            root_directory: default_root_directory(),
            workers: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Access log format (dev, common, combined or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log_format: default_access_log_format(),
        }
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Files tried, in order, when a directory is requested
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
    /// Generate an HTML listing for directories without an index file
    #[serde(default = "default_directory_listing")]
    pub directory_listing: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            index_files: default_index_files(),
            directory_listing: default_directory_listing(),
        }
    }
}

/// Browser launch configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    #[serde(default = "default_open_browser")]
    pub open: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            open: default_open_browser(),
        }
    }
}

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3000;

/// The directory containing the running executable, `.` if it cannot be determined
pub fn default_root_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "dev".to_string()
}

fn default_index_files() -> Vec<String> {
    vec!["index.html".to_string(), "index.htm".to_string()]
}

#[allow(clippy::missing_const_for_fn)]
fn default_directory_listing() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_open_browser() -> bool {
    true
}
