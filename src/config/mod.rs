// Configuration module entry point
// Loads layered configuration and holds the per-process runtime state

mod state;
mod types;

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use crate::error::ServerError;

pub use state::AppState;
pub use types::{
    default_root_directory, BrowserConfig, Config, HttpConfig, LoggingConfig, ServerConfig,
    DEFAULT_HOST, DEFAULT_PORT,
};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_FILE: &str = "devserver";

/// Environment variable prefix, e.g. `DEVSERVER_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "DEVSERVER";

/// Values given on the command line, applied on top of every other source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root_directory: Option<PathBuf>,
    pub open_browser: Option<bool>,
}

impl Config {
    /// Load configuration from the given file path (without extension), the
    /// environment and command-line overrides. A missing file is not an error.
    pub fn load_from(
        config_path: &str,
        overrides: &ConfigOverrides,
    ) -> Result<Self, config::ConfigError> {
        let default_root = default_root_directory().to_string_lossy().into_owned();

        let settings = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.root_directory", default_root)?
            .set_default("logging.access_log_format", "dev")?
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .set_default("http.directory_listing", true)?
            .set_default("browser.open", true)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", overrides.host.clone())?
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .set_override_option(
                "server.root_directory",
                overrides
                    .root_directory
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("browser.open", overrides.open_browser)?
            .build()?;

        settings.try_deserialize()
    }
}

impl ServerConfig {
    /// Resolve `host:port` to a bindable address, preferring IPv4
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| ServerError::InvalidAddress {
                addr: format!("{}:{}", self.host, self.port),
                source,
            })?
            .collect();

        addrs
            .iter()
            .find(|a| a.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| ServerError::InvalidAddress {
                addr: format!("{}:{}", self.host, self.port),
                source: std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    "host resolved to no addresses",
                ),
            })
    }

    /// Public URL for a server listening on `port`
    pub fn url_for_port(&self, port: u16) -> String {
        if self.host.contains(':') {
            format!("http://[{}]:{port}", self.host)
        } else {
            format!("http://{}:{port}", self.host)
        }
    }
}
