//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ConfigOverrides, DEFAULT_CONFIG_FILE};

/// Serve a directory over HTTP for local development
#[derive(Debug, Parser)]
#[command(name = "static-devserver", version, about)]
pub struct Cli {
    /// Config file path without extension (devserver.toml, devserver.yaml, ...)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Host name or address to listen on [default: localhost]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [default: 3000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory to serve [default: the executable's directory]
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Do not open a browser tab on startup
    #[arg(long)]
    pub no_browser: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            root_directory: self.root.clone(),
            open_browser: self.no_browser.then_some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_config_untouched() {
        let cli = Cli::try_parse_from(["static-devserver"]).unwrap();
        assert_eq!(cli.config, "devserver");
        let overrides = cli.overrides();
        assert!(overrides.host.is_none());
        assert!(overrides.port.is_none());
        assert!(overrides.open_browser.is_none());
    }

    #[test]
    fn test_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "static-devserver",
            "--host",
            "0.0.0.0",
            "-p",
            "8080",
            "--root",
            "public",
            "--no-browser",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(overrides.port, Some(8080));
        assert_eq!(overrides.root_directory, Some(PathBuf::from("public")));
        assert_eq!(overrides.open_browser, Some(false));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["static-devserver", "--port", "70000"]).is_err());
    }
}
