// Application state module
// Immutable per-process state shared by every connection

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::ServerError;
use crate::logger::LogWriter;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical form of `config.server.root_directory`
    root: PathBuf,
    pub log: LogWriter,
}

impl AppState {
    /// Create `AppState`, canonicalizing and checking the root directory
    pub fn new(config: Config, log: LogWriter) -> Result<Self, ServerError> {
        let configured = config.server.root_directory.clone();
        let root = configured
            .canonicalize()
            .map_err(|source| ServerError::RootDirectory {
                path: configured.clone(),
                source,
            })?;

        if !root.is_dir() {
            return Err(ServerError::RootDirectory {
                path: configured,
                source: std::io::Error::new(
                    std::io::ErrorKind::NotADirectory,
                    "not a directory",
                ),
            });
        }

        Ok(Self { config, root, log })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
