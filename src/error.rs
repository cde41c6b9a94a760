//! Error types
//!
//! `ServerError` covers the process lifecycle and is fatal when it reaches `main`.
//! `ServeError` covers a single request and is always turned into an HTTP status.

use hyper::StatusCode;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors: configuration, binding and the serve loop itself
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("cannot resolve address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot serve directory '{}': {source}", path.display())]
    RootDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Per-request failures, contained in the request handler
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("not found")]
    NotFound,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("internal error: {0}")]
    Internal(#[source] io::Error),

    #[error("failed to build response: {0}")]
    Response(#[from] hyper::http::Error),
}

impl ServeError {
    /// Classify a filesystem error
    pub fn from_io(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::Forbidden(err.to_string()),
            _ => Self::Internal(err),
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) | Self::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<io::Error> for ServeError {
    fn from(err: io::Error) -> Self {
        Self::from_io(err)
    }
}
