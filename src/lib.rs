//! Local static-file development server
//!
//! Serves a directory over HTTP with `Access-Control-Allow-Origin: *` and
//! `Cache-Control: no-cache` on every response, logs one line per request and
//! opens a browser tab on startup.

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::{AppState, Config};
pub use error::{ServeError, ServerError};
pub use server::DevServer;
