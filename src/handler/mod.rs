//! Request handler module
//!
//! Maps each request to a file under the root directory, stamps the
//! development headers on the response and writes the access log line.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
