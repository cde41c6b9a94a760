//! HTTP protocol layer module
//!
//! Content types, cache validators, response builders and the development
//! headers stamped onto every response.

pub mod cache;
pub mod headers;
pub mod mime;
pub mod response;

pub use headers::inject_dev_headers;
pub use response::{
    build_304_response, build_405_response, build_error_response, build_fallback,
    build_file_response, build_html_response, build_options_response, build_redirect_response,
    BuildResult,
};
