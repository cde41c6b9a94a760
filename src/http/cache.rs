//! HTTP cache validator module
//!
//! `ETag` / `Last-Modified` generation and conditional request evaluation.
//! Responses are still marked `no-cache`, so browsers revalidate on every
//! load and these validators turn unchanged files into cheap 304s.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Generate `ETag` from file content
///
/// # Returns
/// Quoted `ETag` string, e.g., `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Format a modification time as an HTTP date (second precision)
pub fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string()
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports a single tag, a comma-separated list and the `*` wildcard.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// True if the file has not changed since the client's `If-Modified-Since` date
///
/// Unparseable dates never match, so the full response is sent.
pub fn not_modified_since(if_modified_since: Option<&str>, modified: SystemTime) -> bool {
    let Some(header) = if_modified_since else {
        return false;
    };
    let Ok(since) = DateTime::parse_from_rfc2822(header.trim()) else {
        return false;
    };
    // HTTP dates carry whole seconds only
    let modified = DateTime::<Utc>::from(modified).timestamp();
    modified <= since.timestamp()
}
