//! Access log format module
//!
//! Supports multiple log formats:
//! - `dev` (default): `[15/Oct/2026 14:02:11] GET /index.html 200`
//! - `common` (Common Log Format - CLF)
//! - `combined` (CLF plus referer and user agent)
//! - `json` (one JSON object per line)
//!
//! Unknown format names fall back to `dev`.

use chrono::{DateTime, Local};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::Version;
use std::net::SocketAddr;

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client address
    pub remote_addr: String,
    /// Request timestamp
    pub time: DateTime<Local>,
    pub method: String,
    /// Request target as sent, including any query string
    pub target: String,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: &'static str,
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: u64,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
    /// Failure reason for error responses
    pub error: Option<String>,
}

impl AccessLogEntry {
    /// Create an entry from an incoming request's head, timestamped now
    pub fn from_parts(parts: &Parts, peer_addr: SocketAddr) -> Self {
        let header = |name: HeaderName| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };

        Self {
            remote_addr: peer_addr.ip().to_string(),
            time: Local::now(),
            method: parts.method.to_string(),
            target: parts
                .uri
                .path_and_query()
                .map_or_else(|| parts.uri.path().to_string(), ToString::to_string),
            http_version: version_str(parts.version),
            status: 200,
            body_bytes: 0,
            referer: header(REFERER),
            user_agent: header(USER_AGENT),
            request_time_us: 0,
            error: None,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "combined" => self.format_combined(),
            "json" => self.format_json(),
            _ => self.format_dev(),
        }
    }

    fn format_dev(&self) -> String {
        let mut line = format!(
            "[{}] {} {} {}",
            self.time.format("%d/%b/%Y %H:%M:%S"),
            self.method,
            self.target,
            self.status
        );
        if let Some(error) = &self.error {
            line.push_str(&format!(" ({error})"));
        }
        line
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.target,
            self.http_version,
            self.status,
            self.body_bytes,
        )
    }

    /// Common format followed by `"$http_referer" "$http_user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} \"{}\" \"{}\"",
            self.format_common(),
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "target": self.target,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
            "error": self.error,
        })
        .to_string()
    }
}

const fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
