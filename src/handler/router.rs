//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, static file
//! serving, header injection and access logging.

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::static_files;
use crate::http::{self, BuildResult};
use crate::logger::{self, AccessLogEntry, LogWriter};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
}

impl<'a> RequestContext<'a> {
    pub fn from_parts(parts: &'a Parts) -> Self {
        let header = |name: HeaderName| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };

        Self {
            path: parts.uri.path(),
            query: parts.uri.query(),
            is_head: parts.method == Method::HEAD,
            if_none_match: header(IF_NONE_MATCH),
            if_modified_since: header(IF_MODIFIED_SINCE),
        }
    }
}

/// Main entry point for HTTP request handling
///
/// Never fails: every outcome, including filesystem errors, becomes a
/// response carrying the development headers, and exactly one access line is
/// written for it.
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    // GET and HEAD bodies are never read
    let (parts, _) = req.into_parts();
    let mut entry = AccessLogEntry::from_parts(&parts, peer_addr);

    let ctx = RequestContext::from_parts(&parts);
    let result = match check_http_method(&parts.method) {
        Some(early) => early.map_err(ServeError::from),
        None => static_files::serve(&ctx, &state).await,
    };

    let mut response = match result {
        Ok(resp) => resp,
        Err(err) => {
            entry.error = Some(err.to_string());
            error_response(&err, ctx.is_head, &state.log)
        }
    };

    http::inject_dev_headers(&mut response);

    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    logger::log_access(
        &state.log,
        &entry,
        &state.config.logging.access_log_format,
    );

    Ok(response)
}

/// Turn a request failure into its status response; builder failures also
/// go to the error log
fn error_response(err: &ServeError, is_head: bool, log: &LogWriter) -> Response<Full<Bytes>> {
    if let ServeError::Response(e) = err {
        logger::log_error(log, &format!("Failed to build response: {e}"));
    }

    http::build_error_response(err.status(), is_head).unwrap_or_else(|e| {
        logger::log_error(log, &format!("Failed to build {} response: {e}", err.status()));
        http::build_fallback(err.status())
    })
}

/// Answer OPTIONS and unsupported methods directly; `None` means serve the path
fn check_http_method(method: &Method) -> Option<BuildResult> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => Some(http::build_405_response()),
    }
}
