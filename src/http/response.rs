//! HTTP response building module
//!
//! Builders for the responses the static file handler produces. None of them
//! set `Access-Control-Allow-Origin` or `Cache-Control`; those are stamped on
//! afterwards by [`super::inject_dev_headers`].

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_MAX_AGE, ALLOW,
    CONTENT_LENGTH, CONTENT_TYPE, ETAG, LAST_MODIFIED, LOCATION,
};
use hyper::{Response, StatusCode};

/// Builders only fail on invalid header values
pub type BuildResult = Result<Response<Full<Bytes>>, hyper::http::Error>;

const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Metadata for a successful file response
pub struct FileResponse<'a> {
    pub content_type: &'a str,
    pub etag: &'a str,
    pub last_modified: Option<&'a str>,
}

/// Build 200 response for a file's content
pub fn build_file_response(
    data: Vec<u8>,
    meta: &FileResponse<'_>,
    is_head: bool,
) -> BuildResult {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(data) };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, meta.content_type)
        .header(CONTENT_LENGTH, content_length)
        .header(ETAG, meta.etag);
    if let Some(last_modified) = meta.last_modified {
        builder = builder.header(LAST_MODIFIED, last_modified);
    }

    builder.body(Full::new(body))
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> BuildResult {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, last_modified: Option<&str>) -> BuildResult {
    let mut builder = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(ETAG, etag);
    if let Some(last_modified) = last_modified {
        builder = builder.header(LAST_MODIFIED, last_modified);
    }

    builder.body(Full::new(Bytes::new()))
}

/// Build a plain-text error response, e.g. `404 Not Found`
pub fn build_error_response(status: StatusCode, is_head: bool) -> BuildResult {
    let text = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let content_length = text.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(text)
    };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> BuildResult {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(ALLOW, ALLOWED_METHODS)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
}

/// Build OPTIONS response (CORS preflight)
pub fn build_options_response() -> BuildResult {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ALLOW, ALLOWED_METHODS)
        .header(ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS)
        .header(ACCESS_CONTROL_ALLOW_HEADERS, "*")
        .header(ACCESS_CONTROL_MAX_AGE, "86400")
        .body(Full::new(Bytes::new()))
}

/// Build 301 redirect, used to add the trailing slash to directory paths
pub fn build_redirect_response(target: &str) -> BuildResult {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, target)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from("Redirecting...")))
}

/// Bare response with only a status, for when a builder itself failed
pub fn build_fallback(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}
