//! Static file serving module
//!
//! Resolves request paths against the root directory and serves files,
//! index files and directory listings.

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::response::FileResponse;
use crate::http::{self, cache, mime};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Serve the request path from the root directory
pub async fn serve(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let root = state.root();
    let target = resolve_request_path(root, ctx.path);
    let metadata = fs::metadata(&target).await?;
    ensure_within_root(root, &target).await?;

    if metadata.is_dir() {
        return serve_directory(ctx, state, &target).await;
    }

    // "/page.html/" names a directory that does not exist
    if ctx.path.ends_with('/') {
        return Err(ServeError::NotFound);
    }

    serve_file(ctx, &target, &metadata).await
}

/// Translate a URL path into a filesystem path under `root`
///
/// The path is percent-decoded and split on `/`. Empty and `.` segments are
/// dropped and `..` removes the previous segment, never climbing above `root`.
/// Segments that could be read as a separator or a drive are dropped too.
pub fn resolve_request_path(root: &Path, request_path: &str) -> PathBuf {
    let decoded = percent_decode_str(request_path).decode_utf8_lossy();

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains(['\\', '\0']) || !is_plain_name(s) => {}
            s => segments.push(s),
        }
    }

    segments
        .into_iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

fn is_plain_name(segment: &str) -> bool {
    Path::new(segment)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

/// Reject targets that escape the root through a symlink
async fn ensure_within_root(root: &Path, target: &Path) -> Result<(), ServeError> {
    let canonical = fs::canonicalize(target).await?;
    if canonical.starts_with(root) {
        Ok(())
    } else {
        Err(ServeError::Forbidden(format!(
            "{} resolves outside the root directory",
            target.display()
        )))
    }
}

async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Result<Response<Full<Bytes>>, ServeError> {
    // Relative links in an index page only work below a trailing slash
    if !ctx.path.ends_with('/') {
        let location = trailing_slash_location(ctx.path, ctx.query);
        return http::build_redirect_response(&location).map_err(ServeError::from);
    }

    for index_file in &state.config.http.index_files {
        let index_path = dir.join(index_file);
        if let Ok(metadata) = fs::metadata(&index_path).await {
            if metadata.is_file() {
                ensure_within_root(state.root(), &index_path).await?;
                return serve_file(ctx, &index_path, &metadata).await;
            }
        }
    }

    if !state.config.http.directory_listing {
        return Err(ServeError::Forbidden("directory listing disabled".to_string()));
    }

    let html = listing::render(dir, ctx.path).await?;
    http::build_html_response(html, ctx.is_head).map_err(ServeError::from)
}

/// `Location` for a directory requested without its trailing slash
///
/// Leading slashes collapse to one so `//host/dir` cannot become a
/// protocol-relative redirect to another host.
fn trailing_slash_location(path: &str, query: Option<&str>) -> String {
    let path = path.trim_start_matches('/');
    match query {
        Some(query) => format!("/{path}/?{query}"),
        None => format!("/{path}/"),
    }
}

async fn serve_file(
    ctx: &RequestContext<'_>,
    path: &Path,
    metadata: &Metadata,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let modified = metadata.modified().ok();
    let content = fs::read(path).await?;

    let etag = cache::generate_etag(&content);
    let last_modified = modified.map(cache::http_date);

    // If-None-Match takes precedence over If-Modified-Since (RFC 9110 13.2.2)
    let not_modified = if ctx.if_none_match.is_some() {
        cache::check_etag_match(ctx.if_none_match.as_deref(), &etag)
    } else {
        modified.is_some_and(|m| cache::not_modified_since(ctx.if_modified_since.as_deref(), m))
    };
    if not_modified {
        return http::build_304_response(&etag, last_modified.as_deref())
            .map_err(ServeError::from);
    }

    let meta = FileResponse {
        content_type: mime::for_path(path),
        etag: &etag,
        last_modified: last_modified.as_deref(),
    };
    http::build_file_response(content, &meta, ctx.is_head).map_err(ServeError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_paths() {
        let root = Path::new("/srv/site");
        assert_eq!(resolve_request_path(root, "/"), root);
        assert_eq!(
            resolve_request_path(root, "/css/app.css"),
            root.join("css").join("app.css")
        );
        assert_eq!(
            resolve_request_path(root, "/my%20notes.txt"),
            root.join("my notes.txt")
        );
    }

    #[test]
    fn test_resolve_never_climbs_above_root() {
        let root = Path::new("/srv/site");
        assert_eq!(
            resolve_request_path(root, "/../../etc/passwd"),
            root.join("etc").join("passwd")
        );
        assert_eq!(
            resolve_request_path(root, "/%2e%2e/%2E%2E/etc/passwd"),
            root.join("etc").join("passwd")
        );
        assert_eq!(
            resolve_request_path(root, "/docs/../img/./a.png"),
            root.join("img").join("a.png")
        );
    }

    #[test]
    fn test_resolve_drops_suspicious_segments() {
        let root = Path::new("/srv/site");
        assert_eq!(
            resolve_request_path(root, "/a/..%5C..%5Cb/c"),
            root.join("a").join("c")
        );
        assert_eq!(resolve_request_path(root, "/x%00y"), root);
    }

    #[test]
    fn test_redirect_location_stays_on_this_host() {
        assert_eq!(trailing_slash_location("/docs", None), "/docs/");
        assert_eq!(trailing_slash_location("/docs", Some("v=1")), "/docs/?v=1");
        assert_eq!(trailing_slash_location("//evil.example", None), "/evil.example/");
        assert_eq!(
            trailing_slash_location("///evil.example/x", Some("a")),
            "/evil.example/x/?a"
        );
    }
}
