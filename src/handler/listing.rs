//! Directory listing module
//!
//! Renders a plain HTML index for directories without an index file.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::io;
use std::path::Path;
use tokio::fs;

/// Characters left unescaped in listing links (RFC 3986 unreserved)
const LINK_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One row of the listing
#[derive(Debug, PartialEq, Eq)]
struct ListingEntry {
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

impl ListingEntry {
    fn href(&self) -> String {
        let mut href = utf8_percent_encode(&self.name, LINK_ESCAPE).to_string();
        if self.is_dir {
            href.push('/');
        }
        href
    }

    /// Directories end in `/`, symlinks in `@`
    fn label(&self) -> String {
        let suffix = if self.is_dir {
            "/"
        } else if self.is_symlink {
            "@"
        } else {
            ""
        };
        format!("{}{suffix}", self.name)
    }
}

/// Render the listing for `dir`, titled with the request path
pub async fn render(dir: &Path, request_path: &str) -> io::Result<String> {
    let entries = read_entries(dir).await?;
    Ok(render_html(&entries, request_path))
}

async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let file_type = entry.file_type().await?;
        // Follow symlinks so a link to a directory is listed as one
        let is_dir = if file_type.is_symlink() {
            fs::metadata(entry.path())
                .await
                .is_ok_and(|m| m.is_dir())
        } else {
            file_type.is_dir()
        };

        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink: file_type.is_symlink(),
        });
    }

    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

fn render_html(entries: &[ListingEntry], request_path: &str) -> String {
    let display_path = escape_html(&percent_decode_str(request_path).decode_utf8_lossy());
    let title = format!("Directory listing for {display_path}");

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for entry in entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape_html(&entry.href()),
            escape_html(&entry.label())
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
