//! Directory listing module
//!
//! Renders an HTML index for directories that have no index file.

use crate::handler::router::RequestContext;
use crate::http::encoding::{escape_html, percent_decode, percent_encode_segment};
use crate::http::{self, response};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Name shown to the user: directories get `/`, symlinks `@`
    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Relative link target, percent-encoded
    fn link(&self) -> String {
        let encoded = percent_encode_segment(&self.name);
        if self.is_dir {
            format!("{encoded}/")
        } else {
            encoded
        }
    }
}

/// Serve a listing of `dir`
pub async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    match read_entries(dir).await {
        Ok(entries) => {
            let page = render_listing(&percent_decode(ctx.path), &entries);
            response::build_html_response(page, ctx.is_head)
        }
        Err(e) => {
            crate::logger::log_warning(&format!(
                "Cannot list directory '{}': {e}",
                dir.display()
            ));
            http::build_404_response("No permission to list directory", ctx.is_head)
        }
    }
}

/// Read the entries of `dir`, sorted case-insensitively by name
pub async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let is_symlink = entry
            .file_type()
            .await
            .is_ok_and(|file_type| file_type.is_symlink());
        // Follows symlinks, so a link to a directory is linked as one
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|meta| meta.is_dir());

        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_key(|entry| entry.name.to_lowercase());
    Ok(entries)
}

/// Render the listing page for `display_path` (the decoded request path)
pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));

    let mut items = String::new();
    for entry in entries {
        items.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape_html(&entry.link()),
            escape_html(&entry.display_name()),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
<hr>
<ul>
{items}</ul>
<hr>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool, is_symlink: bool) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            is_dir,
            is_symlink,
        }
    }

    #[test]
    fn test_render_marks_directories_and_links() {
        let page = render_listing(
            "/pkg/",
            &[
                entry("assets", true, false),
                entry("current", true, true),
                entry("app.wasm", false, false),
            ],
        );
        assert!(page.contains("<title>Directory listing for /pkg/</title>"));
        assert!(page.contains("<li><a href=\"assets/\">assets/</a></li>"));
        assert!(page.contains("<li><a href=\"current/\">current@</a></li>"));
        assert!(page.contains("<li><a href=\"app.wasm\">app.wasm</a></li>"));
    }

    #[test]
    fn test_render_escapes_names() {
        let page = render_listing("/<x>/", &[entry("a&b <c>.txt", false, false)]);
        assert!(page.contains("Directory listing for /&lt;x&gt;/"));
        assert!(page.contains("href=\"a%26b%20%3Cc%3E.txt\""));
        assert!(page.contains(">a&amp;b &lt;c&gt;.txt</a>"));
    }

    #[tokio::test]
    async fn test_read_entries_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.js"), "").unwrap();
        std::fs::write(dir.path().join("A.css"), "").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        assert_eq!(
            entries,
            vec![
                entry("A.css", false, false),
                entry("b.js", false, false),
                entry("c", true, false),
            ]
        );
    }

    #[tokio::test]
    async fn test_read_entries_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_entries(&dir.path().join("gone")).await.is_err());
    }
}
