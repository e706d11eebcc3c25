//! Static file serving module
//!
//! Maps request paths onto the document root and builds file responses.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, response};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Request path mapped onto the file system
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    /// Whether the decoded URL path ended with `/`
    pub trailing_slash: bool,
}

/// Map a URL path onto a file below `root`
///
/// The path is percent-decoded and normalised segment by segment: empty and
/// `.` segments are dropped, `..` removes the previous segment and is ignored
/// at the top. The result therefore never leaves `root`.
pub fn translate_path(root: &Path, url_path: &str) -> ResolvedPath {
    let decoded = http::encoding::percent_decode(url_path);
    let trailing_slash = decoded.trim_end().ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    let mut path = root.to_path_buf();
    path.extend(segments);

    ResolvedPath {
        path,
        trailing_slash,
    }
}

/// Serve the file, index file or directory listing a request path names
pub async fn serve_path(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let resolved = translate_path(&state.root, ctx.path);

    let is_dir = fs::metadata(&resolved.path)
        .await
        .is_ok_and(|meta| meta.is_dir());

    if is_dir {
        if !ctx.path.ends_with('/') {
            return http::build_301_response(&directory_location(ctx.path, ctx.query));
        }
        return match find_index_file(&resolved.path, &state.config.http.index_files).await {
            Some(index) => serve_file(ctx, state, &index).await,
            None => listing::serve_listing(ctx, &resolved.path).await,
        };
    }

    if resolved.trailing_slash {
        return http::build_404_response("File not found", ctx.is_head);
    }

    serve_file(ctx, state, &resolved.path).await
}

/// Serve a single regular file
pub async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    path: &Path,
) -> Response<Full<Bytes>> {
    // Any open failure (missing, permission denied) is reported as 404
    let Ok(mut file) = fs::File::open(path).await else {
        return http::build_404_response("File not found", ctx.is_head);
    };

    let metadata = match file.metadata().await {
        Ok(m) => m,
        Err(e) => {
            logger::log_error(&format!("Failed to stat '{}': {e}", path.display()));
            return internal_error(ctx);
        }
    };

    let last_modified = metadata.modified().ok();
    if let Some(modified) = last_modified {
        if cache::is_not_modified(ctx.if_modified_since, ctx.has_if_none_match, modified) {
            return http::build_304_response(&cache::format_http_date(modified));
        }
    }

    let mut content = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    if let Err(e) = file.read_to_end(&mut content).await {
        logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
        return internal_error(ctx);
    }

    let content_type = state.content_types.resolve(path);
    let last_modified = last_modified.map(cache::format_http_date);

    response::build_file_response(
        Bytes::from(content),
        content_type,
        last_modified.as_deref(),
        ctx.is_head,
    )
}

/// First configured index file that exists as a regular file in `dir`
async fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for name in index_files {
        let candidate = dir.join(name);
        if fs::metadata(&candidate)
            .await
            .is_ok_and(|meta| meta.is_file())
        {
            return Some(candidate);
        }
    }
    None
}

/// Redirect target for a directory requested without its trailing slash
fn directory_location(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) => format!("{path}/?{q}"),
        None => format!("{path}/"),
    }
}

fn internal_error(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    http::build_error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error reading file",
        ctx.is_head,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_simple() {
        let resolved = translate_path(Path::new("/srv"), "/pkg/app.wasm");
        assert_eq!(resolved.path, PathBuf::from("/srv/pkg/app.wasm"));
        assert!(!resolved.trailing_slash);
    }

    #[test]
    fn test_translate_root_and_directories() {
        let root = translate_path(Path::new("/srv"), "/");
        assert_eq!(root.path, PathBuf::from("/srv"));
        assert!(root.trailing_slash);

        let dir = translate_path(Path::new("/srv"), "/assets/");
        assert_eq!(dir.path, PathBuf::from("/srv/assets"));
        assert!(dir.trailing_slash);
    }

    #[test]
    fn test_translate_decodes_percent_escapes() {
        let resolved = translate_path(Path::new("/srv"), "/my%20file.js");
        assert_eq!(resolved.path, PathBuf::from("/srv/my file.js"));
    }

    #[test]
    fn test_translate_cannot_escape_root() {
        let cases = [
            "/../etc/passwd",
            "/a/../../etc/passwd",
            "/%2e%2e/etc/passwd",
            "/./../etc//passwd",
        ];
        for case in cases {
            let resolved = translate_path(Path::new("/srv"), case);
            assert_eq!(resolved.path, PathBuf::from("/srv/etc/passwd"), "{case}");
        }
    }

    #[test]
    fn test_translate_parent_inside_root() {
        let resolved = translate_path(Path::new("/srv"), "/a/b/../c.css");
        assert_eq!(resolved.path, PathBuf::from("/srv/a/c.css"));
    }

    #[test]
    fn test_directory_location() {
        assert_eq!(directory_location("/docs", None), "/docs/");
        assert_eq!(directory_location("/docs", Some("v=1")), "/docs/?v=1");
    }
}
