//! Request dispatch module
//!
//! Entry point for HTTP request processing: method dispatch, then the shared
//! response headers and the access log line.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_LENGTH, SERVER};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) URL path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<&'a str>,
    pub has_if_none_match: bool,
}

/// Main entry point for HTTP request handling
///
/// Never fails: every problem is reported to the client as a status code.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let headers = req.headers();

    let ctx = RequestContext {
        path: uri.path(),
        query: uri.query(),
        is_head: *method == Method::HEAD,
        if_modified_since: headers
            .get("if-modified-since")
            .and_then(|v| v.to_str().ok()),
        has_if_none_match: headers.contains_key("if-none-match"),
    };

    let mut response = dispatch(method, &ctx, &state).await;
    finish_response(&mut response, &state);

    if state.config.logging.access_log {
        log_access(&ctx, method, req.version(), &response, peer_addr);
    }

    Ok(response)
}

async fn dispatch(
    method: &Method,
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    match *method {
        Method::GET | Method::HEAD => static_files::serve_path(ctx, state).await,
        Method::OPTIONS => http::build_options_response(),
        _ => http::build_501_response(method.as_str()),
    }
}

/// Add the headers every response carries, whatever produced it
fn finish_response(response: &mut Response<Full<Bytes>>, state: &AppState) {
    let headers = response.headers_mut();
    state.cors.apply(headers);
    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        headers.insert(SERVER, server);
    }
}

fn log_access(
    ctx: &RequestContext<'_>,
    method: &Method,
    version: Version,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        method.to_string(),
        ctx.path.to_string(),
    );
    entry.query = ctx.query.map(ToString::to_string);
    entry.http_version = format_version(version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = if ctx.is_head || response.status() == StatusCode::NOT_MODIFIED {
        None
    } else {
        response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    };
    logger::log_access(&entry);
}

fn format_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
