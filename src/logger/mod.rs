//! Logger module
//!
//! Provides logging utilities for the file server:
//! - Server lifecycle logging (stdout)
//! - Access logging in Common Log Format (stderr)
//! - Error and warning logging (stderr)

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

/// Write to info log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

/// Lines announcing the listening server
///
/// The URL uses `localhost` so it can be pasted straight into a browser, even
/// though the listener is bound to every interface.
pub fn startup_lines(addr: &SocketAddr, root: &Path) -> Vec<String> {
    vec![
        format!("Server running at http://localhost:{}/", addr.port()),
        format!("Serving {} on {addr}", root.display()),
        "Press Ctrl+C to stop the server".to_string(),
    ]
}

pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    for line in startup_lines(addr, root) {
        write_info(&line);
    }
}

pub fn log_shutdown() {
    write_info("\nKeyboard interrupt received, exiting.");
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry) {
    write_error(&entry.format());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_lines_default_port() {
        let addr: SocketAddr = "0.0.0.0:8000".parse().unwrap();
        let lines = startup_lines(&addr, Path::new("."));
        assert!(lines[0].contains("http://localhost:8000/"));
        assert!(lines.iter().any(|l| l.contains("Ctrl+C")));
    }
}
