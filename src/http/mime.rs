//! MIME type detection module
//!
//! Maps file extensions to the Content-Type sent with a file. The table is
//! built once at startup and shared read-only with every connection.

use std::collections::HashMap;
use std::path::Path;

/// Content type used when an extension is missing or unknown
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const DEFAULT_TABLE: [(&str, &str); 11] = [
    ("", DEFAULT_CONTENT_TYPE),
    (".html", "text/html"),
    (".js", "application/javascript"),
    (".mjs", "application/javascript"),
    (".css", "text/css"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
    (".json", "application/json"),
    (".wasm", "application/wasm"),
];

/// Extension to Content-Type table
///
/// Keys carry the leading dot (`.wasm`). The empty key is the fallback entry.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    map: HashMap<&'static str, &'static str>,
}

impl ContentTypes {
    pub fn new() -> Self {
        Self {
            map: DEFAULT_TABLE.into_iter().collect(),
        }
    }

    /// Look up an extension (with leading dot, or empty)
    ///
    /// Tries the extension as given, then lower-cased, then the fallback.
    ///
    /// # Examples
    /// ```ignore
    /// let types = ContentTypes::new();
    /// assert_eq!(types.lookup(".wasm"), "application/wasm");
    /// assert_eq!(types.lookup(".PNG"), "image/png");
    /// assert_eq!(types.lookup(".txt"), "application/octet-stream");
    /// ```
    pub fn lookup(&self, extension: &str) -> &'static str {
        if let Some(&content_type) = self.map.get(extension) {
            return content_type;
        }
        if let Some(&content_type) = self.map.get(extension.to_lowercase().as_str()) {
            return content_type;
        }
        self.fallback()
    }

    /// Content type for a file path, based on its final extension
    pub fn resolve(&self, path: &Path) -> &'static str {
        match path.extension() {
            Some(ext) => match ext.to_str() {
                Some(ext) => self.lookup(&format!(".{ext}")),
                None => self.fallback(),
            },
            None => self.lookup(""),
        }
    }

    fn fallback(&self) -> &'static str {
        self.map.get("").copied().unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}
