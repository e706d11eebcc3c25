// Application state module
// Immutable per-process state shared by every connection

use std::path::PathBuf;

use super::types::Config;
use crate::http::{ContentTypes, CorsHeaders};

/// Application state
///
/// Built once before the listener starts and never mutated afterwards, so it
/// is shared across connections behind a plain `Arc` without locks.
pub struct AppState {
    pub config: Config,
    /// Directory request paths are resolved against
    pub root: PathBuf,
    pub content_types: ContentTypes,
    pub cors: CorsHeaders,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            root: PathBuf::from(&config.server.root),
            content_types: ContentTypes::new(),
            cors: CorsHeaders::new(),
        }
    }

    /// State serving files from `root` instead of the configured directory
    #[cfg(test)]
    pub fn with_root(config: &Config, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::new(config)
        }
    }
}
