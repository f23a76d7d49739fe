//! Application Configuration

use std::path::PathBuf;
use std::time::Duration;

/// Files application configuration
#[derive(Debug, Clone)]
pub struct FilesConfig {
    /// Directory `/secret` serves from
    pub root: PathBuf,
    /// Upper bound on the work done for a single request
    pub request_timeout: Duration,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./data"),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl FilesConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}
