//! Filesystem-backed File Store

use std::path::PathBuf;

use crate::domain::repository::FileStore;
use crate::domain::resource_path::ResourcePath;
use crate::error::{ResourceError, ResourceResult};

/// Serves files below a single root directory
#[derive(Debug, Clone)]
pub struct FsFileStore {
    root: PathBuf,
}

impl FsFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileStore for FsFileStore {
    async fn read(&self, path: &ResourcePath) -> ResourceResult<Vec<u8>> {
        // A missing root means nothing can be found under it
        let root = tokio::fs::canonicalize(&self.root).await?;

        let target = tokio::fs::canonicalize(root.join(path.as_path())).await?;

        // Lexically clean paths can still leave the root through symlinks
        if !target.starts_with(&root) {
            return Err(ResourceError::InvalidPath);
        }

        if !tokio::fs::metadata(&target).await?.is_file() {
            return Err(ResourceError::NotFound);
        }

        Ok(tokio::fs::read(&target).await?)
    }
}
