//! Repository Traits

use crate::domain::resource_path::ResourcePath;
use crate::error::ResourceResult;

/// Read access to the resource tree
#[trait_variant::make(FileStore: Send)]
pub trait LocalFileStore {
    /// Read the whole file at `path`, relative to the store's root
    async fn read(&self, path: &ResourcePath) -> ResourceResult<Vec<u8>>;
}
