//! Fetch Resource Use Case
//!
//! Validates a caller-supplied relative path and reads the file below the
//! configured root. Validation happens before any filesystem access.

use std::sync::Arc;

use kernel::Deadline;

use crate::domain::repository::FileStore;
use crate::domain::resource_path::ResourcePath;
use crate::error::ResourceResult;

pub struct FetchResourceUseCase<S>
where
    S: FileStore,
{
    store: Arc<S>,
}

impl<S> FetchResourceUseCase<S>
where
    S: FileStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, raw_path: &str, deadline: Deadline) -> ResourceResult<Vec<u8>> {
        let path = ResourcePath::parse(raw_path)?;

        let bytes = deadline.run(self.store.read(&path)).await??;

        tracing::debug!(size = bytes.len(), "Resource served");

        Ok(bytes)
    }
}
