//! Files Router

use axum::{Router, routing::get};

use crate::domain::repository::FileStore;
use crate::presentation::handlers::{self, FilesAppState};

/// Routes: `GET /secret?file=<relative path>`
pub fn files_router<S>(state: FilesAppState<S>) -> Router
where
    S: FileStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/secret", get(handlers::fetch_resource::<S>))
        .with_state(state)
}
