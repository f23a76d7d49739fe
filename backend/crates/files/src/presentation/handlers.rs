//! HTTP Handlers

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::Deadline;

use crate::application::{FetchResourceUseCase, FilesConfig};
use crate::domain::repository::FileStore;
use crate::error::{ResourceError, ResourceResult};
use crate::presentation::dto::FetchQuery;

/// Shared state for files handlers
#[derive(Clone)]
pub struct FilesAppState<S>
where
    S: FileStore + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<FilesConfig>,
}

impl<S> FilesAppState<S>
where
    S: FileStore + Clone + Send + Sync + 'static,
{
    pub fn new(store: S, config: FilesConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

/// GET /secret?file=<relative path>
pub async fn fetch_resource<S>(
    State(state): State<FilesAppState<S>>,
    query: Result<Query<FetchQuery>, QueryRejection>,
) -> ResourceResult<Response>
where
    S: FileStore + Clone + Send + Sync + 'static,
{
    let Query(query) = query.map_err(|_| ResourceError::InvalidPath)?;
    let file = query.file.ok_or(ResourceError::InvalidPath)?;

    let deadline = Deadline::after(state.config.request_timeout);
    let bytes = FetchResourceUseCase::new(state.store.clone())
        .execute(&file, deadline)
        .await?;

    let mut response = (StatusCode::OK, bytes).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    Ok(response)
}
