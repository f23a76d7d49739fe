//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use kernel::{AppError, AppResult};
use platform::env::EnvSource;

use crate::application::{DiagnosticsConfig, SnapshotUseCase};
use crate::presentation::dto::SnapshotResponse;

/// Shared state for diagnostics handlers
pub struct DiagnosticsAppState<E>
where
    E: EnvSource + 'static,
{
    pub env: Arc<E>,
    pub config: Arc<DiagnosticsConfig>,
}

impl<E> Clone for DiagnosticsAppState<E>
where
    E: EnvSource + 'static,
{
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            config: self.config.clone(),
        }
    }
}

impl<E> DiagnosticsAppState<E>
where
    E: EnvSource + 'static,
{
    pub fn new(env: Arc<E>, config: DiagnosticsConfig) -> Self {
        Self {
            env,
            config: Arc::new(config),
        }
    }
}

/// GET /debug_env
pub async fn debug_env<E>(
    State(state): State<DiagnosticsAppState<E>>,
) -> AppResult<Json<SnapshotResponse>>
where
    E: EnvSource + 'static,
{
    if !state.config.enabled {
        return Err(AppError::not_found("Not found"));
    }

    let snapshot = SnapshotUseCase::new(state.env.clone(), state.config.clone()).execute();
    Ok(Json(snapshot.into()))
}
