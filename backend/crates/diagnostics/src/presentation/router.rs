//! Diagnostics Router

use axum::{Router, routing::get};
use platform::env::EnvSource;

use crate::presentation::handlers::{self, DiagnosticsAppState};

/// Routes: `GET /debug_env`
///
/// Callers decide whether to mount this and which access gate to put in
/// front of it.
pub fn diagnostics_router<E>(state: DiagnosticsAppState<E>) -> Router
where
    E: EnvSource + 'static,
{
    Router::new()
        .route("/debug_env", get(handlers::debug_env::<E>))
        .with_state(state)
}
