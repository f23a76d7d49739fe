//! Router Composition
//!
//! Merges every bounded context's routes behind one set of HTTP layers.

use std::sync::Arc;

use auth::domain::repository::{IdentityRepository, SessionRepository};
use auth::handlers::AuthAppState;
use auth::middleware::require_operator;
use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::{Router, middleware, routing::get};
use diagnostics::{DiagnosticsAppState, diagnostics_router};
use files::presentation::FilesAppState;
use files::{FsFileStore, files_router};
use kernel::AppError;
use platform::env::EnvSource;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{Span, info_span};

use crate::config::AppConfig;

/// Build the full application router
///
/// `/debug_env` is only routed when diagnostics are enabled, and then only
/// for operators.
pub fn build_router<R, E>(repo: R, config: &AppConfig, env: Arc<E>) -> Router
where
    R: IdentityRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnvSource + 'static,
{
    let auth_state = AuthAppState::new(repo, config.auth.clone());
    let files_state = FilesAppState::new(
        FsFileStore::new(config.files.root.clone()),
        config.files.clone(),
    );

    let mut app = Router::new()
        .route("/health", get(health))
        .merge(auth::auth_router(auth_state.clone()))
        .merge(files_router(files_state));

    if config.diagnostics.enabled {
        let diagnostics = diagnostics_router(DiagnosticsAppState::new(
            env,
            config.diagnostics.clone(),
        ))
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            require_operator::<R>,
        ));
        app = app.merge(diagnostics);
    }

    app.fallback(fallback).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}

async fn health() -> &'static str {
    "ok"
}

async fn fallback() -> AppError {
    AppError::not_found("Route not found")
}

/// Span per request. Records the route, never the query string.
fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = route,
        request_id
    )
}
