//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::{IdentityRepository, SessionRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router for any repository implementation
///
/// Routes: `POST /register`, `POST /login`, `POST /logout`, `GET /session`
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: IdentityRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/session", get(handlers::session_status::<R>))
        .with_state(state)
}
