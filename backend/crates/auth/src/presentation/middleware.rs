//! Auth Middleware
//!
//! Gates for protected routes. Use with
//! `axum::middleware::from_fn_with_state(state, require_operator::<R>)`.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};

use crate::domain::repository::{IdentityRepository, SessionRepository};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, SessionError};
use crate::presentation::handlers::AuthAppState;

/// Identity behind the request's session, stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_name: UserName,
    pub session_expires_at: DateTime<Utc>,
}

/// Middleware that requires a valid session belonging to an operator
///
/// - no cookie / unknown / expired session: 401
/// - valid session, user not on the operator allow-list: 403
pub async fn require_operator<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: IdentityRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let path = req.uri().path().to_string();

    let token = state
        .session_token(req.headers())
        .ok_or(SessionError::UnknownToken)?;

    let session = state
        .session_issuer()
        .validate(&token, state.deadline())
        .await?;

    if !state.config.is_operator(&session.user_name) {
        tracing::warn!(
            target: "audit",
            user_name = %session.user_name,
            path = %path,
            "Operator access denied"
        );
        return Err(AuthError::Forbidden);
    }

    tracing::info!(
        target: "audit",
        user_name = %session.user_name,
        path = %path,
        "Operator access granted"
    );

    req.extensions_mut().insert(AuthenticatedUser {
        user_name: session.user_name,
        session_expires_at: session.expires_at,
    });

    Ok(next.run(req).await)
}
