//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::Deadline;
use std::sync::Arc;

use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, SessionIssuer,
};
use crate::domain::repository::{IdentityRepository, SessionRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{CredentialsForm, SessionStatusResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: IdentityRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: IdentityRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }

    pub(crate) fn deadline(&self) -> Deadline {
        Deadline::after(self.config.request_timeout)
    }

    pub(crate) fn session_issuer(&self) -> SessionIssuer<R> {
        SessionIssuer::new(self.repo.clone(), self.config.clone())
    }

    pub(crate) fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.config.session_cookie_name)
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> AuthResult<(StatusCode, &'static str)>
where
    R: IdentityRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let Form(form) = form.map_err(|e| AuthError::Validation(e.body_text()))?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        user_name: form.username.unwrap_or_default(),
        password: form.password.unwrap_or_default(),
    };

    use_case.execute(input, state.deadline()).await?;

    Ok((StatusCode::OK, "register success"))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> AuthResult<Response>
where
    R: IdentityRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    // An unreadable body cannot carry valid credentials
    let Form(form) = form.map_err(|_| AuthError::InvalidCredentials)?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let input = LoginInput {
        user_name: form.username.unwrap_or_default(),
        password: form.password.unwrap_or_default(),
    };

    let issued = use_case.execute(input, state.deadline()).await?;

    // Expires is computed from the session's own creation time
    let cookie = set_cookie_header(
        &state.config.cookie_config(),
        &issued.token,
        issued.session.created_at,
    )
    .ok_or_else(|| AuthError::Internal("Session cookie is not a valid header".to_string()))?;

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], "login success").into_response())
}

// ============================================================================
// Logout
// ============================================================================

/// POST /logout
///
/// Always succeeds; the cookie is cleared even when the session was
/// already gone.
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: IdentityRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    if let Some(token) = state.session_token(&headers) {
        if let Err(e) = state.session_issuer().revoke(&token, state.deadline()).await {
            tracing::warn!(error = %e, "Failed to revoke session");
        }
    }

    let mut response = StatusCode::NO_CONTENT.into_response();
    if let Some(cookie) = delete_cookie_header(&state.config.cookie_config()) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /session
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse>
where
    R: IdentityRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let session = match state.session_token(&headers) {
        Some(token) => state
            .session_issuer()
            .validate(&token, state.deadline())
            .await
            .ok(),
        None => None,
    };

    match session {
        Some(session) => Json(SessionStatusResponse {
            authenticated: true,
            expires_at_ms: Some(session.expires_at_ms()),
            user_name: Some(session.user_name.as_str().to_string()),
        }),
        None => Json(SessionStatusResponse::anonymous()),
    }
}
