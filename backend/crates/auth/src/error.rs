//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error` classification. Responses are short
//! plain-text bodies; details go to the log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::DeadlineExceeded;
use kernel::error::kind::ErrorKind;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Why a presented session token did not authenticate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Malformed, badly signed, revoked or never issued
    #[error("Unknown session token")]
    UnknownToken,

    /// Issued but past its expiry
    #[error("Session expired")]
    Expired,
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Unknown user or wrong password (indistinguishable on purpose)
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Authenticated but not on the operator allow-list
    #[error("Operator access required")]
    Forbidden,

    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::Session(_) => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::DeadlineExceeded => ErrorKind::ServiceUnavailable,
            AuthError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                ErrorKind::ServiceUnavailable
            }
            AuthError::Database(_) => ErrorKind::InternalServerError,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Body sent to the client
    fn public_message(&self) -> String {
        match self {
            AuthError::Validation(msg) => msg.clone(),
            AuthError::InvalidCredentials => "invalid credentials".to_string(),
            AuthError::Session(_) => "authentication required".to_string(),
            AuthError::Forbidden => "forbidden".to_string(),
            AuthError::DeadlineExceeded => "request timed out".to_string(),
            AuthError::Database(_) | AuthError::Internal(_) => match self.kind() {
                ErrorKind::ServiceUnavailable => "service unavailable".to_string(),
                _ => "internal error".to_string(),
            },
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::DeadlineExceeded => {
                tracing::warn!("Auth request deadline exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        (self.status_code(), self.public_message()).into_response()
    }
}

impl From<DeadlineExceeded> for AuthError {
    fn from(_: DeadlineExceeded) -> Self {
        AuthError::DeadlineExceeded
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {err}"))
    }
}
