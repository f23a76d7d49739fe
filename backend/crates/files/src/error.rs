//! Files Error Types
//!
//! Client bodies never include the requested path or any filesystem detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::DeadlineExceeded;
use kernel::error::kind::ErrorKind;
use thiserror::Error;

/// Files-specific result type alias
pub type ResourceResult<T> = Result<T, ResourceError>;

#[derive(Debug, Error)]
pub enum ResourceError {
    /// Traversal attempt, absolute path or otherwise unacceptable name
    #[error("Invalid file path")]
    InvalidPath,

    #[error("File not found")]
    NotFound,

    /// Any other read failure; only the I/O error kind is kept
    #[error("File read failed: {0:?}")]
    Io(std::io::ErrorKind),

    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

impl ResourceError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ResourceError::InvalidPath => ErrorKind::BadRequest,
            ResourceError::NotFound => ErrorKind::NotFound,
            ResourceError::Io(_) => ErrorKind::InternalServerError,
            ResourceError::DeadlineExceeded => ErrorKind::ServiceUnavailable,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ResourceError::InvalidPath => "invalid file path",
            ResourceError::NotFound => "file not found",
            ResourceError::Io(_) => "file error",
            ResourceError::DeadlineExceeded => "request timed out",
        }
    }

    fn log(&self) {
        match self {
            ResourceError::InvalidPath => {
                tracing::warn!(target: "audit", "Rejected resource path");
            }
            ResourceError::Io(kind) => {
                tracing::error!(io_error = ?kind, "Resource read failed");
            }
            ResourceError::DeadlineExceeded => {
                tracing::warn!("Resource request deadline exceeded");
            }
            ResourceError::NotFound => {
                tracing::debug!("Resource not found");
            }
        }
    }
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ResourceError::NotFound,
            kind => ResourceError::Io(kind),
        }
    }
}

impl From<DeadlineExceeded> for ResourceError {
    fn from(_: DeadlineExceeded) -> Self {
        ResourceError::DeadlineExceeded
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        self.log();
        (self.status_code(), self.public_message()).into_response()
    }
}
