//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Register / Login
// ============================================================================

/// `application/x-www-form-urlencoded` body of `/register` and `/login`
///
/// Fields are optional so that a missing field is reported by the use
/// case instead of as a form rejection. No `Debug`: it carries a password.
#[derive(Clone, Default, Deserialize)]
pub struct CredentialsForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub user_name: Option<String>,
    pub expires_at_ms: Option<i64>,
}

impl SessionStatusResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_name: None,
            expires_at_ms: None,
        }
    }
}
