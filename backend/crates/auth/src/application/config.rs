//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;
/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::domain::value_object::user_name::UserName;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session lifetime (10 minutes)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// User names allowed through `require_operator`
    pub operators: HashSet<String>,
    /// Upper bound on the work done for a single request
    pub request_timeout: Duration,
}

/// Every default carries a fresh random session secret; a fixed key is
/// only ever set explicitly.
impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            session_secret: random_secret(),
            session_ttl: Duration::from_secs(10 * 60),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            operators: HashSet::new(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self::default()
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }

    pub fn is_operator(&self, user_name: &UserName) -> bool {
        self.operators.contains(user_name.as_str())
    }

    /// Cookie attributes for the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl_secs()),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("operators", &self.operators)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn random_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&platform::crypto::random_bytes(32));
    secret
}
