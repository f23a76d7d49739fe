//! Cookie Management Infrastructure
//!
//! Set-Cookie construction and Cookie header parsing.

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Duration, Utc};

/// IMF-fixdate (RFC 9110 §5.6.7), the only format browsers must accept
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value
    ///
    /// When `max_age_secs` is set both `Max-Age` and an absolute `Expires`
    /// (relative to `now`) are emitted, for clients that ignore one of them.
    pub fn build_set_cookie(&self, value: &str, now: DateTime<Utc>) -> String {
        let mut cookie = format!("{}={}", self.name, value);
        self.push_attributes(&mut cookie);

        if let Some(max_age) = self.max_age_secs {
            let expires = now + Duration::seconds(max_age);
            cookie.push_str(&format!("; Max-Age={}", max_age));
            cookie.push_str(&format!("; Expires={}", expires.format(HTTP_DATE_FORMAT)));
        }

        cookie
    }

    /// Build Set-Cookie header for deletion (expired)
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!("{}=", self.name);
        self.push_attributes(&mut cookie);
        cookie.push_str("; Max-Age=0");
        cookie
    }

    fn push_attributes(&self, cookie: &mut String) {
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
    }
}

/// Extract a cookie value from headers
///
/// Every `Cookie` header is searched; the first match wins.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

/// Create a Set-Cookie header value
///
/// Returns `None` if the cookie contains bytes not allowed in a header.
pub fn set_cookie_header(
    config: &CookieConfig,
    value: &str,
    now: DateTime<Utc>,
) -> Option<HeaderValue> {
    HeaderValue::from_str(&config.build_set_cookie(value, now)).ok()
}

/// Create a Set-Cookie header value that clears the cookie
pub fn delete_cookie_header(config: &CookieConfig) -> Option<HeaderValue> {
    HeaderValue::from_str(&config.build_delete_cookie()).ok()
}
