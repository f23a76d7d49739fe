//! Application Configuration
//!
//! Builds every bounded context's config from environment variables.
//! Unset variables keep the context's defaults.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::domain::value_object::user_name::UserName;
use diagnostics::DiagnosticsConfig;
use files::FilesConfig;
use platform::env::EnvSource;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";

#[derive(Clone)]
pub struct AppConfig {
    /// Postgres connection string; `None` selects the in-memory stores
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
    pub files: FilesConfig,
    pub diagnostics: DiagnosticsConfig,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("bind_addr", &self.bind_addr)
            .field("auth", &self.auth)
            .field("files", &self.files)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

impl AppConfig {
    /// Load from `env`, using the build profile to decide whether a missing
    /// `SESSION_SECRET` is acceptable
    pub fn from_env<E>(env: &E) -> anyhow::Result<Self>
    where
        E: EnvSource + ?Sized,
    {
        Self::load(env, cfg!(debug_assertions))
    }

    pub(crate) fn load<E>(env: &E, development: bool) -> anyhow::Result<Self>
    where
        E: EnvSource + ?Sized,
    {
        let database_url = env
            .non_empty("DATABASE_URL")
            .or_else(|| env.non_empty("PG_CONN_STR"));

        let bind_addr = env
            .non_empty("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_addr}"))?;

        let request_timeout = match env.non_empty("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;
                if secs == 0 {
                    bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let mut auth = load_auth(env, development)?;
        let mut files = match env.non_empty("RESOURCE_ROOT") {
            Some(root) => FilesConfig::with_root(root),
            None => FilesConfig::default(),
        };
        if let Some(timeout) = request_timeout {
            auth.request_timeout = timeout;
            files.request_timeout = timeout;
        }

        let mut diagnostics = DiagnosticsConfig::default();
        if let Some(enabled) = env.flag("DIAGNOSTICS_ENABLED") {
            diagnostics.enabled = enabled;
        }
        if let Some(var) = env.non_empty("DIAGNOSTICS_SECRET_VAR") {
            diagnostics.secret_var = var.trim().to_string();
        }

        Ok(Self {
            database_url,
            bind_addr,
            auth,
            files,
            diagnostics,
        })
    }
}

fn load_auth<E>(env: &E, development: bool) -> anyhow::Result<AuthConfig>
where
    E: EnvSource + ?Sized,
{
    let mut config = match env.non_empty("SESSION_SECRET") {
        Some(encoded) => {
            let bytes = platform::crypto::from_base64(encoded.trim())
                .context("SESSION_SECRET must be standard base64")?;
            let secret: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
                anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len())
            })?;
            AuthConfig {
                session_secret: secret,
                ..AuthConfig::default()
            }
        }
        None if development => {
            tracing::warn!("SESSION_SECRET not set, using a random secret for this process");
            AuthConfig::with_random_secret()
        }
        None => bail!("SESSION_SECRET must be set in production"),
    };

    if let Some(secure) = env.flag("COOKIE_SECURE") {
        config.cookie_secure = secure;
    }

    config.password_pepper = env.non_empty("PASSWORD_PEPPER").map(String::into_bytes);

    if let Some(list) = env.non_empty("OPERATOR_USERNAMES") {
        for raw in list.split(',').filter(|s| !s.trim().is_empty()) {
            match UserName::new(raw) {
                Ok(name) => {
                    config.operators.insert(name.as_str().to_string());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring invalid entry in OPERATOR_USERNAMES");
                }
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::env::MapEnv;

    #[test]
    fn test_defaults_in_development() {
        let config = AppConfig::load(&MapEnv::new(), true).unwrap();

        assert!(config.database_url.is_none());
        assert_eq!(config.bind_addr, "0.0.0.0:31113".parse().unwrap());
        assert!(config.auth.cookie_secure);
        assert!(config.auth.operators.is_empty());
        assert_ne!(config.auth.session_secret, [0u8; 32]);
        assert!(!config.diagnostics.enabled);
        assert_eq!(config.diagnostics.secret_var, "SECRET_KEY");
    }

    #[test]
    fn test_production_requires_session_secret() {
        assert!(AppConfig::load(&MapEnv::new(), false).is_err());

        let env = MapEnv::new().with("SESSION_SECRET", platform::crypto::to_base64(&[7u8; 32]));
        let config = AppConfig::load(&env, false).unwrap();
        assert_eq!(config.auth.session_secret, [7u8; 32]);
    }

    #[test]
    fn test_session_secret_length_checked() {
        let env = MapEnv::new().with("SESSION_SECRET", platform::crypto::to_base64(&[7u8; 16]));
        assert!(AppConfig::load(&env, true).is_err());

        let env = MapEnv::new().with("SESSION_SECRET", "not base64!");
        assert!(AppConfig::load(&env, true).is_err());
    }

    #[test]
    fn test_database_url_fallback() {
        let env = MapEnv::new().with("PG_CONN_STR", "postgres://fallback/db");
        let config = AppConfig::load(&env, true).unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://fallback/db"));

        let env = env.with("DATABASE_URL", "postgres://primary/db");
        let config = AppConfig::load(&env, true).unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://primary/db"));
    }

    #[test]
    fn test_overrides() {
        let env = MapEnv::new()
            .with("BIND_ADDR", "127.0.0.1:8080")
            .with("COOKIE_SECURE", "false")
            .with("PASSWORD_PEPPER", "pepper")
            .with("OPERATOR_USERNAMES", " root , ops,, \u{0007}bad ")
            .with("RESOURCE_ROOT", "/srv/files")
            .with("DIAGNOSTICS_ENABLED", "yes")
            .with("DIAGNOSTICS_SECRET_VAR", "APP_TOKEN")
            .with("REQUEST_TIMEOUT_SECS", "3");
        let config = AppConfig::load(&env, true).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert!(!config.auth.cookie_secure);
        assert_eq!(config.auth.password_pepper.as_deref(), Some(&b"pepper"[..]));
        assert_eq!(config.auth.operators.len(), 2);
        assert!(config.auth.operators.contains("root"));
        assert!(config.auth.operators.contains("ops"));
        assert_eq!(config.files.root, std::path::PathBuf::from("/srv/files"));
        assert!(config.diagnostics.enabled);
        assert_eq!(config.diagnostics.secret_var, "APP_TOKEN");
        assert_eq!(config.auth.request_timeout, Duration::from_secs(3));
        assert_eq!(config.files.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let env = MapEnv::new().with("BIND_ADDR", "localhost");
        assert!(AppConfig::load(&env, true).is_err());

        let env = MapEnv::new().with("REQUEST_TIMEOUT_SECS", "0");
        assert!(AppConfig::load(&env, true).is_err());
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let env = MapEnv::new().with("DATABASE_URL", "postgres://user:hunter2@db/app");
        let config = AppConfig::load(&env, true).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
    }
}
