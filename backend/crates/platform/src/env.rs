//! Process Environment Access
//!
//! Reads go through [`EnvSource`] so that configuration loading and the
//! diagnostics endpoint can be exercised against a fixed map in tests
//! instead of mutating the real process environment.

use std::collections::HashMap;

/// Read-only view over environment variables
pub trait EnvSource: Send + Sync {
    /// Value of `key`, or `None` if unset or not valid Unicode
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key`, with unset and empty treated alike
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.trim().is_empty())
    }

    /// Boolean flag: `1`, `true`, `yes`, `on` (any case) are true
    fn flag(&self, key: &str) -> Option<bool> {
        self.non_empty(key).map(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables
#[derive(Debug, Clone, Default)]
pub struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_env() {
        let env = MapEnv::new().with("A", "1").with("EMPTY", "  ");
        assert_eq!(env.var("A").as_deref(), Some("1"));
        assert_eq!(env.var("EMPTY").as_deref(), Some("  "));
        assert_eq!(env.non_empty("EMPTY"), None);
        assert_eq!(env.var("MISSING"), None);
    }

    #[test]
    fn test_flag() {
        let env: MapEnv = [("ON", "TRUE"), ("ONE", "1"), ("OFF", "false"), ("JUNK", "maybe")]
            .into_iter()
            .collect();
        assert_eq!(env.flag("ON"), Some(true));
        assert_eq!(env.flag("ONE"), Some(true));
        assert_eq!(env.flag("OFF"), Some(false));
        assert_eq!(env.flag("JUNK"), Some(false));
        assert_eq!(env.flag("MISSING"), None);
    }

    #[test]
    fn test_process_env_missing() {
        assert_eq!(ProcessEnv.var("PLATFORM_ENV_TEST_SURELY_UNSET_9F2A"), None);
    }
}
