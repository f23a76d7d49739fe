//! Snapshot Use Case
//!
//! Reads the configured variable at request time, so rotating it in the
//! environment is visible without a restart.

use std::sync::Arc;

use platform::env::EnvSource;

use crate::application::config::DiagnosticsConfig;
use crate::domain::snapshot::DiagnosticsSnapshot;

pub struct SnapshotUseCase<E>
where
    E: EnvSource,
{
    env: Arc<E>,
    config: Arc<DiagnosticsConfig>,
}

impl<E> SnapshotUseCase<E>
where
    E: EnvSource,
{
    pub fn new(env: Arc<E>, config: Arc<DiagnosticsConfig>) -> Self {
        Self { env, config }
    }

    pub fn execute(&self) -> DiagnosticsSnapshot {
        let secret = self.env.var(&self.config.secret_var);

        // Log the variable name and presence only, never the value
        tracing::info!(
            target: "audit",
            variable = %self.config.secret_var,
            present = secret.is_some(),
            "Diagnostics snapshot served"
        );

        DiagnosticsSnapshot {
            secret: secret.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::env::MapEnv;

    #[test]
    fn test_reads_configured_variable() {
        let env = MapEnv::new().with("SECRET_KEY", "s3cr3t").with("OTHER", "x");
        let use_case = SnapshotUseCase::new(Arc::new(env), Arc::new(DiagnosticsConfig::default()));
        assert_eq!(use_case.execute().secret, "s3cr3t");
    }

    #[test]
    fn test_custom_variable_name() {
        let env = MapEnv::new().with("SECRET_KEY", "wrong").with("APP_TOKEN", "right");
        let config = DiagnosticsConfig {
            secret_var: "APP_TOKEN".to_string(),
            ..DiagnosticsConfig::development()
        };
        let use_case = SnapshotUseCase::new(Arc::new(env), Arc::new(config));
        assert_eq!(use_case.execute().secret, "right");
    }

    #[test]
    fn test_unset_variable_is_empty() {
        let use_case = SnapshotUseCase::new(
            Arc::new(MapEnv::new()),
            Arc::new(DiagnosticsConfig::default()),
        );
        assert_eq!(use_case.execute().secret, "");
    }

    #[test]
    fn test_debug_redacts_value() {
        let snapshot = DiagnosticsSnapshot {
            secret: "s3cr3t".to_string(),
        };
        assert!(!format!("{:?}", snapshot).contains("s3cr3t"));
    }
}
