//! Application Configuration

/// Diagnostics application configuration
#[derive(Debug, Clone)]
pub struct DiagnosticsConfig {
    /// Whether `/debug_env` is mounted at all
    pub enabled: bool,
    /// Environment variable reported as `secret`
    pub secret_var: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            secret_var: "SECRET_KEY".to_string(),
        }
    }
}

impl DiagnosticsConfig {
    /// Enabled, reporting the default variable (for development)
    pub fn development() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }
}
