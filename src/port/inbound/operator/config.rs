//! Configuration projections for operator-facing adapters.

use crate::error::Result;

/// One member of the configured replica set.
#[derive(Debug, Clone)]
pub struct ConfigMember {
    pub host: String,
    pub priority: f64,
}

/// Readiness polling section of a configuration view.
#[derive(Debug, Clone)]
pub struct ConfigPolling {
    pub interval_ms: u64,
    pub max_attempts: Option<u32>,
    pub max_wait_secs: Option<u64>,
}

/// Full configuration projection for operator-facing output.
///
/// Carries no secrets: the password is reduced to where it came from.
#[derive(Debug, Clone)]
pub struct ConfigView {
    pub uri: String,
    pub app_name: String,
    pub connect_timeout_ms: u64,
    pub server_selection_timeout_ms: u64,
    pub set_name: String,
    pub members: Vec<ConfigMember>,
    pub principal_name: String,
    pub principal_database: String,
    /// Grants rendered as `role@db`.
    pub roles: Vec<String>,
    pub password_source: String,
    pub polling: ConfigPolling,
    pub log_level: String,
    pub log_format: String,
}

/// Validation output for `config validate`.
#[derive(Debug, Clone, Default)]
pub struct ConfigValidationReport {
    pub warnings: Vec<String>,
}

/// Configuration use-cases for operator-facing adapters.
pub trait ConfigurationOperator: Send + Sync {
    /// Build a projection for `config show`.
    fn show_config(&self, config_toml: &str) -> Result<ConfigView>;

    /// Validate config and return non-fatal warnings.
    fn validate_config(&self, config_toml: &str) -> Result<ConfigValidationReport>;
}
