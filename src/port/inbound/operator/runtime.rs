//! Runtime control projection types for operator-facing adapters.
//!
//! Defines request and response types for the `run` command.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{FormationOutcome, ProvisionOutcome};
use crate::error::Result;

/// Bootstrap configuration overrides from CLI flags.
///
/// Every `Some` value takes precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Raw TOML configuration content.
    pub config_toml: String,

    /// Override for the connection string.
    pub uri: Option<String>,

    /// Override for the poll interval in milliseconds.
    pub interval_ms: Option<u64>,

    /// Override for the readiness attempt budget.
    pub max_attempts: Option<u32>,

    /// Override for the readiness wait budget in seconds.
    pub max_wait_secs: Option<u64>,

    /// Override for log level (e.g., "debug", "info", "warn").
    pub log_level: Option<String>,

    /// Whether to output logs as JSON.
    pub json_logs: bool,
}

/// Startup information snapshot for display.
#[derive(Debug, Clone)]
pub struct RunStartupSnapshot {
    /// Connection string with any credentials masked.
    pub uri_display: String,

    /// Replica-set name.
    pub set_name: String,

    /// Address of the single member.
    pub member: String,

    /// Account that will be provisioned.
    pub principal: String,

    /// Human-readable polling policy.
    pub polling: String,
}

/// Result of a completed bootstrap run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub formation: FormationOutcome,
    pub readiness_attempts: u32,
    pub readiness_elapsed: Duration,
    pub provision: ProvisionOutcome,
}

/// Runtime control use-cases for operator-facing adapters.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait RuntimeOperator: Send + Sync {
    /// Prepare a startup snapshot from runtime overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    fn prepare_run(&self, request: &RunRequest) -> Result<RunStartupSnapshot>;

    /// Execute the bootstrap sequence until it finishes, fails or is
    /// interrupted with Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the node cannot be
    /// reached, or any bootstrap step fails.
    async fn execute_run(&self, request: RunRequest) -> Result<RunSummary>;
}
