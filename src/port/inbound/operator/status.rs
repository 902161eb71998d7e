//! Status projection types for operator-facing adapters.

use async_trait::async_trait;

use crate::error::Result;

/// Result of a single readiness query.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    /// Connection string with any credentials masked.
    pub uri_display: String,

    /// Whether the node reported itself as writable primary.
    pub primary: bool,
}

/// Status use-cases for operator-facing adapters.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait StatusOperator: Send + Sync {
    /// Connect and issue one readiness query, without retrying.
    ///
    /// # Arguments
    ///
    /// * `config_toml` - Raw TOML configuration content.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the query fails.
    async fn load_status(&self, config_toml: &str) -> Result<StatusSnapshot>;
}
