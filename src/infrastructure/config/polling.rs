//! Readiness polling configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::readiness::PollPolicy;

/// `[polling]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Fixed delay between status queries (milliseconds).
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Give up after this many status queries. Unbounded when unset.
    #[serde(default)]
    pub max_attempts: Option<u32>,
    /// Give up after this many seconds of polling. Unbounded when unset.
    #[serde(default)]
    pub max_wait_secs: Option<u64>,
}

const fn default_interval_ms() -> u64 {
    1000
}

impl PollingConfig {
    #[must_use]
    pub fn policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(self.interval_ms),
            max_attempts: self.max_attempts,
            max_wait: self.max_wait_secs.map(Duration::from_secs),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_attempts: None,
            max_wait_secs: None,
        }
    }
}
