//! MongoDB connection configuration.

use std::time::Duration;

use serde::Deserialize;

/// How to reach the node being bootstrapped.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoSettings {
    /// Connection string. `directConnection=true` is forced regardless of
    /// what the URI says, since the node is not a set member yet.
    ///
    /// Overridden by `RSINIT_MONGO_URI`.
    #[serde(default = "default_uri")]
    pub uri: String,
    /// Application name reported to the server.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// TCP connect timeout (milliseconds).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// How long a single command waits for the node to become selectable
    /// (milliseconds).
    #[serde(default = "default_server_selection_timeout_ms")]
    pub server_selection_timeout_ms: u64,
}

fn default_uri() -> String {
    "mongodb://localhost:27017/?directConnection=true".to_string()
}

fn default_app_name() -> String {
    "rsinit".to_string()
}

const fn default_connect_timeout_ms() -> u64 {
    5000
}

const fn default_server_selection_timeout_ms() -> u64 {
    5000
}

impl MongoSettings {
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    #[must_use]
    pub const fn server_selection_timeout(&self) -> Duration {
        Duration::from_millis(self.server_selection_timeout_ms)
    }
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            app_name: default_app_name(),
            connect_timeout_ms: default_connect_timeout_ms(),
            server_selection_timeout_ms: default_server_selection_timeout_ms(),
        }
    }
}
