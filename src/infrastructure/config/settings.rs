//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all bootstrap settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for the connection string and the admin password.
//!
//! # Example
//!
//! ```no_run
//! use rsinit::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("rsinit.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::Path;

use mongodb::options::ConnectionString;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::polling::PollingConfig;
use super::principal::{PasswordSource, PrincipalConfig};
use super::replica_set::ReplicaSetConfig;
use crate::adapter::outbound::mongo::MongoSettings;
use crate::application::readiness::PollPolicy;
use crate::domain::{PrincipalSpec, ReplicaSetSpec};
use crate::error::{ConfigError, Result};

/// Overrides the connection string.
pub const ENV_MONGO_URI: &str = "RSINIT_MONGO_URI";
/// Overrides the admin password.
pub const ENV_ADMIN_PASSWORD: &str = "RSINIT_ADMIN_PASSWORD";
/// Path to a file holding the admin password.
pub const ENV_ADMIN_PASSWORD_FILE: &str = "RSINIT_ADMIN_PASSWORD_FILE";

/// Main application configuration.
///
/// Every table is optional; the defaults reproduce a local `rs0` set on
/// `localhost:27017` with a `root` account. Load from a TOML file using
/// [`Config::load`] or parse directly with [`Config::parse_toml`].
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// How to reach the node.
    #[serde(default)]
    pub connection: MongoSettings,

    /// Replica set to form.
    #[serde(default)]
    pub replica_set: ReplicaSetConfig,

    /// Account to provision once the node is primary.
    #[serde(default)]
    pub principal: PrincipalConfig,

    /// Readiness polling policy.
    #[serde(default)]
    pub polling: PollingConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content, applying overrides from the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - The password file cannot be read
    /// - Validation fails
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML content with an explicit environment
    /// lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::parse_toml`].
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(&env)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    fn apply_env<F>(&mut self, env: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = env(ENV_MONGO_URI).filter(|uri| !uri.is_empty()) {
            self.connection.uri = uri;
        }

        if self.principal.password.is_some() {
            self.principal.password_source = PasswordSource::ConfigFile;
        }

        if let Some(password) = env(ENV_ADMIN_PASSWORD).filter(|p| !p.is_empty()) {
            self.principal.password = Some(password);
            self.principal.password_source = PasswordSource::Environment;
        } else if let Some(path) = env(ENV_ADMIN_PASSWORD_FILE) {
            let contents = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            let password = contents.trim().to_string();
            if password.is_empty() {
                return Err(ConfigError::MissingField {
                    field: ENV_ADMIN_PASSWORD_FILE,
                }
                .into());
            }
            self.principal.password = Some(password);
            self.principal.password_source = PasswordSource::File;
        }

        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Checks numeric ranges, then builds the domain specs so their invariants
    /// are enforced at load time rather than mid-run.
    fn validate(&self) -> Result<()> {
        Self::validate_uri(&self.connection.uri)?;
        if self.connection.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.connection.server_selection_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server_selection_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.polling.interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.polling.max_attempts == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }
        if self.polling.max_wait_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_wait_secs",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }

        if self.principal.password.is_none() {
            return Err(ConfigError::MissingField {
                field: "principal.password",
            }
            .into());
        }

        self.replica_set_spec()?;
        self.principal_spec()?;

        Ok(())
    }

    /// Check that `uri` is a well-formed MongoDB connection string.
    ///
    /// Parsing is offline; SRV records are not resolved.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the string is blank or malformed.
    pub fn validate_uri(uri: &str) -> Result<()> {
        if uri.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "uri" }.into());
        }
        ConnectionString::parse(uri).map_err(|e| ConfigError::InvalidValue {
            field: "uri",
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validated replica-set spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured set violates its invariants.
    pub fn replica_set_spec(&self) -> Result<ReplicaSetSpec> {
        Ok(self.replica_set.to_spec()?)
    }

    /// Validated principal spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured principal violates its invariants.
    pub fn principal_spec(&self) -> Result<PrincipalSpec> {
        Ok(self.principal.to_spec()?)
    }

    /// Readiness polling policy.
    #[must_use]
    pub fn poll_policy(&self) -> PollPolicy {
        self.polling.policy()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::DomainError;
    use crate::error::Error;
    use crate::testkit::config::VALID_TOML;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn parses_full_document() {
        let config = Config::parse_toml_with_env(VALID_TOML, no_env).unwrap();
        let set = config.replica_set_spec().unwrap();
        assert_eq!(set.name(), "rs0");
        assert_eq!(set.members()[0].host(), "localhost:27017");

        let principal = config.principal_spec().unwrap();
        assert_eq!(principal.name(), "root");
        assert_eq!(principal.password(), "s3cret");
        assert_eq!(config.principal.password_source, PasswordSource::ConfigFile);
        assert_eq!(config.poll_policy().interval, Duration::from_secs(1));
    }

    #[test]
    fn defaults_match_local_single_node() {
        let config =
            Config::parse_toml_with_env("[principal]\npassword = \"pw\"\n", no_env).unwrap();
        assert_eq!(config.replica_set.name, "rs0");
        assert_eq!(config.replica_set.members[0].host, "localhost:27017");
        assert_eq!(config.replica_set.members[0].priority, 1.0);
        assert_eq!(config.principal.database, "admin");
        assert_eq!(config.principal.roles[0].role, "root");
        assert_eq!(config.polling.interval_ms, 1000);
        assert!(config.polling.max_attempts.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn env_password_overrides_file_value() {
        let config = Config::parse_toml_with_env(VALID_TOML, |key| {
            (key == ENV_ADMIN_PASSWORD).then(|| "from-env".to_string())
        })
        .unwrap();
        assert_eq!(config.principal_spec().unwrap().password(), "from-env");
        assert_eq!(config.principal.password_source, PasswordSource::Environment);
    }

    #[test]
    fn password_file_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("password");
        std::fs::write(&path, "file-secret\n").unwrap();
        let path_str = path.to_string_lossy().to_string();

        let config = Config::parse_toml_with_env("", |key| {
            (key == ENV_ADMIN_PASSWORD_FILE).then(|| path_str.clone())
        })
        .unwrap();
        assert_eq!(config.principal_spec().unwrap().password(), "file-secret");
        assert_eq!(config.principal.password_source, PasswordSource::File);
    }

    #[test]
    fn env_uri_override() {
        let config = Config::parse_toml_with_env(VALID_TOML, |key| {
            (key == ENV_MONGO_URI).then(|| "mongodb://db:27018".to_string())
        })
        .unwrap();
        assert_eq!(config.connection.uri, "mongodb://db:27018");
    }

    #[test]
    fn missing_password_is_rejected() {
        let err = Config::parse_toml_with_env("", no_env).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "principal.password"
            })
        ));
    }

    #[test]
    fn uri_without_scheme_is_rejected() {
        let err = Config::parse_toml_with_env(VALID_TOML, |key| {
            (key == ENV_MONGO_URI).then(|| "localhost:27017".to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "uri", .. })
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let doc = VALID_TOML.replace("interval_ms = 1000", "interval_ms = 0");
        let err = Config::parse_toml_with_env(&doc, no_env).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "interval_ms",
                ..
            })
        ));
    }

    #[test]
    fn zero_max_attempts_is_rejected() {
        let doc = VALID_TOML.replace("interval_ms = 1000", "interval_ms = 1000\nmax_attempts = 0");
        let err = Config::parse_toml_with_env(&doc, no_env).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "max_attempts",
                ..
            })
        ));
    }

    #[test]
    fn domain_invariants_checked_at_load() {
        let doc = VALID_TOML.replace("priority = 1.0", "priority = -2.0");
        let err = Config::parse_toml_with_env(&doc, no_env).unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::InvalidPriority { .. })
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Config::parse_toml_with_env("[replica_set\n", no_env).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn bounded_policy_from_config() {
        let doc = VALID_TOML.replace(
            "interval_ms = 1000",
            "interval_ms = 250\nmax_attempts = 40\nmax_wait_secs = 30",
        );
        let policy = Config::parse_toml_with_env(&doc, no_env)
            .unwrap()
            .poll_policy();
        assert_eq!(policy.interval, Duration::from_millis(250));
        assert_eq!(policy.max_attempts, Some(40));
        assert_eq!(policy.max_wait, Some(Duration::from_secs(30)));
    }
}
