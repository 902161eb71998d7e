//! Admin principal configuration.

use std::fmt;

use serde::Deserialize;

use crate::domain::{DomainError, PrincipalSpec, RoleGrant};

/// `[principal]` table.
///
/// The password may be given inline, but `RSINIT_ADMIN_PASSWORD` or
/// `RSINIT_ADMIN_PASSWORD_FILE` take precedence.
#[derive(Clone, Deserialize)]
pub struct PrincipalConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub password: Option<String>,
    /// Database the account is created in.
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_roles")]
    pub roles: Vec<RoleConfig>,
    /// Where the effective password came from. Set during loading.
    #[serde(skip)]
    pub password_source: PasswordSource,
}

/// `[[principal.roles]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleConfig {
    pub role: String,
    #[serde(default = "default_database")]
    pub db: String,
}

/// Origin of the principal's password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordSource {
    #[default]
    Missing,
    ConfigFile,
    Environment,
    File,
}

impl fmt::Display for PasswordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "not set"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Environment => write!(f, "RSINIT_ADMIN_PASSWORD"),
            Self::File => write!(f, "RSINIT_ADMIN_PASSWORD_FILE"),
        }
    }
}

fn default_name() -> String {
    "root".to_string()
}

fn default_database() -> String {
    "admin".to_string()
}

fn default_roles() -> Vec<RoleConfig> {
    vec![RoleConfig {
        role: "root".to_string(),
        db: default_database(),
    }]
}

impl PrincipalConfig {
    /// Build the validated domain spec.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the principal violates its invariants. A
    /// missing password surfaces as [`DomainError::EmptyCredential`].
    pub fn to_spec(&self) -> Result<PrincipalSpec, DomainError> {
        let roles = self
            .roles
            .iter()
            .map(|grant| RoleGrant::new(grant.role.clone(), grant.db.clone()))
            .collect();
        PrincipalSpec::try_new(
            self.name.clone(),
            self.password.clone().unwrap_or_default(),
            self.database.clone(),
            roles,
        )
    }
}

impl fmt::Debug for PrincipalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrincipalConfig")
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("roles", &self.roles)
            .field("password_source", &self.password_source)
            .finish()
    }
}

impl Default for PrincipalConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            password: None,
            database: default_database(),
            roles: default_roles(),
            password_source: PasswordSource::Missing,
        }
    }
}
