//! Principal (administrative account) types.

use std::fmt;
use std::result::Result;

use super::error::DomainError;

/// A role granted to a principal, scoped to a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGrant {
    role: String,
    db: String,
}

impl RoleGrant {
    /// Create a new role grant.
    pub fn new(role: impl Into<String>, db: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            db: db.into(),
        }
    }

    /// Role name, e.g. `root`.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Database the role applies to.
    #[must_use]
    pub fn db(&self) -> &str {
        &self.db
    }
}

impl fmt::Display for RoleGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.role, self.db)
    }
}

/// Account to provision once the node is primary.
///
/// The credential is redacted from `Debug` output so specs can be logged
/// freely.
#[derive(Clone, PartialEq, Eq)]
pub struct PrincipalSpec {
    name: String,
    password: String,
    database: String,
    roles: Vec<RoleGrant>,
}

impl PrincipalSpec {
    /// Create a principal spec with domain invariant validation.
    ///
    /// # Domain Invariants
    ///
    /// - `name`, `password` and `database` must not be empty
    /// - at least one role grant
    /// - every grant names a role and a database
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if any invariant is violated.
    pub fn try_new(
        name: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
        roles: Vec<RoleGrant>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let password = password.into();
        let database = database.into();

        if name.trim().is_empty() {
            return Err(DomainError::EmptyPrincipalName);
        }
        if password.is_empty() {
            return Err(DomainError::EmptyCredential);
        }
        if database.trim().is_empty() {
            return Err(DomainError::EmptyPrincipalDatabase);
        }
        if roles.is_empty() {
            return Err(DomainError::NoRoles);
        }
        if let Some(index) = roles
            .iter()
            .position(|grant| grant.role.trim().is_empty() || grant.db.trim().is_empty())
        {
            return Err(DomainError::InvalidRoleGrant { index });
        }

        Ok(Self {
            name,
            password,
            database,
            roles,
        })
    }

    /// Account name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Credential secret.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Database the account is created in.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Role grants in declaration order.
    #[must_use]
    pub fn roles(&self) -> &[RoleGrant] {
        &self.roles
    }
}

impl fmt::Debug for PrincipalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrincipalSpec")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("roles", &self.roles)
            .finish()
    }
}
