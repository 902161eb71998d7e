//! Replica-set formation types.
//!
//! - [`MemberSpec`] - A single voting member (address + election priority)
//! - [`ReplicaSetSpec`] - The configuration document sent to `replSetInitiate`

use std::result::Result;

use super::error::DomainError;

/// A replica-set member descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSpec {
    host: String,
    priority: f64,
}

impl MemberSpec {
    /// Create a new member descriptor.
    pub fn new(host: impl Into<String>, priority: f64) -> Self {
        Self {
            host: host.into(),
            priority,
        }
    }

    /// Network address in `host:port` form.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Election priority.
    #[must_use]
    pub const fn priority(&self) -> f64 {
        self.priority
    }
}

/// Replica-set configuration requested at formation time.
///
/// Only constructible through [`ReplicaSetSpec::try_new`], so every value in
/// circulation already satisfies the single-node invariants.
///
/// # Example
///
/// ```
/// use rsinit::domain::replica_set::{MemberSpec, ReplicaSetSpec};
///
/// let spec = ReplicaSetSpec::try_new("rs0", vec![MemberSpec::new("localhost:27017", 1.0)])
///     .unwrap();
/// assert_eq!(spec.name(), "rs0");
/// assert_eq!(spec.members().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicaSetSpec {
    name: String,
    members: Vec<MemberSpec>,
}

impl ReplicaSetSpec {
    /// Create a replica-set spec with domain invariant validation.
    ///
    /// # Domain Invariants
    ///
    /// - `name` must not be empty
    /// - exactly one member
    /// - member addresses must not be empty
    /// - priorities must be finite and `>= 0`
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if any invariant is violated.
    pub fn try_new(name: impl Into<String>, members: Vec<MemberSpec>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptySetName);
        }

        if members.len() != 1 {
            return Err(DomainError::MemberCount {
                count: members.len(),
            });
        }

        for member in &members {
            if member.host.trim().is_empty() {
                return Err(DomainError::EmptyMemberAddress);
            }
            if !member.priority.is_finite() || member.priority < 0.0 {
                return Err(DomainError::InvalidPriority {
                    priority: member.priority,
                });
            }
        }

        Ok(Self { name, members })
    }

    /// Replica-set identifier (`_id`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in the order they are assigned `_id`s.
    #[must_use]
    pub fn members(&self) -> &[MemberSpec] {
        &self.members
    }
}
