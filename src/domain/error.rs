//! Domain validation errors for bootstrap specs.
//!
//! These errors are returned by the `try_new` constructors of
//! [`ReplicaSetSpec`](super::replica_set::ReplicaSetSpec) and
//! [`PrincipalSpec`](super::principal::PrincipalSpec), so a malformed spec is
//! rejected before anything is sent over the network.
//!
//! # Examples
//!
//! ```
//! use rsinit::domain::error::DomainError;
//! use rsinit::domain::replica_set::ReplicaSetSpec;
//!
//! let result = ReplicaSetSpec::try_new("", vec![]);
//! assert!(matches!(result, Err(DomainError::EmptySetName)));
//! ```

use thiserror::Error;

/// Errors that occur when a bootstrap spec violates its invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Replica sets need a non-empty `_id`.
    #[error("replica set name cannot be empty")]
    EmptySetName,

    /// Single-node bootstrap takes exactly one member.
    #[error("replica set must have exactly one member, got {count}")]
    MemberCount {
        /// Number of members that were provided.
        count: usize,
    },

    /// Every member needs a `host:port` address.
    #[error("member address cannot be empty")]
    EmptyMemberAddress,

    /// Election priority must be a finite, non-negative number.
    #[error("member priority must be finite and non-negative, got {priority}")]
    InvalidPriority {
        /// The rejected priority.
        priority: f64,
    },

    /// Principals need an account name.
    #[error("principal name cannot be empty")]
    EmptyPrincipalName,

    /// Principals need a credential.
    #[error("principal credential cannot be empty")]
    EmptyCredential,

    /// Principals are created against a database.
    #[error("principal database cannot be empty")]
    EmptyPrincipalDatabase,

    /// Principals need at least one role grant.
    #[error("principal must have at least one role grant")]
    NoRoles,

    /// Role grants need both a role name and a database scope.
    #[error("role grant at index {index} must name a role and a database")]
    InvalidRoleGrant {
        /// Position of the offending grant.
        index: usize,
    },
}
