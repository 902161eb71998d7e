//! Transport-agnostic bootstrap values.
//!
//! Every type here is a value object owned by a single bootstrap run.

pub mod error;
pub mod principal;
pub mod readiness;
pub mod replica_set;

pub use error::DomainError;
pub use principal::{PrincipalSpec, RoleGrant};
pub use readiness::{FormationOutcome, ProvisionOutcome, ReadinessStatus};
pub use replica_set::{MemberSpec, ReplicaSetSpec};
