//! Data-store administration port.
//!
//! Defines the three remote operations the bootstrap sequence needs from the
//! data-store node. Responses are classified by the adapter into typed
//! outcomes, so callers never inspect raw server messages.

use async_trait::async_trait;

use crate::domain::{
    FormationOutcome, PrincipalSpec, ProvisionOutcome, ReadinessStatus, ReplicaSetSpec,
};
use crate::error::ServiceError;

/// Client for the administrative surface of a data-store node.
///
/// Each method performs exactly one round-trip. Implementations never retry;
/// retry policy belongs to the caller.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
///
/// # Errors
///
/// Methods return [`ServiceError::Transient`] for failures worth retrying
/// (connection refused, election in progress) and
/// [`ServiceError::NonTransient`] for everything else.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Request replica-set formation with the given configuration.
    ///
    /// A node that already carries a replica-set configuration reports
    /// [`FormationOutcome::AlreadyInitiated`] instead of an error.
    async fn form_replica_set(
        &self,
        spec: &ReplicaSetSpec,
    ) -> Result<FormationOutcome, ServiceError>;

    /// Ask the node whether it is currently the elected primary.
    async fn query_readiness(&self) -> Result<ReadinessStatus, ServiceError>;

    /// Create an administrative account.
    ///
    /// An existing account with the same name is reported as
    /// [`ProvisionOutcome::AlreadyExists`] instead of an error.
    async fn create_principal(
        &self,
        spec: &PrincipalSpec,
    ) -> Result<ProvisionOutcome, ServiceError>;

    /// Return the service name for logging.
    fn service_name(&self) -> &'static str;
}
