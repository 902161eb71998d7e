//! Bootstrap orchestrator.
//!
//! Sequences replica-set formation, readiness polling and principal
//! provisioning. Both remote writes tolerate having already been applied, so
//! a run that crashed half-way can simply be started again.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::readiness::{PollPolicy, PollReport, ReadinessPoller};
use super::shutdown;
use crate::domain::{FormationOutcome, PrincipalSpec, ProvisionOutcome, ReplicaSetSpec};
use crate::error::{BootstrapError, BootstrapStage, ReadinessError};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::service::ServiceClient;

/// What a successful run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub formation: FormationOutcome,
    pub readiness: PollReport,
    pub provision: ProvisionOutcome,
}

/// Drives one end-to-end bootstrap run against a single node.
pub struct BootstrapOrchestrator {
    client: Arc<dyn ServiceClient>,
    clock: Arc<dyn Clock>,
    policy: PollPolicy,
    stage: watch::Sender<BootstrapStage>,
}

impl BootstrapOrchestrator {
    pub fn new(client: Arc<dyn ServiceClient>, clock: Arc<dyn Clock>, policy: PollPolicy) -> Self {
        let (stage, _) = watch::channel(BootstrapStage::Formation);
        Self {
            client,
            clock,
            policy,
            stage,
        }
    }

    /// Step the most recent run reached.
    #[must_use]
    pub fn current_stage(&self) -> BootstrapStage {
        *self.stage.borrow()
    }

    /// Run the bootstrap sequence with no external shutdown signal.
    pub async fn run(
        &self,
        replica_set: &ReplicaSetSpec,
        principal: &PrincipalSpec,
    ) -> Result<BootstrapReport, BootstrapError> {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        self.run_with_shutdown(replica_set, principal, shutdown_rx)
            .await
    }

    /// Run the bootstrap sequence, aborting with
    /// [`BootstrapError::Cancelled`] once `shutdown` flips to `true`.
    ///
    /// Shutdown is checked before every remote call and between poll
    /// iterations.
    pub async fn run_with_shutdown(
        &self,
        replica_set: &ReplicaSetSpec,
        principal: &PrincipalSpec,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<BootstrapReport, BootstrapError> {
        let service = self.client.service_name();
        info!(
            service,
            set = replica_set.name(),
            member = replica_set.members().first().map_or("", |m| m.host()),
            "Starting bootstrap"
        );

        self.stage.send_replace(BootstrapStage::Formation);
        ensure_running(&shutdown, BootstrapStage::Formation)?;
        let formation = match self.client.form_replica_set(replica_set).await {
            Ok(FormationOutcome::Initiated) => {
                info!(set = replica_set.name(), "Replica set initiated");
                FormationOutcome::Initiated
            }
            Ok(FormationOutcome::AlreadyInitiated) => {
                info!(
                    set = replica_set.name(),
                    "Replica set already initiated, continuing"
                );
                FormationOutcome::AlreadyInitiated
            }
            Err(e) => {
                warn!(error = %e, "Replica set formation failed");
                return Err(BootstrapError::Formation(e));
            }
        };

        self.stage.send_replace(BootstrapStage::Readiness);
        let mut poller = ReadinessPoller::new(
            Arc::clone(&self.client),
            Arc::clone(&self.clock),
            self.policy,
        );
        let readiness = poller
            .wait_until_ready(&mut shutdown)
            .await
            .map_err(|e| match e {
                ReadinessError::Cancelled => BootstrapError::Cancelled {
                    stage: BootstrapStage::Readiness,
                },
                other => BootstrapError::Readiness(other),
            })?;

        self.stage.send_replace(BootstrapStage::Provisioning);
        ensure_running(&shutdown, BootstrapStage::Provisioning)?;
        let provision = match self.client.create_principal(principal).await {
            Ok(ProvisionOutcome::Created) => {
                info!(
                    principal = principal.name(),
                    database = principal.database(),
                    "Principal created"
                );
                ProvisionOutcome::Created
            }
            Ok(ProvisionOutcome::AlreadyExists) => {
                info!(
                    principal = principal.name(),
                    "Principal already exists, nothing to do"
                );
                ProvisionOutcome::AlreadyExists
            }
            Err(e) => {
                warn!(error = %e, principal = principal.name(), "Provisioning failed");
                return Err(BootstrapError::Provisioning(e));
            }
        };

        info!(
            attempts = readiness.attempts,
            %formation,
            %provision,
            "Bootstrap complete"
        );

        Ok(BootstrapReport {
            formation,
            readiness,
            provision,
        })
    }
}

fn ensure_running(
    shutdown: &watch::Receiver<bool>,
    stage: BootstrapStage,
) -> Result<(), BootstrapError> {
    if shutdown::is_requested(shutdown) {
        warn!(%stage, "Shutdown requested, aborting bootstrap");
        return Err(BootstrapError::Cancelled { stage });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::ServiceError;
    use crate::testkit::clock::ManualClock;
    use crate::testkit::config::{bounded_poll_policy, poll_policy};
    use crate::testkit::domain::{replica_set, root_principal};
    use crate::testkit::service::{ScriptedServiceClient, ServiceCall};

    fn orchestrator(
        client: &ScriptedServiceClient,
        clock: &ManualClock,
        policy: PollPolicy,
    ) -> BootstrapOrchestrator {
        BootstrapOrchestrator::new(Arc::new(client.clone()), Arc::new(clock.clone()), policy)
    }

    #[tokio::test]
    async fn full_sequence_in_order() {
        let client = ScriptedServiceClient::new().with_readiness_sequence(&[false, false, true]);
        let clock = ManualClock::new();

        let report = orchestrator(&client, &clock, poll_policy())
            .run(&replica_set(), &root_principal())
            .await
            .unwrap();

        assert_eq!(report.formation, FormationOutcome::Initiated);
        assert_eq!(report.provision, ProvisionOutcome::Created);
        assert_eq!(report.readiness.attempts, 3);
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(1); 2]);
        assert_eq!(
            client.calls(),
            vec![
                ServiceCall::FormReplicaSet {
                    set_name: "rs0".into()
                },
                ServiceCall::QueryReadiness,
                ServiceCall::QueryReadiness,
                ServiceCall::QueryReadiness,
                ServiceCall::CreatePrincipal {
                    name: "root".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn already_initiated_is_not_fatal() {
        let client = ScriptedServiceClient::new()
            .with_formation_results(vec![Ok(FormationOutcome::AlreadyInitiated)]);
        let clock = ManualClock::new();

        let report = orchestrator(&client, &clock, poll_policy())
            .run(&replica_set(), &root_principal())
            .await
            .unwrap();

        assert_eq!(report.formation, FormationOutcome::AlreadyInitiated);
        assert_eq!(client.provision_count(), 1);
    }

    #[tokio::test]
    async fn formation_error_aborts_before_polling() {
        let client = ScriptedServiceClient::new().with_formation_results(vec![Err(
            ServiceError::non_transient("replSetInitiate", "InvalidReplicaSetConfig"),
        )]);
        let clock = ManualClock::new();

        let err = orchestrator(&client, &clock, poll_policy())
            .run(&replica_set(), &root_principal())
            .await
            .unwrap_err();

        assert!(matches!(err, BootstrapError::Formation(_)));
        assert_eq!(client.readiness_count(), 0);
        assert_eq!(client.provision_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_principal_is_success() {
        let client = ScriptedServiceClient::new()
            .with_provision_results(vec![Ok(ProvisionOutcome::AlreadyExists)]);
        let clock = ManualClock::new();

        let report = orchestrator(&client, &clock, poll_policy())
            .run(&replica_set(), &root_principal())
            .await
            .unwrap();

        assert_eq!(report.provision, ProvisionOutcome::AlreadyExists);
    }

    #[tokio::test]
    async fn current_stage_tracks_progress() {
        let clock = ManualClock::new();

        let rejecting = ScriptedServiceClient::new().with_readiness_fallback(Err(
            ServiceError::non_transient("hello", "malformed reply"),
        ));
        let stopped = orchestrator(&rejecting, &clock, poll_policy());
        assert_eq!(stopped.current_stage(), BootstrapStage::Formation);
        let _ = stopped.run(&replica_set(), &root_principal()).await;
        assert_eq!(stopped.current_stage(), BootstrapStage::Readiness);

        let healthy = ScriptedServiceClient::new();
        let finished = orchestrator(&healthy, &clock, poll_policy());
        finished.run(&replica_set(), &root_principal()).await.unwrap();
        assert_eq!(finished.current_stage(), BootstrapStage::Provisioning);
    }

    #[tokio::test]
    async fn provisioning_error_is_fatal() {
        let client = ScriptedServiceClient::new().with_provision_results(vec![Err(
            ServiceError::non_transient("createUser", "not authorized on admin"),
        )]);
        let clock = ManualClock::new();

        let err = orchestrator(&client, &clock, poll_policy())
            .run(&replica_set(), &root_principal())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), BootstrapStage::Provisioning);
    }

    #[tokio::test]
    async fn readiness_failure_never_provisions() {
        let client = ScriptedServiceClient::new().with_readiness_fallback(Err(
            ServiceError::non_transient("hello", "malformed reply"),
        ));
        let clock = ManualClock::new();

        let err = orchestrator(&client, &clock, poll_policy())
            .run(&replica_set(), &root_principal())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BootstrapError::Readiness(ReadinessError::Rejected(_))
        ));
        assert_eq!(client.provision_count(), 0);
    }

    #[tokio::test]
    async fn exhausted_budget_never_provisions() {
        let client = ScriptedServiceClient::new().with_readiness_sequence(&[false, false, false]);
        let clock = ManualClock::new();

        let err = orchestrator(&client, &clock, bounded_poll_policy(2))
            .run(&replica_set(), &root_principal())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            BootstrapError::Readiness(ReadinessError::AttemptsExhausted { attempts: 2 })
        );
        assert_eq!(client.provision_count(), 0);
    }

    #[tokio::test]
    async fn cancelled_while_polling() {
        let client = ScriptedServiceClient::new().with_readiness_sequence(&[false, false, true]);
        let (tx, rx) = watch::channel(false);
        let clock = ManualClock::new().on_sleep(move |_| {
            let _ = tx.send(true);
        });

        let err = orchestrator(&client, &clock, poll_policy())
            .run_with_shutdown(&replica_set(), &root_principal(), rx)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            BootstrapError::Cancelled {
                stage: BootstrapStage::Readiness
            }
        );
        assert_eq!(client.readiness_count(), 1);
        assert_eq!(client.provision_count(), 0);
    }

    #[tokio::test]
    async fn cancelled_before_start_issues_no_calls() {
        let client = ScriptedServiceClient::new();
        let clock = ManualClock::new();
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let err = orchestrator(&client, &clock, poll_policy())
            .run_with_shutdown(&replica_set(), &root_principal(), rx)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            BootstrapError::Cancelled {
                stage: BootstrapStage::Formation
            }
        );
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn rerun_after_partial_failure_succeeds() {
        let client = ScriptedServiceClient::new()
            .with_formation_results(vec![
                Ok(FormationOutcome::Initiated),
                Ok(FormationOutcome::AlreadyInitiated),
            ])
            .with_provision_results(vec![
                Err(ServiceError::transient("createUser", "connection reset")),
                Ok(ProvisionOutcome::AlreadyExists),
            ]);
        let clock = ManualClock::new();
        let orchestrator = orchestrator(&client, &clock, poll_policy());

        let first = orchestrator.run(&replica_set(), &root_principal()).await;
        assert!(matches!(first, Err(BootstrapError::Provisioning(_))));

        let second = orchestrator
            .run(&replica_set(), &root_principal())
            .await
            .unwrap();
        assert_eq!(second.formation, FormationOutcome::AlreadyInitiated);
        assert_eq!(second.provision, ProvisionOutcome::AlreadyExists);
        assert_eq!(client.formation_count(), 2);
    }
}
