use std::sync::Arc;
use std::time::Duration;

use rsinit::application::bootstrap::BootstrapOrchestrator;
use rsinit::application::readiness::PollPolicy;
use rsinit::domain::{
    FormationOutcome, MemberSpec, PrincipalSpec, ProvisionOutcome, ReplicaSetSpec, RoleGrant,
};
use rsinit::error::{BootstrapError, BootstrapStage, Error, ReadinessError, ServiceError};
use rsinit::testkit::clock::ManualClock;
use rsinit::testkit::service::{ScriptedServiceClient, ServiceCall};
use tokio::sync::watch;

fn rs0() -> ReplicaSetSpec {
    ReplicaSetSpec::try_new("rs0", vec![MemberSpec::new("localhost:27017", 1.0)]).unwrap()
}

fn root() -> PrincipalSpec {
    PrincipalSpec::try_new("root", "root", "admin", vec![RoleGrant::new("root", "admin")]).unwrap()
}

fn orchestrator(
    client: &ScriptedServiceClient,
    clock: &ManualClock,
    policy: PollPolicy,
) -> BootstrapOrchestrator {
    BootstrapOrchestrator::new(Arc::new(client.clone()), Arc::new(clock.clone()), policy)
}

#[tokio::test]
async fn end_to_end_fresh_node() {
    let client = ScriptedServiceClient::new().with_readiness_sequence(&[false, false, true]);
    let clock = ManualClock::new();

    let result = orchestrator(&client, &clock, PollPolicy::new(Duration::from_secs(1)))
        .run(&rs0(), &root())
        .await;

    let report = result.unwrap();
    assert_eq!(report.formation, FormationOutcome::Initiated);
    assert_eq!(report.provision, ProvisionOutcome::Created);
    assert_eq!(client.formation_count(), 1);
    assert_eq!(client.readiness_count(), 3);
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(1); 2]);
    assert_eq!(client.provision_count(), 1);
    assert_eq!(
        client.calls().last(),
        Some(&ServiceCall::CreatePrincipal {
            name: "root".into()
        })
    );
}

#[tokio::test]
async fn readiness_always_rejected_is_fatal() {
    let client = ScriptedServiceClient::new().with_readiness_fallback(Err(
        ServiceError::non_transient("hello", "unexpected reply"),
    ));
    let clock = ManualClock::new();

    let err = orchestrator(&client, &clock, PollPolicy::default())
        .run(&rs0(), &root())
        .await
        .unwrap_err();

    assert_eq!(err.stage(), BootstrapStage::Readiness);
    assert_eq!(client.provision_count(), 0);
    assert_eq!(Error::from(err).exit_code(), 4);
}

#[tokio::test]
async fn repeated_runs_against_initialized_node() {
    let client = ScriptedServiceClient::new()
        .with_formation_results(vec![
            Ok(FormationOutcome::AlreadyInitiated),
            Ok(FormationOutcome::AlreadyInitiated),
        ])
        .with_provision_results(vec![
            Ok(ProvisionOutcome::AlreadyExists),
            Ok(ProvisionOutcome::AlreadyExists),
        ]);
    let clock = ManualClock::new();
    let orchestrator = orchestrator(&client, &clock, PollPolicy::default());

    for _ in 0..2 {
        let report = orchestrator.run(&rs0(), &root()).await.unwrap();
        assert_eq!(report.formation, FormationOutcome::AlreadyInitiated);
        assert_eq!(report.provision, ProvisionOutcome::AlreadyExists);
    }
    assert_eq!(client.formation_count(), 2);
}

#[tokio::test]
async fn provisioning_waits_for_primary() {
    let client = ScriptedServiceClient::new().with_readiness_results(vec![
        Err(ServiceError::transient("hello", "connection refused")),
        Ok(rsinit::domain::ReadinessStatus::not_primary()),
        Ok(rsinit::domain::ReadinessStatus::primary()),
    ]);
    let clock = ManualClock::new();

    orchestrator(&client, &clock, PollPolicy::default())
        .run(&rs0(), &root())
        .await
        .unwrap();

    let calls = client.calls();
    let first_provision = calls
        .iter()
        .position(|call| matches!(call, ServiceCall::CreatePrincipal { .. }))
        .unwrap();
    let last_query = calls
        .iter()
        .rposition(|call| *call == ServiceCall::QueryReadiness)
        .unwrap();
    assert!(last_query < first_provision);
    assert_eq!(first_provision, calls.len() - 1);
}

#[tokio::test]
async fn shutdown_between_polls_skips_provisioning() {
    let client = ScriptedServiceClient::new().with_readiness_sequence(&[false, false, false, true]);
    let (tx, rx) = watch::channel(false);
    let clock = ManualClock::new().on_sleep(move |count| {
        if count == 1 {
            let _ = tx.send(true);
        }
    });

    let err = orchestrator(&client, &clock, PollPolicy::default())
        .run_with_shutdown(&rs0(), &root(), rx)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BootstrapError::Cancelled {
            stage: BootstrapStage::Readiness
        }
    );
    assert_eq!(client.provision_count(), 0);
    assert_eq!(Error::from(err).exit_code(), 130);
}

#[tokio::test]
async fn wait_budget_reports_elapsed_time() {
    let client = ScriptedServiceClient::new()
        .with_readiness_fallback(Ok(rsinit::domain::ReadinessStatus::not_primary()));
    let clock = ManualClock::new();
    let policy = PollPolicy::new(Duration::from_millis(500)).with_max_wait(Duration::from_secs(2));

    let err = orchestrator(&client, &clock, policy)
        .run(&rs0(), &root())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BootstrapError::Readiness(ReadinessError::DeadlineExceeded {
            elapsed: Duration::from_secs(2),
            attempts: 4,
        })
    );
    assert_eq!(clock.elapsed(), Duration::from_secs(2));
}
