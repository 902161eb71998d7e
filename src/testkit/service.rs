//! Scripted [`ServiceClient`] for bootstrap tests.
//!
//! Each operation pops the next result from its own queue. When a queue is
//! exhausted the configured fallback is returned, so a test can express both
//! finite sequences (`[false, false, true]`) and "always fails" scenarios.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    FormationOutcome, PrincipalSpec, ProvisionOutcome, ReadinessStatus, ReplicaSetSpec,
};
use crate::error::ServiceError;
use crate::port::outbound::service::ServiceClient;

/// A remote call observed by the scripted client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    FormReplicaSet { set_name: String },
    QueryReadiness,
    CreatePrincipal { name: String },
}

type Scripted<T> = Result<T, ServiceError>;

#[derive(Debug)]
struct Script {
    formation: VecDeque<Scripted<FormationOutcome>>,
    readiness: VecDeque<Scripted<ReadinessStatus>>,
    readiness_fallback: Scripted<ReadinessStatus>,
    provision: VecDeque<Scripted<ProvisionOutcome>>,
}

/// A mock service with scripted results and a shared call trace.
#[derive(Clone)]
pub struct ScriptedServiceClient {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<ServiceCall>>>,
}

impl ScriptedServiceClient {
    /// A node that initiates, is immediately primary and creates the account.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                formation: VecDeque::new(),
                readiness: VecDeque::new(),
                readiness_fallback: Ok(ReadinessStatus::primary()),
                provision: VecDeque::new(),
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_formation_results(self, results: Vec<Scripted<FormationOutcome>>) -> Self {
        self.script.lock().expect("lock script").formation = results.into();
        self
    }

    /// Script readiness as a sequence of primary flags.
    pub fn with_readiness_sequence(self, flags: &[bool]) -> Self {
        let results = flags
            .iter()
            .map(|flag| Ok(ReadinessStatus::from_primary_flag(*flag)))
            .collect();
        self.with_readiness_results(results)
    }

    pub fn with_readiness_results(self, results: Vec<Scripted<ReadinessStatus>>) -> Self {
        self.script.lock().expect("lock script").readiness = results.into();
        self
    }

    /// Result returned once the readiness queue is exhausted.
    pub fn with_readiness_fallback(self, result: Scripted<ReadinessStatus>) -> Self {
        self.script.lock().expect("lock script").readiness_fallback = result;
        self
    }

    pub fn with_provision_results(self, results: Vec<Scripted<ProvisionOutcome>>) -> Self {
        self.script.lock().expect("lock script").provision = results.into();
        self
    }

    /// Snapshot of every call made so far, in order.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().expect("lock calls").clone()
    }

    pub fn formation_count(&self) -> usize {
        self.count(|call| matches!(call, ServiceCall::FormReplicaSet { .. }))
    }

    pub fn readiness_count(&self) -> usize {
        self.count(|call| matches!(call, ServiceCall::QueryReadiness))
    }

    pub fn provision_count(&self) -> usize {
        self.count(|call| matches!(call, ServiceCall::CreatePrincipal { .. }))
    }

    fn count(&self, predicate: impl Fn(&ServiceCall) -> bool) -> usize {
        self.calls
            .lock()
            .expect("lock calls")
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    fn record(&self, call: ServiceCall) {
        self.calls.lock().expect("lock calls").push(call);
    }
}

impl Default for ScriptedServiceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceClient for ScriptedServiceClient {
    async fn form_replica_set(
        &self,
        spec: &ReplicaSetSpec,
    ) -> Result<FormationOutcome, ServiceError> {
        self.record(ServiceCall::FormReplicaSet {
            set_name: spec.name().to_string(),
        });
        self.script
            .lock()
            .expect("lock script")
            .formation
            .pop_front()
            .unwrap_or(Ok(FormationOutcome::Initiated))
    }

    async fn query_readiness(&self) -> Result<ReadinessStatus, ServiceError> {
        self.record(ServiceCall::QueryReadiness);
        let mut script = self.script.lock().expect("lock script");
        match script.readiness.pop_front() {
            Some(result) => result,
            None => script.readiness_fallback.clone(),
        }
    }

    async fn create_principal(
        &self,
        spec: &PrincipalSpec,
    ) -> Result<ProvisionOutcome, ServiceError> {
        self.record(ServiceCall::CreatePrincipal {
            name: spec.name().to_string(),
        });
        self.script
            .lock()
            .expect("lock script")
            .provision
            .pop_front()
            .unwrap_or(Ok(ProvisionOutcome::Created))
    }

    fn service_name(&self) -> &'static str {
        "scripted"
    }
}
