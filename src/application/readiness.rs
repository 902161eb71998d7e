//! Readiness poller.
//!
//! Turns an initially unready node into a confirmed-primary signal by
//! querying status at a fixed interval. Election on a single-node set is
//! short and bounded, so the interval never grows.
//!
//! ```text
//!            false / transient error (after sleep)
//!              ┌──────────┐
//!              ▼          │
//!          ┌─────────┐────┘   first true   ┌───────┐
//!  start ─▶│ Polling │───────────────────▶│ Ready │
//!          └─────────┘                     └───────┘
//!               │ non-transient error, budget exceeded, cancelled
//!               ▼
//!          ┌────────┐
//!          │ Failed │
//!          └────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::shutdown;
use crate::error::ReadinessError;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::service::ServiceClient;

/// Retry policy for readiness polling.
///
/// Unbounded unless `max_attempts` or `max_wait` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Fixed delay between status queries.
    pub interval: Duration,
    /// Give up after this many status queries.
    pub max_attempts: Option<u32>,
    /// Give up once this much time has passed since polling started.
    pub max_wait: Option<Duration>,
}

impl PollPolicy {
    /// Unbounded policy with the given interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            max_wait: None,
        }
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    #[must_use]
    pub const fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

/// Poller state. `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Polling,
    Ready,
    Failed,
}

/// Summary of a successful poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// Status queries issued, including the one that observed primary.
    pub attempts: u32,
    /// Time from the first query to the ready observation.
    pub elapsed: Duration,
}

/// Polls a node until it reports itself primary.
pub struct ReadinessPoller {
    client: Arc<dyn ServiceClient>,
    clock: Arc<dyn Clock>,
    policy: PollPolicy,
    state: PollState,
    outcome: Option<Result<PollReport, ReadinessError>>,
}

impl ReadinessPoller {
    pub fn new(client: Arc<dyn ServiceClient>, clock: Arc<dyn Clock>, policy: PollPolicy) -> Self {
        Self {
            client,
            clock,
            policy,
            state: PollState::Polling,
            outcome: None,
        }
    }

    /// Current state of the poller.
    #[must_use]
    pub const fn state(&self) -> PollState {
        self.state
    }

    /// Poll until the node is primary, a fatal error occurs, the budget runs
    /// out or shutdown is requested.
    ///
    /// Transient query failures are treated as "not yet ready".
    ///
    /// # Errors
    ///
    /// Returns a [`ReadinessError`] describing why polling stopped. Once the
    /// poller is in a terminal state, further calls return the same result
    /// without querying.
    pub async fn wait_until_ready(
        &mut self,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<PollReport, ReadinessError> {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let started = self.clock.now();
        let mut attempts: u32 = 0;

        loop {
            if shutdown::is_requested(shutdown) {
                return Err(self.fail(ReadinessError::Cancelled));
            }

            attempts = attempts.saturating_add(1);
            match self.client.query_readiness().await {
                Ok(status) if status.is_ready() => {
                    let elapsed = self.clock.now().saturating_duration_since(started);
                    let report = PollReport { attempts, elapsed };
                    self.state = PollState::Ready;
                    self.outcome = Some(Ok(report));
                    info!(attempts, elapsed_ms = elapsed.as_millis(), "Node is primary");
                    return Ok(report);
                }
                Ok(_) => {
                    debug!(attempt = attempts, "Node not primary yet");
                }
                Err(e) if e.is_transient() => {
                    warn!(attempt = attempts, error = %e, "Status query failed, will retry");
                }
                Err(e) => {
                    return Err(self.fail(ReadinessError::Rejected(e)));
                }
            }

            if let Some(max_attempts) = self.policy.max_attempts {
                if attempts >= max_attempts {
                    return Err(self.fail(ReadinessError::AttemptsExhausted { attempts }));
                }
            }

            let cancelled = tokio::select! {
                biased;
                () = shutdown::requested(shutdown) => true,
                () = self.clock.sleep(self.policy.interval) => false,
            };
            if cancelled {
                return Err(self.fail(ReadinessError::Cancelled));
            }

            if let Some(max_wait) = self.policy.max_wait {
                let elapsed = self.clock.now().saturating_duration_since(started);
                if elapsed >= max_wait {
                    return Err(self.fail(ReadinessError::DeadlineExceeded { elapsed, attempts }));
                }
            }
        }
    }

    fn fail(&mut self, error: ReadinessError) -> ReadinessError {
        self.state = PollState::Failed;
        self.outcome = Some(Err(error.clone()));
        warn!(service = self.client.service_name(), error = %error, "Readiness polling stopped");
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::testkit::clock::ManualClock;
    use crate::testkit::config::{bounded_poll_policy, poll_policy};
    use crate::testkit::service::ScriptedServiceClient;

    fn poller(
        client: &ScriptedServiceClient,
        clock: &ManualClock,
        policy: PollPolicy,
    ) -> ReadinessPoller {
        ReadinessPoller::new(Arc::new(client.clone()), Arc::new(clock.clone()), policy)
    }

    #[tokio::test]
    async fn ready_on_first_true_observation() {
        let client = ScriptedServiceClient::new().with_readiness_sequence(&[true]);
        let clock = ManualClock::new();
        let (_tx, mut rx) = watch::channel(false);

        let mut poller = poller(&client, &clock, poll_policy());
        let report = poller.wait_until_ready(&mut rx).await.unwrap();

        assert_eq!(report.attempts, 1);
        assert_eq!(poller.state(), PollState::Ready);
        assert_eq!(client.readiness_count(), 1);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[tokio::test]
    async fn sleeps_interval_between_unready_observations() {
        let client = ScriptedServiceClient::new().with_readiness_sequence(&[false, false, true]);
        let clock = ManualClock::new();
        let (_tx, mut rx) = watch::channel(false);

        let mut poller = poller(&client, &clock, poll_policy());
        let report = poller.wait_until_ready(&mut rx).await.unwrap();

        assert_eq!(report.attempts, 3);
        assert_eq!(report.elapsed, Duration::from_secs(2));
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(1); 2]);
        assert_eq!(client.readiness_count(), 3);
    }

    #[tokio::test]
    async fn transient_errors_are_retried() {
        let client = ScriptedServiceClient::new().with_readiness_results(vec![
            Err(ServiceError::transient("hello", "connection refused")),
            Err(ServiceError::transient("hello", "election in progress")),
            Ok(crate::domain::ReadinessStatus::primary()),
        ]);
        let clock = ManualClock::new();
        let (_tx, mut rx) = watch::channel(false);

        let mut poller = poller(&client, &clock, poll_policy());
        let report = poller.wait_until_ready(&mut rx).await.unwrap();

        assert_eq!(report.attempts, 3);
        assert_eq!(clock.sleep_count(), 2);
    }

    #[tokio::test]
    async fn non_transient_error_fails_immediately() {
        let rejected = ServiceError::non_transient("hello", "authentication failed");
        let client =
            ScriptedServiceClient::new().with_readiness_fallback(Err(rejected.clone()));
        let clock = ManualClock::new();
        let (_tx, mut rx) = watch::channel(false);

        let mut poller = poller(&client, &clock, poll_policy());
        let err = poller.wait_until_ready(&mut rx).await.unwrap_err();

        assert_eq!(err, ReadinessError::Rejected(rejected));
        assert_eq!(poller.state(), PollState::Failed);
        assert_eq!(client.readiness_count(), 1);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[tokio::test]
    async fn attempt_budget_stops_without_trailing_sleep() {
        let client = ScriptedServiceClient::new()
            .with_readiness_fallback(Ok(crate::domain::ReadinessStatus::not_primary()));
        let clock = ManualClock::new();
        let (_tx, mut rx) = watch::channel(false);

        let mut poller = poller(&client, &clock, bounded_poll_policy(3));
        let err = poller.wait_until_ready(&mut rx).await.unwrap_err();

        assert_eq!(err, ReadinessError::AttemptsExhausted { attempts: 3 });
        assert_eq!(client.readiness_count(), 3);
        assert_eq!(clock.sleep_count(), 2);
    }

    #[tokio::test]
    async fn wait_budget_measured_on_clock() {
        let client = ScriptedServiceClient::new()
            .with_readiness_fallback(Ok(crate::domain::ReadinessStatus::not_primary()));
        let clock = ManualClock::new();
        let (_tx, mut rx) = watch::channel(false);
        let policy = poll_policy().with_max_wait(Duration::from_millis(2500));

        let mut poller = poller(&client, &clock, policy);
        let err = poller.wait_until_ready(&mut rx).await.unwrap_err();

        assert_eq!(
            err,
            ReadinessError::DeadlineExceeded {
                elapsed: Duration::from_secs(3),
                attempts: 3,
            }
        );
    }

    #[tokio::test]
    async fn cancellation_before_first_query() {
        let client = ScriptedServiceClient::new();
        let clock = ManualClock::new();
        let (tx, mut rx) = watch::channel(false);
        tx.send(true).unwrap();

        let mut poller = poller(&client, &clock, poll_policy());
        let err = poller.wait_until_ready(&mut rx).await.unwrap_err();

        assert_eq!(err, ReadinessError::Cancelled);
        assert_eq!(client.readiness_count(), 0);
    }

    #[tokio::test]
    async fn cancellation_between_iterations() {
        let client = ScriptedServiceClient::new()
            .with_readiness_fallback(Ok(crate::domain::ReadinessStatus::not_primary()));
        let (tx, mut rx) = watch::channel(false);
        let clock = ManualClock::new().on_sleep(move |count| {
            if count == 2 {
                let _ = tx.send(true);
            }
        });

        let mut poller = poller(&client, &clock, poll_policy());
        let err = poller.wait_until_ready(&mut rx).await.unwrap_err();

        assert_eq!(err, ReadinessError::Cancelled);
        assert_eq!(poller.state(), PollState::Failed);
        assert_eq!(client.readiness_count(), 2);
    }

    #[tokio::test]
    async fn terminal_state_is_not_reentered() {
        let client = ScriptedServiceClient::new().with_readiness_sequence(&[true]);
        let clock = ManualClock::new();
        let (_tx, mut rx) = watch::channel(false);

        let mut poller = poller(&client, &clock, poll_policy());
        poller.wait_until_ready(&mut rx).await.unwrap();
        poller.wait_until_ready(&mut rx).await.unwrap();

        assert_eq!(client.readiness_count(), 1);
    }
}
