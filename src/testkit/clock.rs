//! Virtual-time [`Clock`] for deterministic polling tests.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::port::outbound::clock::Clock;

type SleepHook = Box<dyn Fn(usize) + Send + Sync>;

/// A clock whose time only moves when something sleeps on it.
///
/// Every `sleep` is recorded and advances virtual time by the requested
/// duration, then returns immediately. An optional hook runs on each sleep
/// with the 1-based sleep count, e.g. to fire a shutdown signal mid-poll.
#[derive(Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
    hook: Arc<Mutex<Option<SleepHook>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
            sleeps: Arc::new(Mutex::new(Vec::new())),
            hook: Arc::new(Mutex::new(None)),
        }
    }

    /// Run `hook` after each sleep has advanced time.
    pub fn on_sleep(self, hook: impl Fn(usize) + Send + Sync + 'static) -> Self {
        *self.hook.lock().expect("lock hook") = Some(Box::new(hook));
        self
    }

    /// Move virtual time forward without recording a sleep.
    pub fn advance(&self, by: Duration) {
        *self.offset.lock().expect("lock offset") += by;
    }

    /// Durations passed to `sleep`, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().expect("lock sleeps").clone()
    }

    pub fn sleep_count(&self) -> usize {
        self.sleeps.lock().expect("lock sleeps").len()
    }

    /// Total virtual time elapsed since construction.
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock().expect("lock offset")
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock().expect("lock offset")
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        let count = {
            let mut sleeps = self.sleeps.lock().expect("lock sleeps");
            sleeps.push(duration);
            sleeps.len()
        };
        if let Some(hook) = self.hook.lock().expect("lock hook").as_ref() {
            hook(count);
        }
        tokio::task::yield_now().await;
    }
}
