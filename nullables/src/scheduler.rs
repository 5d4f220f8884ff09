//! Null scheduler — deterministic time, recorded waits.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use payrun_dispatch::Scheduler;
use payrun_types::Timestamp;

struct Inner {
    now_secs: u64,
    sleeps: Vec<Duration>,
}

/// A scheduler that never actually waits.
///
/// `sleep` records the requested duration, advances the virtual clock by
/// it, and returns immediately; `now` reads the virtual clock.
#[derive(Clone)]
pub struct NullScheduler {
    inner: Arc<Mutex<Inner>>,
}

impl NullScheduler {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                now_secs: initial_secs,
                sleeps: Vec::new(),
            })),
        }
    }

    /// Every duration `sleep` has been asked to wait, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.inner.lock().unwrap().sleeps.clone()
    }

    /// Advance the virtual clock without recording a sleep.
    pub fn advance(&self, secs: u64) {
        self.inner.lock().unwrap().now_secs += secs;
    }
}

impl Default for NullScheduler {
    fn default() -> Self {
        Self::new(0)
    }
}

#[async_trait]
impl Scheduler for NullScheduler {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.inner.lock().unwrap().now_secs)
    }

    async fn sleep(&self, duration: Duration) {
        let mut inner = self.inner.lock().unwrap();
        inner.sleeps.push(duration);
        inner.now_secs += duration.as_secs();
    }
}
