//! Injectable clock and suspension point.
//!
//! All pacing/retry waits and record timestamps go through this trait so
//! tests can assert requested durations and pin times without real elapsed
//! time.

use async_trait::async_trait;
use std::time::Duration;

use payrun_types::Timestamp;

#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Current time, used for persisted record timestamps.
    fn now(&self) -> Timestamp;

    /// Suspend cooperatively for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Real scheduler backed by the system clock and the tokio timer.
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
