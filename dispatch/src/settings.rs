//! Dispatch settings and pacing intervals.

use std::time::Duration;

/// Pause after a settled batch before the next one. Throttles request rate
/// to the node regardless of retry configuration.
pub const SUCCESS_PACING: Duration = Duration::from_secs(3);

/// Pause after a batch exhausts its retries. Failures correlate with
/// transient network/chain stress, so the next independent attempt gets
/// extra headroom. Must stay longer than [`RESUME_PACING`].
pub const FAILURE_BACKOFF: Duration = Duration::from_secs(10);

/// Pause between batches during a resume run. Shorter than
/// [`FAILURE_BACKOFF`]: resumption is deliberate operator intent, not an
/// automatic continuation.
pub const RESUME_PACING: Duration = Duration::from_secs(5);

/// Operator-configurable dispatch parameters.
#[derive(Clone, Debug)]
pub struct DispatchSettings {
    /// Maximum recipients per batch transaction.
    pub batch_size: usize,
    /// Retries per batch after the first attempt.
    pub max_retries: u32,
    /// Wait between attempts on the same batch.
    pub retry_delay: Duration,
    /// Denomination every transfer output is paid in.
    pub denom: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacing_ordering_holds() {
        assert!(FAILURE_BACKOFF > RESUME_PACING);
        assert!(RESUME_PACING > SUCCESS_PACING);
    }
}
