//! Outcome summary of a dispatch or resume run.

use payrun_types::TxHash;

/// What a run accomplished. Exit-status policy is the caller's concern;
/// the engine only reports which batches settled and which remain failed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Settlement hashes in batch order.
    pub hashes: Vec<TxHash>,
    /// Batch numbers that reached terminal success.
    pub settled: Vec<u64>,
    /// Batch numbers left in a persisted failure state.
    pub failed: Vec<u64>,
}

impl RunReport {
    pub fn fully_settled(&self) -> bool {
        self.failed.is_empty()
    }

    pub(crate) fn record_success(&mut self, batch_number: u64, hash: TxHash) {
        self.hashes.push(hash);
        self.settled.push(batch_number);
    }

    pub(crate) fn record_failure(&mut self, batch_number: u64) {
        self.failed.push(batch_number);
    }
}
