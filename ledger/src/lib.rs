//! Outcome ledger for payrun.
//!
//! Every terminal batch outcome is persisted here: settled batches go to an
//! append-only settlement log (fresh file per run), exhausted batches go to
//! the outstanding-failure store (persists across runs, removed only when a
//! retry of that exact batch succeeds). The dispatch engine depends only on
//! the [`OutcomeLedger`] trait; [`FileLedger`] is the real backend and the
//! in-memory double lives in `payrun-nullables`.

pub mod error;
pub mod file;
pub mod records;

pub use error::LedgerError;
pub use file::FileLedger;
pub use records::{FailureRecord, SettlementRecord};

/// Storage boundary for batch outcomes.
///
/// Single-writer: only the dispatch engine mutates the ledger, strictly
/// between batch attempts. Concurrent runs against the same storage are
/// unsupported.
pub trait OutcomeLedger {
    /// Append one settled-batch record to the current run's settlement log.
    fn append_settlement(&mut self, record: &SettlementRecord) -> Result<(), LedgerError>;

    /// All currently-outstanding failure records, in stored order.
    ///
    /// Unreadable or corrupt storage degrades to an empty set with a
    /// warning; it never aborts a run.
    fn outstanding_failures(&self) -> Result<Vec<FailureRecord>, LedgerError>;

    /// Persist a failure record, replacing any existing record with the
    /// same batch number (error-message refresh after a failed resume).
    fn record_failure(&mut self, record: FailureRecord) -> Result<(), LedgerError>;

    /// Remove the failure record for `batch_number` after a successful
    /// retry. Returns `false` when no such record exists.
    fn resolve_failure(&mut self, batch_number: u64) -> Result<bool, LedgerError>;
}
