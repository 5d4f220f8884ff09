//! In-memory outcome ledger.

use std::sync::{Arc, Mutex};

use payrun_ledger::{FailureRecord, LedgerError, OutcomeLedger, SettlementRecord};

struct Inner {
    settlements: Vec<SettlementRecord>,
    failures: Vec<FailureRecord>,
}

/// An [`OutcomeLedger`] held entirely in memory, with the same
/// replace-by-batch-number semantics as the file backend.
#[derive(Clone)]
pub struct MemoryLedger {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                settlements: Vec::new(),
                failures: Vec::new(),
            })),
        }
    }

    /// All settlement records appended so far, in append order.
    pub fn settlements(&self) -> Vec<SettlementRecord> {
        self.inner.lock().unwrap().settlements.clone()
    }

    /// Seed an outstanding failure, as if left behind by an earlier run.
    pub fn seed_failure(&self, record: FailureRecord) {
        self.inner.lock().unwrap().failures.push(record);
    }

    pub fn failures(&self) -> Vec<FailureRecord> {
        self.inner.lock().unwrap().failures.clone()
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeLedger for MemoryLedger {
    fn append_settlement(&mut self, record: &SettlementRecord) -> Result<(), LedgerError> {
        self.inner.lock().unwrap().settlements.push(record.clone());
        Ok(())
    }

    fn outstanding_failures(&self) -> Result<Vec<FailureRecord>, LedgerError> {
        Ok(self.inner.lock().unwrap().failures.clone())
    }

    fn record_failure(&mut self, record: FailureRecord) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock().unwrap();
        match inner
            .failures
            .iter_mut()
            .find(|r| r.batch_number == record.batch_number)
        {
            Some(existing) => *existing = record,
            None => inner.failures.push(record),
        }
        Ok(())
    }

    fn resolve_failure(&mut self, batch_number: u64) -> Result<bool, LedgerError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.failures.len();
        inner.failures.retain(|r| r.batch_number != batch_number);
        Ok(inner.failures.len() != before)
    }
}
