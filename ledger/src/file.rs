//! File-backed outcome ledger.
//!
//! Layout under the data directory:
//! - `settlements_<unix>.log` — plain-text settlement log, one line per
//!   settled batch, fresh file per run.
//! - `failed_batches.json` — JSON array of outstanding [`FailureRecord`]s,
//!   persisted across runs.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use payrun_types::Timestamp;

use crate::{FailureRecord, LedgerError, OutcomeLedger, SettlementRecord};

const FAILURES_FILE: &str = "failed_batches.json";

pub struct FileLedger {
    settlement_path: PathBuf,
    failures_path: PathBuf,
}

impl FileLedger {
    /// Open a ledger rooted at `data_dir`, starting a fresh settlement log
    /// for this run. Creates the directory if needed.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        let settlement_path =
            data_dir.join(format!("settlements_{}.log", Timestamp::now().as_secs()));
        Ok(Self {
            settlement_path,
            failures_path: data_dir.join(FAILURES_FILE),
        })
    }

    /// Path of this run's settlement log.
    pub fn settlement_path(&self) -> &Path {
        &self.settlement_path
    }

    fn load_failures(&self) -> Vec<FailureRecord> {
        if !self.failures_path.exists() {
            return Vec::new();
        }
        let contents = match fs::read_to_string(&self.failures_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(
                    path = %self.failures_path.display(),
                    "failure store unreadable ({e}); treating as no outstanding failures"
                );
                return Vec::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    path = %self.failures_path.display(),
                    "failure store corrupt ({e}); treating as no outstanding failures"
                );
                Vec::new()
            }
        }
    }

    fn store_failures(&self, records: &[FailureRecord]) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        fs::write(&self.failures_path, json)?;
        Ok(())
    }
}

impl OutcomeLedger for FileLedger {
    fn append_settlement(&mut self, record: &SettlementRecord) -> Result<(), LedgerError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.settlement_path)?;
        writeln!(file, "{}", record.to_log_line())?;
        Ok(())
    }

    fn outstanding_failures(&self) -> Result<Vec<FailureRecord>, LedgerError> {
        Ok(self.load_failures())
    }

    fn record_failure(&mut self, record: FailureRecord) -> Result<(), LedgerError> {
        let mut records = self.load_failures();
        match records
            .iter_mut()
            .find(|r| r.batch_number == record.batch_number)
        {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        self.store_failures(&records)
    }

    fn resolve_failure(&mut self, batch_number: u64) -> Result<bool, LedgerError> {
        let mut records = self.load_failures();
        let before = records.len();
        records.retain(|r| r.batch_number != batch_number);
        if records.len() == before {
            return Ok(false);
        }
        self.store_failures(&records)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payrun_types::{Recipient, TokenAmount, TxHash};

    fn failure(batch_number: u64, error: &str) -> FailureRecord {
        FailureRecord {
            batch_number,
            recipients: vec![Recipient::new("cosmos1abc", TokenAmount::new(5))],
            error: error.into(),
            timestamp: Timestamp::new(1000),
        }
    }

    #[test]
    fn settlement_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = FileLedger::open(dir.path()).unwrap();

        for n in 1..=3u64 {
            ledger
                .append_settlement(&SettlementRecord {
                    batch_number: n,
                    recipient_count: 10,
                    tx_hash: TxHash::new(format!("HASH{n}")),
                    timestamp: Timestamp::new(1000),
                    retried: false,
                })
                .unwrap();
        }

        let contents = fs::read_to_string(ledger.settlement_path()).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("batch=2 recipients=10 hash=HASH2"));
    }

    #[test]
    fn failures_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut ledger = FileLedger::open(dir.path()).unwrap();
            ledger.record_failure(failure(2, "timeout")).unwrap();
            ledger.record_failure(failure(5, "gas exhausted")).unwrap();
        }

        let ledger = FileLedger::open(dir.path()).unwrap();
        let records = ledger.outstanding_failures().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].batch_number, 2);
        assert_eq!(records[1].batch_number, 5);
    }

    #[test]
    fn record_failure_replaces_same_batch_number() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = FileLedger::open(dir.path()).unwrap();
        ledger.record_failure(failure(2, "timeout")).unwrap();
        ledger.record_failure(failure(2, "rejected")).unwrap();

        let records = ledger.outstanding_failures().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].error, "rejected");
    }

    #[test]
    fn resolve_failure_removes_only_matching() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = FileLedger::open(dir.path()).unwrap();
        ledger.record_failure(failure(2, "timeout")).unwrap();
        ledger.record_failure(failure(3, "timeout")).unwrap();

        assert!(ledger.resolve_failure(2).unwrap());
        assert!(!ledger.resolve_failure(2).unwrap());

        let records = ledger.outstanding_failures().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].batch_number, 3);
    }

    #[test]
    fn corrupt_failure_store_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FAILURES_FILE), "{not json").unwrap();

        let ledger = FileLedger::open(dir.path()).unwrap();
        assert!(ledger.outstanding_failures().unwrap().is_empty());
    }
}
