//! Persisted outcome record types.

use serde::{Deserialize, Serialize};

use payrun_types::{Recipient, Timestamp, TxHash};

/// One settled batch. Created exactly once per batch that reaches terminal
/// success; append-only, never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub batch_number: u64,
    pub recipient_count: usize,
    pub tx_hash: TxHash,
    pub timestamp: Timestamp,
    pub retried: bool,
}

impl SettlementRecord {
    /// Human-readable settlement-log line.
    pub fn to_log_line(&self) -> String {
        format!(
            "batch={} recipients={} hash={} time={} retried={}",
            self.batch_number,
            self.recipient_count,
            self.tx_hash,
            self.timestamp.to_rfc3339(),
            self.retried,
        )
    }
}

/// One exhausted batch awaiting resolution.
///
/// Carries the full recipient snapshot so a later resume never needs the
/// original recipient source. Removed only when a retry of this batch
/// number succeeds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub batch_number: u64,
    pub recipients: Vec<Recipient>,
    pub error: String,
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use payrun_types::TokenAmount;

    #[test]
    fn settlement_log_line_format() {
        let record = SettlementRecord {
            batch_number: 2,
            recipient_count: 400,
            tx_hash: TxHash::new("ABC123"),
            timestamp: Timestamp::new(1_700_000_000),
            retried: true,
        };
        assert_eq!(
            record.to_log_line(),
            "batch=2 recipients=400 hash=ABC123 time=2023-11-14T22:13:20Z retried=true"
        );
    }

    #[test]
    fn failure_record_json_roundtrip() {
        let record = FailureRecord {
            batch_number: 7,
            recipients: vec![Recipient::new("cosmos1abc", TokenAmount::new(10))],
            error: "network error: timeout".into(),
            timestamp: Timestamp::new(100),
        };
        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: FailureRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
    }
}
