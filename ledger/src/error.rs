use thiserror::Error;

/// Ledger I/O failures.
///
/// These are fatal at the engine boundary: losing the ability to record an
/// outcome is worse than stopping, because a later blind retry could
/// double-spend.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger serialization error: {0}")]
    Serialization(String),
}
