use thiserror::Error;

use payrun_ledger::LedgerError;

/// Errors that escape the dispatch engine.
///
/// Per-batch chain errors never appear here: they are converted to persisted
/// failure records at the engine boundary. Only configuration problems and
/// ledger I/O failures terminate a run.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("no outstanding failure record for batch {0}")]
    NotFound(u64),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
