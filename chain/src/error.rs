//! Chain-boundary error types.

use thiserror::Error;

/// Errors surfaced by a [`crate::TransactionBuilder`].
///
/// All variants are treated as transient by the dispatch engine (retried up
/// to the configured bound); `InsufficientBalance` is distinguished so
/// operators can tell a funding problem from a network one in persisted
/// failure records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: String, available: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("rejected by chain: {0}")]
    Rejected(String),

    #[error("invalid node response: {0}")]
    InvalidResponse(String),
}

impl ChainError {
    /// Whether this failure is a funding shortfall rather than a
    /// network/chain problem.
    pub fn is_insufficient_balance(&self) -> bool {
        matches!(self, ChainError::InsufficientBalance { .. })
    }
}
