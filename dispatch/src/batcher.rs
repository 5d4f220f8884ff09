//! Order-preserving partition of the recipient list.

use serde::{Deserialize, Serialize};

use payrun_types::{AmountError, Recipient, TokenAmount};

/// A numbered, bounded-size group of recipients.
///
/// Batch numbers are 1-based and contiguous over one `split` call;
/// concatenating all batches in number order reproduces the input exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub number: u64,
    pub recipients: Vec<Recipient>,
}

impl Batch {
    /// Sum of all recipient amounts in this batch.
    pub fn total(&self) -> Result<TokenAmount, AmountError> {
        TokenAmount::checked_sum(self.recipients.iter().map(|r| r.amount))
    }
}

/// Partition `recipients` into batches of at most `batch_size`, preserving
/// order. Empty input yields zero batches.
///
/// `batch_size >= 1` is a precondition; the engine validates it before
/// calling.
pub fn split(recipients: &[Recipient], batch_size: usize) -> Vec<Batch> {
    recipients
        .chunks(batch_size)
        .enumerate()
        .map(|(i, chunk)| Batch {
            number: i as u64 + 1,
            recipients: chunk.to_vec(),
        })
        .collect()
}
