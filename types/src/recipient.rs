//! Recipient of a disbursement.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ChainAddress, TokenAmount};

/// Validation errors for a single recipient entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipientError {
    #[error("recipient address is empty")]
    EmptyAddress,

    #[error("recipient {0} has a zero amount")]
    ZeroAmount(ChainAddress),
}

/// One (address, amount) pair from the recipient source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub address: ChainAddress,
    pub amount: TokenAmount,
}

impl Recipient {
    pub fn new(address: impl Into<ChainAddress>, amount: TokenAmount) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }

    /// Check the entry invariants: non-empty address, amount > 0.
    pub fn validate(&self) -> Result<(), RecipientError> {
        if self.address.is_empty() {
            return Err(RecipientError::EmptyAddress);
        }
        if self.amount.is_zero() {
            return Err(RecipientError::ZeroAmount(self.address.clone()));
        }
        Ok(())
    }
}
