//! Transaction builder boundary for payrun.
//!
//! The dispatch engine talks to the chain exclusively through the
//! [`TransactionBuilder`] trait. The real implementation is [`NodeClient`],
//! a thin JSON-RPC client over a signing node; tests swap in a scripted
//! double from `payrun-nullables`.

pub mod client;
pub mod error;

use async_trait::async_trait;
use payrun_types::{ChainAddress, TokenAmount, TxHash};
use serde::{Deserialize, Serialize};

pub use client::NodeClient;
pub use error::ChainError;

/// One output of an atomic multi-recipient transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutput {
    pub address: ChainAddress,
    pub amount: TokenAmount,
    pub denom: String,
}

/// Signer/broadcaster boundary: builds, signs, and submits one atomic
/// transfer. Whole-batch semantics: either the submission returns a hash or
/// it fails; there is no partial settlement.
#[async_trait]
pub trait TransactionBuilder: Send + Sync {
    /// Address of the configured sender account.
    async fn sender_address(&self) -> Result<ChainAddress, ChainError>;

    /// Current spendable balance of the sender in `denom`.
    async fn sender_balance(&self, denom: &str) -> Result<TokenAmount, ChainError>;

    /// Build, sign, and broadcast one transfer with the given outputs.
    async fn submit_transfer(&self, outputs: &[TransferOutput]) -> Result<TxHash, ChainError>;
}
