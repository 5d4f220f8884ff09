//! Fundamental types for payrun.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: token amounts, chain addresses, transaction hashes, recipients,
//! and timestamps.

pub mod address;
pub mod amount;
pub mod hash;
pub mod recipient;
pub mod time;

pub use address::ChainAddress;
pub use amount::{AmountError, TokenAmount};
pub use hash::TxHash;
pub use recipient::{Recipient, RecipientError};
pub use time::Timestamp;
