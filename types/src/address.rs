//! Chain address type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recipient or sender address on the target chain.
///
/// Payrun only requires the address to be non-empty; full syntactic
/// validation (prefix, checksum) is the signing node's responsibility and
/// surfaces as a chain rejection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainAddress(String);

impl ChainAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChainAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChainAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
