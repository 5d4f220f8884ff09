//! Token amount type.
//!
//! Amounts are represented as fixed-point integers (u128) to avoid
//! floating-point errors. The smallest on-chain unit is 1 raw; display
//! denominations are a front-end concern.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing or combining amounts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount string")]
    Empty,

    #[error("invalid amount {0:?}: not an unsigned decimal integer")]
    NotDecimal(String),

    #[error("amount {0:?} exceeds the 128-bit range")]
    Overflow(String),

    #[error("amount sum overflows the 128-bit range")]
    SumOverflow,
}

/// A token amount in raw units.
///
/// Internally stored as u128 for precision; amounts from external sources
/// arrive as decimal strings and are parsed with [`TokenAmount::from_str`],
/// never through a floating type. Serializes as a decimal string so
/// persisted records and wire payloads stay safe for consumers whose
/// native integers cap below 128 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Sum an iterator of amounts, failing on 128-bit overflow.
    pub fn checked_sum<I>(amounts: I) -> Result<Self, AmountError>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, a| acc.checked_add(a))
            .ok_or(AmountError::SumOverflow)
    }
}

impl FromStr for TokenAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::NotDecimal(s.to_string()));
        }
        s.parse::<u128>()
            .map(Self)
            .map_err(|_| AmountError::Overflow(s.to_string()))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = TokenAmount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned decimal integer or a decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(de::Error::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(TokenAmount::new(v as u128))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(TokenAmount::new(v))
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimal() {
        let a: TokenAmount = "1234567890123456789012345".parse().unwrap();
        assert_eq!(a.raw(), 1_234_567_890_123_456_789_012_345);
    }

    #[test]
    fn rejects_empty_and_non_decimal() {
        assert_eq!("".parse::<TokenAmount>(), Err(AmountError::Empty));
        assert_eq!("  ".parse::<TokenAmount>(), Err(AmountError::Empty));
        assert!(matches!(
            "12.5".parse::<TokenAmount>(),
            Err(AmountError::NotDecimal(_))
        ));
        assert!(matches!(
            "-3".parse::<TokenAmount>(),
            Err(AmountError::NotDecimal(_))
        ));
    }

    #[test]
    fn rejects_overflow() {
        // u128::MAX is 340282366920938463463374607431768211455.
        let too_big = "340282366920938463463374607431768211456";
        assert!(matches!(
            too_big.parse::<TokenAmount>(),
            Err(AmountError::Overflow(_))
        ));
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let amount = TokenAmount::new(u64::MAX as u128 + 1);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"18446744073709551616\"");
        let back: TokenAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);

        // Plain integers are also accepted on input.
        let from_number: TokenAmount = serde_json::from_str("42").unwrap();
        assert_eq!(from_number, TokenAmount::new(42));
    }

    #[test]
    fn checked_sum_adds_and_overflows() {
        let sum = TokenAmount::checked_sum([TokenAmount::new(1), TokenAmount::new(2)]).unwrap();
        assert_eq!(sum, TokenAmount::new(3));

        let overflow =
            TokenAmount::checked_sum([TokenAmount::new(u128::MAX), TokenAmount::new(1)]);
        assert_eq!(overflow, Err(AmountError::SumOverflow));
    }
}
