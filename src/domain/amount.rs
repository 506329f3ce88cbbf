//! Exact integer monetary amounts backed by rust_decimal.
//!
//! Amounts cross every boundary (JSON, sqlite) as canonical decimal text so
//! that values beyond the float-safe range survive unchanged.

use rust_decimal::Decimal as RustDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Integer monetary quantity (stakes, pools, battle totals).
///
/// Never holds a fractional part. Serializes to a JSON string, not a number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(RustDecimal);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("amount must be a whole number: {0}")]
    Fractional(String),
}

impl Amount {
    /// Parse an Amount from its decimal text.
    ///
    /// # Errors
    /// Returns an error if the text is not a number or has a non-zero
    /// fractional part.
    pub fn from_str_canonical(s: &str) -> Result<Self, AmountParseError> {
        let value =
            RustDecimal::from_str(s.trim()).map_err(|_| AmountParseError::Invalid(s.to_string()))?;
        if !value.fract().is_zero() {
            return Err(AmountParseError::Fractional(s.to_string()));
        }
        Ok(Amount(value.trunc().normalize()))
    }

    /// Format as canonical decimal text (no exponent, no trailing fraction).
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    pub fn zero() -> Self {
        Amount(RustDecimal::ZERO)
    }

    /// Sum of two amounts, `None` on overflow.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(RustDecimal::from(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_canonical(&value)
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.to_canonical_string()
    }
}

impl std::ops::Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}
