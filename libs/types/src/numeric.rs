//! Fixed-point decimal types for prices and quantities
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Price-level keys compare by exact decimal value, so `1.50` and `1.5`
//! land on the same level.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A strictly positive price.
///
/// Construction through `try_new` guarantees the invariant, which lets
/// the order book use `Price` directly as a `BTreeMap` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price, rejecting zero and negative values.
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a price from a whole number of quote units.
    ///
    /// # Panics
    /// Panics if `value` is zero.
    pub fn from_u64(value: u64) -> Self {
        assert!(value > 0, "Price must be positive");
        Self(Decimal::from(value))
    }

    /// Parse a price from a decimal string.
    pub fn from_str(s: &str) -> Option<Self> {
        Decimal::from_str_exact(s).ok().and_then(Self::try_new)
    }

    /// Get the inner decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative quantity.
///
/// Zero is allowed so fill bookkeeping (`filled`, `remaining`) can use the
/// same type; order submission enforces positivity at the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a quantity, rejecting negative values.
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value >= Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Parse a quantity from a decimal string.
    pub fn from_str(s: &str) -> Option<Self> {
        Decimal::from_str_exact(s).ok().and_then(Self::try_new)
    }

    /// The zero quantity.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Get the inner decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Subtract, clamping at zero.
    pub fn saturating_sub(self, other: Quantity) -> Quantity {
        Self((self.0 - other.0).max(Decimal::ZERO))
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, other: Quantity) -> Quantity {
        Quantity(self.0 + other.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_price_rejects_non_positive() {
        assert!(Price::try_new(Decimal::ZERO).is_none());
        assert!(Price::try_new(Decimal::from(-5)).is_none());
        assert!(Price::try_new(Decimal::ONE).is_some());
    }

    #[test]
    fn test_price_from_str() {
        let price = Price::from_str("2000.50").unwrap();
        assert_eq!(price.as_decimal(), Decimal::from_str_exact("2000.50").unwrap());
        assert!(Price::from_str("0").is_none());
        assert!(Price::from_str("-1.5").is_none());
        assert!(Price::from_str("abc").is_none());
    }

    #[test]
    fn test_price_exact_ordering() {
        // 1.50 and 1.5 are the same price level
        assert_eq!(Price::from_str("1.50").unwrap(), Price::from_str("1.5").unwrap());
        assert!(Price::from_u64(2010) > Price::from_u64(2000));
    }

    #[test]
    fn test_quantity_allows_zero_rejects_negative() {
        assert!(Quantity::try_new(Decimal::ZERO).is_some());
        assert!(Quantity::try_new(Decimal::from(-1)).is_none());
        assert!(Quantity::zero().is_zero());
    }

    #[test]
    fn test_quantity_arithmetic() {
        let a = Quantity::from_str("1.5").unwrap();
        let b = Quantity::from_str("0.3").unwrap();

        assert_eq!(a + b, Quantity::from_str("1.8").unwrap());
        assert_eq!(a.saturating_sub(b), Quantity::from_str("1.2").unwrap());
        assert_eq!(b.saturating_sub(a), Quantity::zero());
    }

    #[test]
    fn test_quantity_min_picks_smaller() {
        let a = Quantity::from_str("1.2").unwrap();
        let b = Quantity::from_str("1.5").unwrap();
        assert_eq!(a.min(b), a);
    }

    #[test]
    fn test_price_serialization() {
        let price = Price::from_str("2000.50").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let deserialized: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, deserialized);
    }

    proptest! {
        #[test]
        fn prop_price_sign_invariant(value in -1_000_000i64..1_000_000i64, scale in 0u32..6) {
            let dec = Decimal::new(value, scale);
            let price = Price::try_new(dec);
            prop_assert_eq!(price.is_some(), dec > Decimal::ZERO);
        }

        #[test]
        fn prop_quantity_saturating_sub_never_negative(a in 0i64..1_000_000i64, b in 0i64..1_000_000i64) {
            let qa = Quantity::try_new(Decimal::new(a, 3)).unwrap();
            let qb = Quantity::try_new(Decimal::new(b, 3)).unwrap();
            prop_assert!(qa.saturating_sub(qb).as_decimal() >= Decimal::ZERO);
        }
    }
}
