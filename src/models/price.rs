//! Exact, non-negative prices
//!
//! Arithmetic saturates at [`Price::MAX`] instead of overflowing, so pricing
//! a basket always yields a total.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative price in the store's currency (e.g. `1.89` for €1.89)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero price
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Largest representable price; sums and products clamp here
    pub const MAX: Price = Price(Decimal::MAX);

    /// Create a price, rejecting negative amounts
    pub fn new(amount: Decimal) -> Option<Self> {
        if amount < Decimal::ZERO {
            None
        } else {
            Some(Self(amount.normalize()))
        }
    }

    /// Create a price from a float, rejecting negative and non-finite values.
    ///
    /// Values above [`Price::MAX`] (about 7.9e28) are rejected as well.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_f64(value).and_then(Self::new)
    }

    /// The decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price, saturating at [`Price::MAX`]
    pub fn times(&self, quantity: u32) -> Price {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map_or(Price::MAX, Price)
    }

    /// Whether arithmetic has clamped this price to [`Price::MAX`]
    pub fn is_saturated(&self) -> bool {
        *self == Price::MAX
    }

    /// Whether this price is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        self.0.checked_add(rhs.0).map_or(Price::MAX, Price)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Price) {
        *self = *self + rhs;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert!(Price::new(Decimal::new(-1, 2)).is_none());
        assert!(Price::from_f64(-3.0).is_none());
        assert!(Price::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_arithmetic_is_exact() {
        let selver = Price::new(Decimal::new(110, 2)).unwrap().times(2)
            + Price::new(Decimal::new(150, 2)).unwrap();
        let rimi = Price::new(Decimal::new(105, 2)).unwrap().times(2)
            + Price::new(Decimal::new(160, 2)).unwrap();
        assert_eq!(selver, rimi);
        assert_eq!(selver.amount(), Decimal::new(370, 2));
    }

    #[test]
    fn test_display_two_decimals() {
        let price = Price::new(Decimal::new(37, 1)).unwrap();
        assert_eq!(price.to_string(), "3.70");
    }

    #[test]
    fn test_overflow_saturates() {
        let big = Price::from_f64(1e20).unwrap();
        assert_eq!(big.times(1_000_000_000), Price::MAX);
        assert!(big.times(1_000_000_000).is_saturated());
        assert_eq!(Price::MAX + big, Price::MAX);

        let mut total = Price::MAX;
        total += Price::new(Decimal::ONE).unwrap();
        assert_eq!(total, Price::MAX);
        assert!(!big.times(2).is_saturated());
    }

    #[test]
    fn test_rejects_values_beyond_max() {
        assert!(Price::from_f64(1e29).is_none());
        assert!(Price::from_f64(1e28).is_some());
    }

    #[test]
    fn test_sum() {
        let total: Price = [1, 2, 3]
            .into_iter()
            .filter_map(|cents| Price::new(Decimal::new(cents, 2)))
            .sum();
        assert_eq!(total.amount(), Decimal::new(6, 2));
    }
}
