//! Primitive types for the Zeta SDK.
//!
//! Native fixed-point wrappers for prices and sizes, and the order side.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::codec::program_enum;
use crate::constants::{PLATFORM_PRECISION, POSITION_PRECISION};
use crate::error::SdkError;

/// Scales a human-readable decimal to a native integer.
fn to_native(value: Decimal, precision: u32, what: &str) -> Result<u64, SdkError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(SdkError::InvalidInput(format!("{what} cannot be negative: {value}")));
    }
    let scaled = value
        .checked_mul(Decimal::from(10u64.pow(precision)))
        .ok_or_else(|| SdkError::InvalidInput(format!("{what} overflows: {value}")))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    scaled
        .to_u64()
        .ok_or_else(|| SdkError::InvalidInput(format!("{what} out of range: {value}")))
}

/// A price in native quote units (6 decimal places).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Creates a new price from native units.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw native value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns true if the price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Converts a human-readable price (e.g. `21000.5`) to native units.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidInput` for negative or out-of-range values.
    pub fn from_decimal(price: Decimal) -> Result<Self, SdkError> {
        to_native(price, PLATFORM_PRECISION, "price").map(Self)
    }

    /// Converts to a human-readable price.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), PLATFORM_PRECISION)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// An order or position size in native units (3 decimal places).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Size(u64);

impl Size {
    /// Creates a new size from native units.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw native value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns true if the size is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Converts a human-readable size (e.g. `0.5` contracts) to native units.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidInput` for negative or out-of-range values.
    pub fn from_decimal(size: Decimal) -> Result<Self, SdkError> {
        to_native(size, POSITION_PRECISION, "size").map(Self)
    }

    /// Converts to a human-readable size.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), POSITION_PRECISION)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Size {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Size> for u64 {
    fn from(size: Size) -> Self {
        size.0
    }
}

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order.
    Bid,
    /// Sell order.
    Ask,
}

// Tag 0 is the program's uninitialized side and never valid in a request.
program_enum!(Side, "side", {
    Bid = 1,
    Ask = 2,
});

impl Side {
    /// Returns true if this is a bid (buy) order.
    #[must_use]
    pub const fn is_bid(&self) -> bool {
        matches!(self, Self::Bid)
    }

    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Bid => Self::Ask,
            Self::Ask => Self::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bid => write!(f, "bid"),
            Self::Ask => write!(f, "ask"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_price_from_decimal() {
        let price = Price::from_decimal(Decimal::from(21_000)).expect("price");
        assert_eq!(price.value(), 21_000_000_000);

        let price = Price::from_decimal(Decimal::from_str("0.0000015").expect("decimal"))
            .expect("price");
        assert_eq!(price.value(), 2);
    }

    #[test]
    fn test_price_to_decimal() {
        let price = Price::new(21_000_500_000);
        assert_eq!(price.to_decimal(), Decimal::from_str("21000.5").expect("decimal"));
    }

    #[test]
    fn test_price_rejects_negative() {
        assert!(Price::from_decimal(Decimal::from(-1)).is_err());
        assert_eq!(Price::from_decimal(Decimal::ZERO), Ok(Price::new(0)));
    }

    #[test]
    fn test_size_precision() {
        let size = Size::from_decimal(Decimal::from_str("0.5").expect("decimal")).expect("size");
        assert_eq!(size.value(), 500);
        assert_eq!(Size::new(500_000).to_decimal(), Decimal::from(500));
    }

    #[test]
    fn test_size_out_of_range() {
        assert!(Size::from_decimal(Decimal::MAX).is_err());
    }

    #[test]
    fn test_side_tags() {
        assert_eq!(u8::from(Side::Bid), 1);
        assert_eq!(u8::from(Side::Ask), 2);
        assert!(Side::try_from(0).is_err());
        assert_eq!(Side::try_from(2), Ok(Side::Ask));
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert!(Side::Bid.is_bid());
        assert!(!Side::Ask.is_bid());
    }

    #[test]
    fn test_side_serde() {
        let json = serde_json::to_string(&Side::Ask).expect("serialize");
        assert_eq!(json, "\"ask\"");
    }

    #[test]
    fn test_price_serde() {
        let json = serde_json::to_string(&Price::new(42)).expect("serialize");
        assert_eq!(json, "42");
    }
}
