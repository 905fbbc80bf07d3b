//! Order types for the Zeta SDK.
//!
//! Provides order type, trigger direction, order/position snapshots, and the
//! per-order options accepted by the place-order builder.

use std::fmt;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use super::asset::Asset;
use super::codec::program_enum;
use super::primitives::{Price, Side, Size};
use super::serde_pubkey;
use crate::constants::{DEFAULT_ORDER_TAG, MAX_ORDER_TAG_LENGTH};
use crate::error::SdkError;

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Standard limit order.
    #[default]
    Limit,
    /// Post-only order (rejected if it would take).
    PostOnly,
    /// Fill-or-kill.
    FillOrKill,
    /// Immediate-or-cancel.
    ImmediateOrCancel,
    /// Post-only, repriced one tick behind the opposite best instead of rejected.
    PostOnlySlide,
}

program_enum!(OrderType, "order type", {
    Limit = 0,
    PostOnly = 1,
    FillOrKill = 2,
    ImmediateOrCancel = 3,
    PostOnlySlide = 4,
});

impl OrderType {
    /// Returns true if this order type can rest on the book.
    #[must_use]
    pub const fn can_rest(&self) -> bool {
        matches!(self, Self::Limit | Self::PostOnly | Self::PostOnlySlide)
    }

    /// Returns true if this order type requires immediate execution.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        matches!(self, Self::ImmediateOrCancel | Self::FillOrKill)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limit => write!(f, "limit"),
            Self::PostOnly => write!(f, "post_only"),
            Self::FillOrKill => write!(f, "fok"),
            Self::ImmediateOrCancel => write!(f, "ioc"),
            Self::PostOnlySlide => write!(f, "post_only_slide"),
        }
    }
}

/// Trigger direction of a conditional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerDirection {
    /// No trigger set.
    Uninitialized,
    /// Fires when the mark price falls to or below the trigger.
    LessThanOrEqual,
    /// Fires when the mark price rises to or above the trigger.
    GreaterThanOrEqual,
}

program_enum!(TriggerDirection, "trigger direction", {
    Uninitialized = 0,
    LessThanOrEqual = 1,
    GreaterThanOrEqual = 2,
});

impl TriggerDirection {
    /// Default direction for a side: bids buy the dip, asks sell the rally.
    #[must_use]
    pub const fn default_for(side: Side) -> Self {
        match side {
            Side::Bid => Self::LessThanOrEqual,
            Side::Ask => Self::GreaterThanOrEqual,
        }
    }
}

/// Resting order owned by an open-orders account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Index of the market within its asset.
    pub market_index: usize,
    /// Market address.
    #[serde(with = "serde_pubkey")]
    pub market: Pubkey,
    /// Limit price.
    pub price: Price,
    /// Remaining size.
    pub size: Size,
    /// Order side.
    pub side: Side,
    /// Opaque order-book identifier.
    pub order_id: u128,
    /// Open-orders account that owns the order.
    #[serde(with = "serde_pubkey")]
    pub owner: Pubkey,
    /// Client order id (`None` when not set).
    pub client_order_id: Option<u64>,
    /// Time-in-force offset (`None` when the order does not expire).
    pub tif_offset: Option<u16>,
    /// Asset of the market.
    pub asset: Asset,
}

/// Open position in one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Index of the market within its asset.
    pub market_index: usize,
    /// Market address.
    #[serde(with = "serde_pubkey")]
    pub market: Pubkey,
    /// Signed size in native units (negative for shorts).
    pub size: i64,
    /// Cost of trades in native quote units.
    pub cost_of_trades: u64,
    /// Asset of the market.
    pub asset: Asset,
}

/// Per-order options for placing an order.
///
/// Zero is treated as "absent" for the client order id and the
/// time-in-force offset, matching the program's optional encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOptions {
    /// Order type.
    pub order_type: OrderType,
    /// Client order id.
    pub client_order_id: Option<u64>,
    /// Seconds after the current TIF epoch start at which the order expires.
    pub tif_offset: Option<u16>,
    /// Free-form tag, at most [`MAX_ORDER_TAG_LENGTH`] bytes.
    pub tag: String,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            order_type: OrderType::Limit,
            client_order_id: None,
            tif_offset: None,
            tag: DEFAULT_ORDER_TAG.to_string(),
        }
    }
}

impl OrderOptions {
    /// Sets the order type.
    #[must_use]
    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Sets the client order id; `0` clears it.
    #[must_use]
    pub fn with_client_order_id(mut self, id: u64) -> Self {
        self.client_order_id = (id != 0).then_some(id);
        self
    }

    /// Sets the time-in-force offset in seconds; `0` disables expiry.
    #[must_use]
    pub fn with_tif_offset(mut self, offset: u16) -> Self {
        self.tif_offset = (offset != 0).then_some(offset);
        self
    }

    /// Sets the order tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Checks the tag length.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidInput` if the tag exceeds
    /// [`MAX_ORDER_TAG_LENGTH`] bytes.
    pub fn validate(&self) -> Result<(), SdkError> {
        if self.tag.len() > MAX_ORDER_TAG_LENGTH {
            return Err(SdkError::InvalidInput(format!(
                "tag {:?} is too long, max length = {MAX_ORDER_TAG_LENGTH}",
                self.tag
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_tags() {
        assert_eq!(u8::from(OrderType::Limit), 0);
        assert_eq!(u8::from(OrderType::PostOnlySlide), 4);
        assert_eq!(OrderType::try_from(2), Ok(OrderType::FillOrKill));
        assert!(OrderType::try_from(5).is_err());
    }

    #[test]
    fn test_order_type_properties() {
        assert!(OrderType::PostOnlySlide.can_rest());
        assert!(OrderType::FillOrKill.is_immediate());
        assert!(!OrderType::Limit.is_immediate());
    }

    #[test]
    fn test_default_trigger_direction() {
        assert_eq!(
            TriggerDirection::default_for(Side::Bid),
            TriggerDirection::LessThanOrEqual
        );
        assert_eq!(
            TriggerDirection::default_for(Side::Ask),
            TriggerDirection::GreaterThanOrEqual
        );
    }

    #[test]
    fn test_options_zero_sentinels() {
        let options = OrderOptions::default()
            .with_client_order_id(0)
            .with_tif_offset(0);
        assert_eq!(options.client_order_id, None);
        assert_eq!(options.tif_offset, None);

        let options = OrderOptions::default()
            .with_client_order_id(7)
            .with_tif_offset(42);
        assert_eq!(options.client_order_id, Some(7));
        assert_eq!(options.tif_offset, Some(42));
    }

    #[test]
    fn test_options_default_tag() {
        let options = OrderOptions::default();
        assert_eq!(options.tag, DEFAULT_ORDER_TAG);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_tag_too_long() {
        let options = OrderOptions::default().with_tag("TOOLONG");
        assert!(matches!(options.validate(), Err(SdkError::InvalidInput(_))));
        assert!(OrderOptions::default().with_tag("ABCD").validate().is_ok());
    }

    #[test]
    fn test_order_serde() {
        let order = Order {
            market_index: 3,
            market: Pubkey::new_unique(),
            price: Price::new(1_000_000),
            size: Size::new(1_000),
            side: Side::Bid,
            order_id: 12_345,
            owner: Pubkey::new_unique(),
            client_order_id: None,
            tif_offset: Some(30),
            asset: Asset::Btc,
        };
        let json = serde_json::to_string(&order).expect("serialize");
        assert!(json.contains("\"marketIndex\":3"));
        let back: Order = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, order);
    }
}
