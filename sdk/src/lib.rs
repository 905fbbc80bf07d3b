//! Zeta SDK - instruction builders for the Zeta derivatives program on Solana.
//!
//! This crate turns typed trading, maintenance and admin actions into
//! Solana instructions. It never touches the network: every builder reads
//! resolved addresses from an [`ExchangeSnapshot`] supplied by the caller.
//!
//! # Layers
//!
//! - [`types`]: assets, sides, order and movement enums with their wire
//!   codec, market descriptors and admin argument groups
//! - [`instructions::pda`]: program-derived address schemes
//! - [`exchange`]: the snapshot and per-asset routing
//! - [`instructions`]: account lists and instruction builders, per schema
//!   version
//! - [`instructions::batch`]: splitting bulk account lists into
//!   transaction-sized chunks
//!
//! # Example
//!
//! ```rust
//! use zeta_sdk::{Asset, Price, Side, Size};
//!
//! let price = Price::new(21_000_000_000);
//! let size = Size::new(500_000);
//! let side = Side::Bid;
//! assert_eq!(Asset::Btc.index(), 1);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod exchange;
pub mod instructions;
pub mod types;

pub use config::{Network, NetworkConfig};
pub use error::SdkError;
pub use exchange::{ExchangeSnapshot, PricingSnapshot, SchemaVersion, SubExchange};
pub use types::{
    Asset, Kind, Market, MovementType, Order, OrderOptions, OrderType, Position, Price, Side,
    Size, TreasuryMovementType, TriggerDirection,
};
