//! Core types for the Zeta SDK.
//!
//! Value types consumed by the instruction builders: assets, sides, order
//! and movement enums with their wire codec, market descriptors, and the
//! argument groups of admin instructions.

pub mod args;
pub mod asset;
pub mod codec;
pub mod market;
pub mod movement;
pub mod order;
pub mod primitives;
pub mod serde_pubkey;

pub use args::{
    ExpireSeriesOverrideArgs, InitializeZetaGroupPricingArgs, OverrideExpiryArgs,
    PositionMovementArg, SetReferralsRewardsArgs, StateParams, UpdateHaltStateArgs,
    UpdateInterestRateArgs, UpdateMarginParametersArgs, UpdatePerpParametersArgs,
    UpdatePricingParametersArgs, UpdateVolatilityArgs, UpdateZetaGroupExpiryArgs,
    UpdateZetaPricingPubkeysArgs,
};
pub use asset::Asset;
pub use codec::ProgramEnum;
pub use market::{DexMarket, Kind, Market};
pub use movement::{MovementType, TreasuryMovementType};
pub use order::{Order, OrderOptions, OrderType, Position, TriggerDirection};
pub use primitives::{Price, Side, Size};
