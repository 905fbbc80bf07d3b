//! Market descriptors for the Zeta SDK.
//!
//! A [`Market`] pairs the external order-book accounts with the Zeta-owned
//! token vaults that back it.

use std::fmt;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use super::codec::program_enum;
use super::primitives::Side;
use super::serde_pubkey;

/// Product kind of a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Not yet listed.
    Uninitialized,
    /// Call option.
    Call,
    /// Put option.
    Put,
    /// Dated future.
    Future,
    /// Perpetual.
    Perp,
}

program_enum!(Kind, "kind", {
    Uninitialized = 0,
    Call = 1,
    Put = 2,
    Future = 3,
    Perp = 4,
});

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
            Self::Future => write!(f, "future"),
            Self::Perp => write!(f, "perp"),
        }
    }
}

/// Accounts of the external order book backing a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexMarket {
    /// Request queue.
    #[serde(with = "serde_pubkey")]
    pub request_queue: Pubkey,
    /// Event queue.
    #[serde(with = "serde_pubkey")]
    pub event_queue: Pubkey,
    /// Bids slab.
    #[serde(with = "serde_pubkey")]
    pub bids: Pubkey,
    /// Asks slab.
    #[serde(with = "serde_pubkey")]
    pub asks: Pubkey,
    /// Order-book base (coin) vault.
    #[serde(with = "serde_pubkey")]
    pub base_vault: Pubkey,
    /// Order-book quote (pc) vault.
    #[serde(with = "serde_pubkey")]
    pub quote_vault: Pubkey,
    /// Base token mint.
    #[serde(with = "serde_pubkey")]
    pub base_mint: Pubkey,
    /// Quote token mint.
    #[serde(with = "serde_pubkey")]
    pub quote_mint: Pubkey,
}

/// One tradable market of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Index of the market within its asset.
    pub index: usize,
    /// Market (order-book) address.
    #[serde(with = "serde_pubkey")]
    pub address: Pubkey,
    /// Product kind.
    pub kind: Kind,
    /// Order-book accounts.
    pub dex: DexMarket,
    /// Zeta-owned base vault.
    #[serde(with = "serde_pubkey")]
    pub base_vault: Pubkey,
    /// Zeta-owned quote vault.
    #[serde(with = "serde_pubkey")]
    pub quote_vault: Pubkey,
}

impl Market {
    /// Returns true for the asset's perpetual market.
    #[must_use]
    pub const fn is_perp(&self) -> bool {
        matches!(self.kind, Kind::Perp)
    }

    /// Token account that funds an order: quote vault for bids, base vault for asks.
    #[must_use]
    pub const fn payer_vault(&self, side: Side) -> Pubkey {
        match side {
            Side::Bid => self.quote_vault,
            Side::Ask => self.base_vault,
        }
    }

    /// Mint the program mints into the payer vault for an order side.
    #[must_use]
    pub const fn market_mint(&self, side: Side) -> Pubkey {
        match side {
            Side::Bid => self.dex.quote_mint,
            Side::Ask => self.dex.base_mint,
        }
    }
}
