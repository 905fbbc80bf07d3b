//! Underlying assets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::codec::program_enum;
use crate::error::SdkError;

/// Traded underlying.
///
/// The numeric index doubles as the wire tag and as the position of the
/// asset in per-asset tables of the pricing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    /// Solana.
    Sol,
    /// Bitcoin.
    Btc,
    /// Ether.
    Eth,
    /// Aptos.
    Apt,
    /// Arbitrum.
    Arb,
}

program_enum!(Asset, "asset", {
    Sol = 0,
    Btc = 1,
    Eth = 2,
    Apt = 3,
    Arb = 4,
});

impl Asset {
    /// Every supported asset, in index order.
    pub const ALL: [Self; 5] = [Self::Sol, Self::Btc, Self::Eth, Self::Apt, Self::Arb];

    /// Returns the stable array index of the asset.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Sol => 0,
            Self::Btc => 1,
            Self::Eth => 2,
            Self::Apt => 3,
            Self::Arb => 4,
        }
    }

    /// Returns the asset at an array index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sol => write!(f, "SOL"),
            Self::Btc => write!(f, "BTC"),
            Self::Eth => write!(f, "ETH"),
            Self::Apt => write!(f, "APT"),
            Self::Arb => write!(f, "ARB"),
        }
    }
}

impl FromStr for Asset {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|asset| asset.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| SdkError::InvalidInput(format!("unknown asset name: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_index_matches_tag() {
        for asset in Asset::ALL {
            assert_eq!(usize::from(u8::from(asset)), asset.index());
            assert_eq!(Asset::from_index(asset.index()), Some(asset));
        }
        assert_eq!(Asset::from_index(5), None);
    }

    #[test]
    fn test_asset_from_str() {
        assert_eq!("btc".parse::<Asset>(), Ok(Asset::Btc));
        assert_eq!("SOL".parse::<Asset>(), Ok(Asset::Sol));
        assert!("DOGE".parse::<Asset>().is_err());
    }

    #[test]
    fn test_asset_serde() {
        let json = serde_json::to_string(&Asset::Eth).expect("serialize");
        assert_eq!(json, "\"ETH\"");
    }
}
