//! Exchange snapshot and asset routing.
//!
//! [`ExchangeSnapshot`] is the read-only view of exchange configuration that
//! every builder reads from. It is produced by an external loader (usually
//! deserialized from JSON) and never mutated here.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::config::NetworkConfig;
use crate::error::SdkError;
use crate::types::{serde_pubkey, Asset, Market};

/// Account-layout generation an instruction variant targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVersion {
    /// Per-asset zeta group and greeks accounts.
    ZetaGroup,
    /// Unified pricing account shared by every asset.
    Pricing,
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZetaGroup => write!(f, "zeta group"),
            Self::Pricing => write!(f, "pricing"),
        }
    }
}

/// Unified pricing account and its per-asset oracle tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSnapshot {
    /// Pricing account address.
    #[serde(with = "serde_pubkey")]
    pub address: Pubkey,
    /// Primary oracle per asset index.
    #[serde(with = "serde_pubkey::vec")]
    pub oracles: Vec<Pubkey>,
    /// Backup oracle feed per asset index.
    #[serde(with = "serde_pubkey::vec")]
    pub oracle_backup_feeds: Vec<Pubkey>,
}

impl PricingSnapshot {
    /// Returns the (oracle, backup feed) pair recorded for an asset.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::UnknownAsset` if the tables have no entry for it.
    pub fn oracles_for(&self, asset: Asset) -> Result<(Pubkey, Pubkey), SdkError> {
        let oracle = self.oracles.get(asset.index());
        let backup = self.oracle_backup_feeds.get(asset.index());
        match (oracle, backup) {
            (Some(oracle), Some(backup)) => Ok((*oracle, *backup)),
            _ => Err(SdkError::UnknownAsset(asset)),
        }
    }
}

/// Resolved accounts of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubExchange {
    /// Asset this sub-exchange trades.
    pub asset: Asset,
    /// Zeta group (market group) address.
    #[serde(with = "serde_pubkey")]
    pub zeta_group: Pubkey,
    /// Greeks account.
    #[serde(with = "serde_pubkey")]
    pub greeks: Pubkey,
    /// Primary oracle.
    #[serde(with = "serde_pubkey")]
    pub oracle: Pubkey,
    /// Backup oracle feed.
    #[serde(with = "serde_pubkey")]
    pub oracle_backup_feed: Pubkey,
    /// Perp sync queue.
    #[serde(with = "serde_pubkey")]
    pub perp_sync_queue: Pubkey,
    /// Underlying mint the zeta group is keyed by.
    #[serde(with = "serde_pubkey")]
    pub underlying_mint: Pubkey,
    /// Greeks market nodes, one per dated market index.
    #[serde(with = "serde_pubkey::vec")]
    pub market_nodes: Vec<Pubkey>,
    /// Dated markets in index order.
    pub markets: Vec<Market>,
    /// The asset's perpetual market.
    pub perp_market: Market,
}

impl SubExchange {
    /// Returns the market at an index.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::MarketIndexOutOfRange` past the last market.
    pub fn market(&self, index: usize) -> Result<&Market, SdkError> {
        self.markets
            .get(index)
            .ok_or(SdkError::MarketIndexOutOfRange {
                asset: self.asset,
                index,
                count: self.markets.len(),
            })
    }

    /// Returns the dated market at `index`, or the perpetual market for `None`.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::MarketIndexOutOfRange` past the last market.
    pub fn select_market(&self, index: Option<usize>) -> Result<&Market, SdkError> {
        match index {
            Some(index) => self.market(index),
            None => Ok(&self.perp_market),
        }
    }

    /// Every market of the asset, dated markets first, perpetual last.
    pub fn all_markets(&self) -> impl Iterator<Item = &Market> + '_ {
        self.markets.iter().chain(std::iter::once(&self.perp_market))
    }

    /// Looks a market up by address, including the perpetual market.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::UnknownMarket` if no market has that address.
    pub fn market_by_address(&self, address: &Pubkey) -> Result<&Market, SdkError> {
        if self.perp_market.address == *address {
            return Ok(&self.perp_market);
        }
        self.markets
            .iter()
            .find(|market| market.address == *address)
            .ok_or(SdkError::UnknownMarket(*address))
    }

    /// Returns the greeks market node of a dated market.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::MarketIndexOutOfRange` past the last node.
    pub fn market_node(&self, index: usize) -> Result<Pubkey, SdkError> {
        self.market_nodes
            .get(index)
            .copied()
            .ok_or(SdkError::MarketIndexOutOfRange {
                asset: self.asset,
                index,
                count: self.market_nodes.len(),
            })
    }
}

/// Read-only snapshot of exchange configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeSnapshot {
    /// Program ids of the deployment.
    pub network: NetworkConfig,
    /// Schema generation of the deployment.
    pub schema: SchemaVersion,
    /// State account.
    #[serde(with = "serde_pubkey")]
    pub state: Pubkey,
    /// Order-book authority PDA.
    #[serde(with = "serde_pubkey")]
    pub serum_authority: Pubkey,
    /// Mint authority PDA.
    #[serde(with = "serde_pubkey")]
    pub mint_authority: Pubkey,
    /// Treasury wallet.
    #[serde(with = "serde_pubkey")]
    pub treasury_wallet: Pubkey,
    /// Referrals rewards wallet.
    #[serde(with = "serde_pubkey")]
    pub referrals_rewards_wallet: Pubkey,
    /// Combined collateral vault.
    #[serde(with = "serde_pubkey")]
    pub combined_vault: Pubkey,
    /// Combined insurance vault.
    #[serde(with = "serde_pubkey")]
    pub combined_insurance_vault: Pubkey,
    /// Combined socialized loss account.
    #[serde(with = "serde_pubkey")]
    pub combined_socialized_loss: Pubkey,
    /// USDC mint.
    #[serde(with = "serde_pubkey")]
    pub usdc_mint: Pubkey,
    /// Exchange admin recorded in the state account.
    #[serde(with = "serde_pubkey")]
    pub admin: Pubkey,
    /// Number of underlyings listed so far.
    pub num_underlyings: u8,
    /// Number of flex underlyings listed so far.
    pub num_flex_underlyings: u8,
    /// Unified pricing account, present from the pricing schema on.
    #[serde(default)]
    pub pricing: Option<PricingSnapshot>,
    /// Per-asset sub-exchanges.
    #[serde(default)]
    pub sub_exchanges: BTreeMap<Asset, SubExchange>,
}

impl ExchangeSnapshot {
    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::Serialization` on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        serde_json::from_str(json).map_err(|e| SdkError::Serialization(e.to_string()))
    }

    /// Zeta program id.
    #[must_use]
    pub const fn program_id(&self) -> Pubkey {
        self.network.program_id
    }

    /// Order-book program id.
    #[must_use]
    pub const fn dex_program_id(&self) -> Pubkey {
        self.network.dex_program_id
    }

    /// Oracle backup program id.
    #[must_use]
    pub const fn oracle_backup_program_id(&self) -> Pubkey {
        self.network.oracle_backup_program_id
    }

    /// Assets initialized in the snapshot.
    pub fn assets(&self) -> impl Iterator<Item = Asset> + '_ {
        self.sub_exchanges.keys().copied()
    }

    /// Resolves the sub-exchange of an asset.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::UnknownAsset` if the asset is not initialized.
    pub fn resolve(&self, asset: Asset) -> Result<&SubExchange, SdkError> {
        self.sub_exchanges
            .get(&asset)
            .ok_or(SdkError::UnknownAsset(asset))
    }

    /// Returns a dated market of an asset.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::UnknownAsset` or `SdkError::MarketIndexOutOfRange`.
    pub fn market(&self, asset: Asset, index: usize) -> Result<&Market, SdkError> {
        self.resolve(asset)?.market(index)
    }

    /// Returns the perpetual market of an asset.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::UnknownAsset` if the asset is not initialized.
    pub fn perp_market(&self, asset: Asset) -> Result<&Market, SdkError> {
        Ok(&self.resolve(asset)?.perp_market)
    }

    /// Returns the pricing section required by a pricing-schema instruction.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::SchemaVersionMismatch` if the snapshot predates the
    /// pricing account.
    pub fn pricing(&self, instruction: &'static str) -> Result<&PricingSnapshot, SdkError> {
        self.pricing
            .as_ref()
            .ok_or(SdkError::SchemaVersionMismatch {
                instruction,
                required: SchemaVersion::Pricing,
            })
    }

    /// Checks internal consistency of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidInput` when a sub-exchange is filed under the
    /// wrong asset or a market index disagrees with its position.
    pub fn validate(&self) -> Result<(), SdkError> {
        self.network.validate()?;
        if self.schema == SchemaVersion::Pricing && self.pricing.is_none() {
            return Err(SdkError::InvalidInput(
                "pricing schema snapshot has no pricing section".to_string(),
            ));
        }
        for (asset, sub) in &self.sub_exchanges {
            if sub.asset != *asset {
                return Err(SdkError::InvalidInput(format!(
                    "sub-exchange for {} filed under {asset}",
                    sub.asset
                )));
            }
            if let Some((position, market)) = sub
                .markets
                .iter()
                .enumerate()
                .find(|(position, market)| market.index != *position)
            {
                return Err(SdkError::InvalidInput(format!(
                    "{asset} market {} listed at position {position}",
                    market.index
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{Network, NetworkConfig};
    use crate::types::market::tests::test_market;
    use crate::types::Kind;

    pub(crate) fn test_sub_exchange(asset: Asset, markets: usize) -> SubExchange {
        SubExchange {
            asset,
            zeta_group: Pubkey::new_unique(),
            greeks: Pubkey::new_unique(),
            oracle: Pubkey::new_unique(),
            oracle_backup_feed: Pubkey::new_unique(),
            perp_sync_queue: Pubkey::new_unique(),
            underlying_mint: Pubkey::new_unique(),
            market_nodes: (0..markets).map(|_| Pubkey::new_unique()).collect(),
            markets: (0..markets).map(|i| test_market(i, Kind::Future)).collect(),
            perp_market: test_market(markets, Kind::Perp),
        }
    }

    pub(crate) fn empty_snapshot(schema: SchemaVersion) -> ExchangeSnapshot {
        ExchangeSnapshot {
            network: NetworkConfig::for_network(Network::Devnet),
            schema,
            state: Pubkey::new_unique(),
            serum_authority: Pubkey::new_unique(),
            mint_authority: Pubkey::new_unique(),
            treasury_wallet: Pubkey::new_unique(),
            referrals_rewards_wallet: Pubkey::new_unique(),
            combined_vault: Pubkey::new_unique(),
            combined_insurance_vault: Pubkey::new_unique(),
            combined_socialized_loss: Pubkey::new_unique(),
            usdc_mint: Pubkey::new_unique(),
            admin: Pubkey::new_unique(),
            num_underlyings: 0,
            num_flex_underlyings: 0,
            pricing: match schema {
                SchemaVersion::ZetaGroup => None,
                SchemaVersion::Pricing => Some(PricingSnapshot {
                    address: Pubkey::new_unique(),
                    oracles: Asset::ALL.iter().map(|_| Pubkey::new_unique()).collect(),
                    oracle_backup_feeds: Asset::ALL.iter().map(|_| Pubkey::new_unique()).collect(),
                }),
            },
            sub_exchanges: BTreeMap::new(),
        }
    }

    /// Snapshot with BTC and SOL initialized, five dated markets each.
    pub(crate) fn test_snapshot(schema: SchemaVersion) -> ExchangeSnapshot {
        let mut snapshot = empty_snapshot(schema);
        for asset in [Asset::Btc, Asset::Sol] {
            snapshot
                .sub_exchanges
                .insert(asset, test_sub_exchange(asset, 5));
        }
        snapshot.num_underlyings = 2;
        snapshot
    }

    #[test]
    fn test_resolve_known_asset() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let sub = snapshot.resolve(Asset::Btc).expect("btc");
        assert_eq!(sub.asset, Asset::Btc);
    }

    #[test]
    fn test_resolve_unknown_asset() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        assert_eq!(
            snapshot.resolve(Asset::Eth),
            Err(SdkError::UnknownAsset(Asset::Eth))
        );
    }

    #[test]
    fn test_market_index_out_of_range() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        assert!(snapshot.market(Asset::Btc, 4).is_ok());
        assert_eq!(
            snapshot.market(Asset::Btc, 5),
            Err(SdkError::MarketIndexOutOfRange {
                asset: Asset::Btc,
                index: 5,
                count: 5
            })
        );
    }

    #[test]
    fn test_perp_market() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let perp = snapshot.perp_market(Asset::Sol).expect("perp");
        assert!(perp.is_perp());
    }

    #[test]
    fn test_market_by_address() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let sub = snapshot.resolve(Asset::Btc).expect("btc");
        let target = sub.markets[2].address;
        assert_eq!(sub.market_by_address(&target).map(|m| m.index), Ok(2));
        assert_eq!(
            sub.market_by_address(&sub.perp_market.address).map(|m| m.is_perp()),
            Ok(true)
        );
        let missing = Pubkey::new_unique();
        assert_eq!(
            sub.market_by_address(&missing),
            Err(SdkError::UnknownMarket(missing))
        );
    }

    #[test]
    fn test_pricing_required() {
        let old = test_snapshot(SchemaVersion::ZetaGroup);
        assert!(matches!(
            old.pricing("update_pricing_v2"),
            Err(SdkError::SchemaVersionMismatch { .. })
        ));
        let new = test_snapshot(SchemaVersion::Pricing);
        assert!(new.pricing("update_pricing_v2").is_ok());
    }

    #[test]
    fn test_pricing_oracles_for() {
        let snapshot = test_snapshot(SchemaVersion::Pricing);
        let pricing = snapshot.pricing("liquidate_v2").expect("pricing");
        let (oracle, backup) = pricing.oracles_for(Asset::Eth).expect("eth");
        assert_eq!(oracle, pricing.oracles[2]);
        assert_eq!(backup, pricing.oracle_backup_feeds[2]);
    }

    #[test]
    fn test_validate() {
        let mut snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        assert!(snapshot.validate().is_ok());

        let misfiled = test_sub_exchange(Asset::Eth, 1);
        snapshot.sub_exchanges.insert(Asset::Apt, misfiled);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_validate_market_positions() {
        let mut snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        if let Some(sub) = snapshot.sub_exchanges.get_mut(&Asset::Btc) {
            sub.markets.swap(0, 1);
        }
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = test_snapshot(SchemaVersion::Pricing);
        let json = serde_json::to_string(&snapshot).expect("serialize");
        assert!(json.contains("\"BTC\""));
        assert!(json.contains("\"schema\":\"pricing\""));
        let back = ExchangeSnapshot::from_json(&json).expect("deserialize");
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            ExchangeSnapshot::from_json("{"),
            Err(SdkError::Serialization(_))
        ));
    }
}
