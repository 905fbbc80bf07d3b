//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use solana_sdk::pubkey::Pubkey;
use zeta_sdk::types::DexMarket;
use zeta_sdk::{
    Asset, ExchangeSnapshot, Kind, Market, Network, NetworkConfig, PricingSnapshot,
    SchemaVersion, SubExchange,
};

pub fn market(index: usize, kind: Kind) -> Market {
    Market {
        index,
        address: Pubkey::new_unique(),
        kind,
        dex: DexMarket {
            request_queue: Pubkey::new_unique(),
            event_queue: Pubkey::new_unique(),
            bids: Pubkey::new_unique(),
            asks: Pubkey::new_unique(),
            base_vault: Pubkey::new_unique(),
            quote_vault: Pubkey::new_unique(),
            base_mint: Pubkey::new_unique(),
            quote_mint: Pubkey::new_unique(),
        },
        base_vault: Pubkey::new_unique(),
        quote_vault: Pubkey::new_unique(),
    }
}

pub fn sub_exchange(asset: Asset, markets: usize) -> SubExchange {
    SubExchange {
        asset,
        zeta_group: Pubkey::new_unique(),
        greeks: Pubkey::new_unique(),
        oracle: Pubkey::new_unique(),
        oracle_backup_feed: Pubkey::new_unique(),
        perp_sync_queue: Pubkey::new_unique(),
        underlying_mint: Pubkey::new_unique(),
        market_nodes: (0..markets).map(|_| Pubkey::new_unique()).collect(),
        markets: (0..markets).map(|i| market(i, Kind::Future)).collect(),
        perp_market: market(markets, Kind::Perp),
    }
}

/// Devnet snapshot with BTC and SOL listed, five dated markets each.
pub fn snapshot(schema: SchemaVersion) -> ExchangeSnapshot {
    let pricing = match schema {
        SchemaVersion::ZetaGroup => None,
        SchemaVersion::Pricing => Some(PricingSnapshot {
            address: Pubkey::new_unique(),
            oracles: Asset::ALL.iter().map(|_| Pubkey::new_unique()).collect(),
            oracle_backup_feeds: Asset::ALL.iter().map(|_| Pubkey::new_unique()).collect(),
        }),
    };
    let sub_exchanges: BTreeMap<Asset, SubExchange> = [Asset::Btc, Asset::Sol]
        .into_iter()
        .map(|asset| (asset, sub_exchange(asset, 5)))
        .collect();

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
        num_underlyings: 2,
        num_flex_underlyings: 0,
        pricing,
        sub_exchanges,
    }
}
