//! Shared fixtures for the planner tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use solana_sdk::pubkey::Pubkey;
use zeta_sdk::types::DexMarket;
use zeta_sdk::{
    Asset, ExchangeSnapshot, Kind, Market, Network, NetworkConfig, SchemaVersion, SubExchange,
};

fn market(index: usize, kind: Kind) -> Market {
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

fn sub_exchange(asset: Asset, markets: usize) -> SubExchange {
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

/// Devnet snapshot with SOL and BTC listed, `markets` dated markets each.
pub fn snapshot(markets: usize) -> ExchangeSnapshot {
    let sub_exchanges: BTreeMap<Asset, SubExchange> = [Asset::Sol, Asset::Btc]
        .into_iter()
        .map(|asset| (asset, sub_exchange(asset, markets)))
        .collect();

    ExchangeSnapshot {
        network: NetworkConfig::for_network(Network::Devnet),
        schema: SchemaVersion::ZetaGroup,
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
        pricing: None,
        sub_exchanges,
    }
}

pub fn keys(n: usize) -> Vec<Pubkey> {
    (0..n).map(|_| Pubkey::new_unique()).collect()
}
