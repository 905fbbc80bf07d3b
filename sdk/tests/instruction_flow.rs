//! End-to-end builder flows against a snapshot loaded through JSON.

mod common;

use solana_sdk::pubkey::Pubkey;
use zeta_sdk::constants::{MAX_SETTLEMENT_ACCOUNTS, MAX_SETTLE_ACCOUNTS};
use zeta_sdk::instructions::{
    crank, discriminator, settlement, InstructionVariant, MarketAccounts, PlaceOrderBuilder,
    PlaceOrderVariant, ProgramAddress,
};
use zeta_sdk::{
    Asset, ExchangeSnapshot, OrderOptions, Price, SchemaVersion, SdkError, Side, Size,
};

fn reload(snapshot: &ExchangeSnapshot) -> ExchangeSnapshot {
    let json = serde_json::to_string(snapshot).expect("serialize snapshot");
    ExchangeSnapshot::from_json(&json).expect("parse snapshot")
}

#[test]
fn test_snapshot_survives_json() {
    let snapshot = common::snapshot(SchemaVersion::Pricing);
    let reloaded = reload(&snapshot);
    assert_eq!(reloaded, snapshot);
    assert!(reloaded.validate().is_ok());
}

#[test]
fn test_btc_bid_pays_from_quote_vault() {
    let snapshot = reload(&common::snapshot(SchemaVersion::ZetaGroup));
    let ix = PlaceOrderBuilder::new(&snapshot)
        .asset(Asset::Btc)
        .market_index(3)
        .side(Side::Bid)
        .price(Price::new(21_000_000_000))
        .size(Size::new(500_000))
        .margin_account(Pubkey::new_unique())
        .authority(Pubkey::new_unique())
        .open_orders(Pubkey::new_unique())
        .build()
        .expect("should build place order");

    let market = snapshot.market(Asset::Btc, 3).expect("market");
    let payer = 10 + MarketAccounts::PAYER_OFFSET;
    assert_eq!(ix.accounts[payer].pubkey, market.quote_vault);
    assert_eq!(ix.data[..8], PlaceOrderVariant::V4.discriminator());
    assert_eq!(&ix.data[8..16], &21_000_000_000u64.to_le_bytes());
    assert_eq!(&ix.data[16..24], &500_000u64.to_le_bytes());
}

#[test]
fn test_oversized_tag_is_rejected_before_lookup() {
    // ETH is not listed; the tag check must fail first.
    let snapshot = common::snapshot(SchemaVersion::ZetaGroup);
    let result = PlaceOrderBuilder::new(&snapshot)
        .asset(Asset::Eth)
        .market_index(0)
        .side(Side::Ask)
        .price(Price::new(1))
        .size(Size::new(1))
        .options(OrderOptions::default().with_tag("TOOLONG"))
        .margin_account(Pubkey::new_unique())
        .authority(Pubkey::new_unique())
        .open_orders(Pubkey::new_unique())
        .build();
    assert!(matches!(result, Err(SdkError::InvalidInput(_))));
}

#[test]
fn test_perp_order_follows_snapshot_schema() {
    for (schema, expected) in [
        (SchemaVersion::ZetaGroup, PlaceOrderVariant::PerpV2),
        (SchemaVersion::Pricing, PlaceOrderVariant::PerpV3),
    ] {
        let snapshot = common::snapshot(schema);
        let ix = PlaceOrderBuilder::new(&snapshot)
            .asset(Asset::Sol)
            .side(Side::Ask)
            .price(Price::new(20_000_000))
            .size(Size::new(1_000))
            .margin_account(Pubkey::new_unique())
            .authority(Pubkey::new_unique())
            .open_orders(Pubkey::new_unique())
            .build()
            .expect("should build perp order");
        assert_eq!(ix.data[..8], discriminator(expected.name()));
    }
}

#[test]
fn test_settlement_batches_cover_every_account() {
    let snapshot = common::snapshot(SchemaVersion::ZetaGroup);
    let sub = snapshot.resolve(Asset::Btc).expect("btc");
    let expiration_ts = 1_700_000_000;
    let (settlement_account, nonce) = ProgramAddress::Settlement {
        underlying_mint: sub.underlying_mint,
        expiration_ts,
    }
    .derive(&snapshot.program_id())
    .expect("derive settlement");
    let target = settlement::SettlementTarget {
        expiration_ts,
        settlement_account,
        nonce,
    };
    let margin_accounts: Vec<Pubkey> = (0..55).map(|_| Pubkey::new_unique()).collect();

    let ixs = settlement::settle_positions_txs(&snapshot, Asset::Btc, &target, &margin_accounts)
        .expect("should build settlements");
    assert_eq!(ixs.len(), 3);
    assert!(ixs
        .iter()
        .all(|ix| ix.accounts.len() - 2 <= MAX_SETTLEMENT_ACCOUNTS));
    let settled: Vec<Pubkey> = ixs
        .iter()
        .flat_map(|ix| ix.accounts[2..].iter().map(|meta| meta.pubkey))
        .collect();
    assert_eq!(settled, margin_accounts);
}

#[test]
fn test_settle_dex_funds_respects_limit() {
    let snapshot = common::snapshot(SchemaVersion::ZetaGroup);
    let market = snapshot.market(Asset::Sol, 1).expect("market").address;
    let open_orders: Vec<Pubkey> = (0..MAX_SETTLE_ACCOUNTS * 2)
        .map(|_| Pubkey::new_unique())
        .collect();
    let ixs = crank::settle_dex_funds_txs(&snapshot, Asset::Sol, &market, &open_orders)
        .expect("should build settlements");
    assert_eq!(ixs.len(), 2);
    assert_eq!(ixs[1].accounts.last().map(|meta| meta.pubkey), open_orders.last().copied());
}
