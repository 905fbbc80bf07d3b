//! Permissionless maintenance instructions.
//!
//! Event queue cranking, pricing refreshes, perp funding, market node
//! upkeep, order-book fund settlement and insurance rebalancing. The bulk
//! operations come in `_txs` form returning one instruction per
//! transaction-sized chunk of remaining accounts.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use tracing::debug;

use crate::constants::{MAX_SETTLE_ACCOUNTS, PRODUCTS_PER_EXPIRY, TOKEN_PROGRAM_ID};
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::{Asset, Market};

use super::accounts::{writable_remaining, OracleAccounts, ToAccountMetas};
use super::batch::build_batched;
use super::new_instruction;
use super::pda::derive_vault_signer;
use super::variant::{InstructionVariant, RebalanceInsuranceVaultVariant, UpdatePricingVariant};

/// `crank_event_queue` for one market, with the open orders accounts of the
/// queued events as remaining accounts.
///
/// # Errors
///
/// Returns the snapshot lookup errors.
pub fn crank_event_queue(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market_index: Option<usize>,
    open_orders: &[Pubkey],
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let market = sub.select_market(market_index)?;
    let mut accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(sub.zeta_group, false),
        AccountMeta::new(market.address, false),
        AccountMeta::new(market.dex.event_queue, false),
        AccountMeta::new_readonly(snapshot.dex_program_id(), false),
        AccountMeta::new_readonly(snapshot.serum_authority, false),
    ];
    accounts.extend(writable_remaining(open_orders));
    new_instruction(snapshot.program_id(), "crank_event_queue", accounts, &())
}

/// `update_pricing` / `update_pricing_v2` for an asset. `expiry_index` is
/// only encoded by the v1 layout.
///
/// # Errors
///
/// Returns the snapshot lookup errors, or `SdkError::SchemaVersionMismatch`
/// for v2 against a pre-pricing snapshot.
pub fn update_pricing(
    snapshot: &ExchangeSnapshot,
    variant: UpdatePricingVariant,
    asset: Asset,
    expiry_index: Option<u8>,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let perp = &sub.perp_market;
    let mut accounts = vec![AccountMeta::new_readonly(snapshot.state, false)];
    match variant {
        UpdatePricingVariant::V1 => {
            accounts.extend([
                AccountMeta::new(sub.zeta_group, false),
                AccountMeta::new(sub.greeks, false),
            ]);
            OracleAccounts::for_sub_exchange(snapshot, sub).append_to(&mut accounts);
        }
        UpdatePricingVariant::V2 => {
            let pricing = snapshot.pricing(variant.name())?;
            accounts.push(AccountMeta::new(pricing.address, false));
            OracleAccounts::from_pair(snapshot, pricing.oracles_for(asset)?)
                .append_to(&mut accounts);
        }
    }
    accounts.extend([
        AccountMeta::new_readonly(perp.address, false),
        AccountMeta::new_readonly(perp.dex.bids, false),
        AccountMeta::new_readonly(perp.dex.asks, false),
    ]);

    let program_id = snapshot.program_id();
    match variant {
        UpdatePricingVariant::V1 => {
            new_instruction(program_id, variant.name(), accounts, &expiry_index)
        }
        UpdatePricingVariant::V2 => new_instruction(program_id, variant.name(), accounts, &asset),
    }
}

/// `update_pricing_halted`: admin pricing refresh while halted.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn update_pricing_halted(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    expiry_index: Option<u8>,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let perp = &sub.perp_market;
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(sub.zeta_group, false),
        AccountMeta::new(sub.greeks, false),
        AccountMeta::new_readonly(admin, true),
        AccountMeta::new_readonly(perp.address, false),
        AccountMeta::new_readonly(perp.dex.bids, false),
        AccountMeta::new_readonly(perp.dex.asks, false),
    ];
    new_instruction(
        snapshot.program_id(),
        "update_pricing_halted",
        accounts,
        &expiry_index,
    )
}

/// `apply_perp_funding` over a set of margin accounts.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn apply_perp_funding(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    margin_accounts: &[Pubkey],
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let mut accounts = vec![
        AccountMeta::new_readonly(sub.zeta_group, false),
        AccountMeta::new_readonly(sub.greeks, false),
    ];
    accounts.extend(writable_remaining(margin_accounts));
    new_instruction(snapshot.program_id(), "apply_perp_funding", accounts, &())
}

/// `apply_perp_funding` split into chunks of `limit` margin accounts.
///
/// # Errors
///
/// Returns `SdkError::InvalidInput` for a zero limit, or `SdkError::UnknownAsset`.
pub fn apply_perp_funding_txs(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    margin_accounts: &[Pubkey],
    limit: usize,
) -> Result<Vec<Instruction>, SdkError> {
    build_batched(margin_accounts, limit, |chunk| {
        apply_perp_funding(snapshot, asset, chunk)
    })
}

fn expiry_nodes(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    expiry_index: u8,
) -> Result<Vec<AccountMeta>, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let head = usize::from(expiry_index) * PRODUCTS_PER_EXPIRY;
    Ok(sub
        .market_nodes
        .iter()
        .skip(head)
        .take(PRODUCTS_PER_EXPIRY)
        .map(|node| AccountMeta::new(*node, false))
        .collect())
}

/// `retreat_market_nodes` for one expiry; the expiry's market nodes are the
/// remaining accounts.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn retreat_market_nodes(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    expiry_index: u8,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let mut accounts = vec![
        AccountMeta::new(sub.zeta_group, false),
        AccountMeta::new(sub.greeks, false),
    ];
    OracleAccounts::for_sub_exchange(snapshot, sub).append_to(&mut accounts);
    accounts.extend(expiry_nodes(snapshot, asset, expiry_index)?);
    new_instruction(
        snapshot.program_id(),
        "retreat_market_nodes",
        accounts,
        &expiry_index,
    )
}

/// `clean_market_nodes` for one expiry.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn clean_market_nodes(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    expiry_index: u8,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let mut accounts = vec![
        AccountMeta::new_readonly(sub.zeta_group, false),
        AccountMeta::new(sub.greeks, false),
    ];
    accounts.extend(expiry_nodes(snapshot, asset, expiry_index)?);
    new_instruction(
        snapshot.program_id(),
        "clean_market_nodes",
        accounts,
        &expiry_index,
    )
}

fn settle_dex_funds_accounts(
    snapshot: &ExchangeSnapshot,
    market: &Market,
) -> Result<Vec<AccountMeta>, SdkError> {
    let (vault_owner, _) = derive_vault_signer(&market.address, &snapshot.dex_program_id())?;
    Ok(vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(market.address, false),
        AccountMeta::new(market.base_vault, false),
        AccountMeta::new(market.quote_vault, false),
        AccountMeta::new(market.dex.base_vault, false),
        AccountMeta::new(market.dex.quote_vault, false),
        AccountMeta::new_readonly(vault_owner, false),
        AccountMeta::new_readonly(snapshot.mint_authority, false),
        AccountMeta::new_readonly(snapshot.serum_authority, false),
        AccountMeta::new_readonly(snapshot.dex_program_id(), false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
    ])
}

/// `settle_dex_funds` for the open orders accounts of one market. The vault
/// owner is the market's dex vault signer.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`, `SdkError::UnknownMarket` or
/// `SdkError::InvalidSeed`.
pub fn settle_dex_funds(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market: &Pubkey,
    open_orders: &[Pubkey],
) -> Result<Instruction, SdkError> {
    let market = snapshot.resolve(asset)?.market_by_address(market)?;
    let mut accounts = settle_dex_funds_accounts(snapshot, market)?;
    accounts.extend(writable_remaining(open_orders));
    new_instruction(snapshot.program_id(), "settle_dex_funds", accounts, &())
}

/// `settle_dex_funds` split into chunks of `MAX_SETTLE_ACCOUNTS` open orders.
///
/// # Errors
///
/// Same as [`settle_dex_funds`].
pub fn settle_dex_funds_txs(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market: &Pubkey,
    open_orders: &[Pubkey],
) -> Result<Vec<Instruction>, SdkError> {
    settle_dex_funds_batched(snapshot, asset, market, open_orders, MAX_SETTLE_ACCOUNTS)
}

/// `settle_dex_funds` split into chunks of `limit` open orders.
///
/// # Errors
///
/// Same as [`settle_dex_funds`], plus `SdkError::InvalidInput` for a zero limit.
pub fn settle_dex_funds_batched(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market: &Pubkey,
    open_orders: &[Pubkey],
    limit: usize,
) -> Result<Vec<Instruction>, SdkError> {
    debug!(%asset, %market, accounts = open_orders.len(), limit, "batching settle dex funds");
    build_batched(open_orders, limit, |chunk| {
        settle_dex_funds(snapshot, asset, market, chunk)
    })
}

/// `burn_vault_tokens` for both vaults of a market, quote first. The two
/// instructions belong in one transaction.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` or `SdkError::UnknownMarket`.
pub fn burn_vault_tokens(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market: &Pubkey,
) -> Result<Vec<Instruction>, SdkError> {
    let market = snapshot.resolve(asset)?.market_by_address(market)?;
    [
        (market.dex.quote_mint, market.quote_vault),
        (market.dex.base_mint, market.base_vault),
    ]
    .into_iter()
    .map(|(mint, vault)| {
        let accounts = vec![
            AccountMeta::new_readonly(snapshot.state, false),
            AccountMeta::new(mint, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(snapshot.serum_authority, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ];
        new_instruction(snapshot.program_id(), "burn_vault_tokens", accounts, &())
    })
    .collect()
}

/// `rebalance_insurance_vault` / `_v2`: sweeps fees from the margin accounts
/// given as remaining accounts. `asset` is only read by the v1 layout.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` for v1, or
/// `SdkError::SchemaVersionMismatch` for v2 against a pre-pricing snapshot.
pub fn rebalance_insurance_vault(
    snapshot: &ExchangeSnapshot,
    variant: RebalanceInsuranceVaultVariant,
    asset: Asset,
    margin_accounts: &[Pubkey],
) -> Result<Instruction, SdkError> {
    let group_key = match variant {
        RebalanceInsuranceVaultVariant::V1 => snapshot.resolve(asset)?.zeta_group,
        RebalanceInsuranceVaultVariant::V2 => snapshot.pricing(variant.name())?.address,
    };
    let mut accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(group_key, false),
        AccountMeta::new(snapshot.combined_vault, false),
        AccountMeta::new(snapshot.combined_insurance_vault, false),
        AccountMeta::new(snapshot.treasury_wallet, false),
        AccountMeta::new(snapshot.combined_socialized_loss, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
    ];
    accounts.extend(writable_remaining(margin_accounts));
    new_instruction(snapshot.program_id(), variant.name(), accounts, &())
}

fn clean_markets(
    snapshot: &ExchangeSnapshot,
    name: &str,
    asset: Asset,
    market_accounts: &[Pubkey],
) -> Result<Instruction, SdkError> {
    let mut accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(snapshot.resolve(asset)?.zeta_group, false),
    ];
    accounts.extend(writable_remaining(market_accounts));
    new_instruction(snapshot.program_id(), name, accounts, &())
}

/// `clean_zeta_markets` over expired market accounts.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn clean_zeta_markets(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market_accounts: &[Pubkey],
) -> Result<Instruction, SdkError> {
    clean_markets(snapshot, "clean_zeta_markets", asset, market_accounts)
}

/// `clean_zeta_markets_halted` over market accounts of a halted group.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn clean_zeta_markets_halted(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market_accounts: &[Pubkey],
) -> Result<Instruction, SdkError> {
    clean_markets(snapshot, "clean_zeta_markets_halted", asset, market_accounts)
}
