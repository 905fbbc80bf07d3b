//! Market listing: indexes, strikes, market nodes and order-book markets.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use tracing::debug;

use crate::constants::{RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::Asset;

use super::accounts::{OracleAccounts, ToAccountMetas};
use super::new_instruction;
use super::pda::{derive_vault_signer, ProgramAddress};

/// `initialize_market_indexes` for an asset's zeta group. Returns the
/// instruction and the market indexes account.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` or `SdkError::InvalidSeed`.
pub fn initialize_market_indexes(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
) -> Result<(Instruction, Pubkey), SdkError> {
    let zeta_group = snapshot.resolve(asset)?.zeta_group;
    let (market_indexes, nonce) =
        ProgramAddress::MarketIndexes { zeta_group }.derive(&snapshot.program_id())?;
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(market_indexes, false),
        AccountMeta::new(snapshot.admin, true),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(zeta_group, false),
    ];
    let ix = new_instruction(
        snapshot.program_id(),
        "initialize_market_indexes",
        accounts,
        &nonce,
    )?;
    Ok((ix, market_indexes))
}

/// `add_market_indexes`.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn add_market_indexes(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market_indexes: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new(market_indexes, false),
        AccountMeta::new_readonly(snapshot.resolve(asset)?.zeta_group, false),
    ];
    new_instruction(snapshot.program_id(), "add_market_indexes", accounts, &())
}

/// `initialize_market_strikes` from the group's oracles.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn initialize_market_strikes(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let mut accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(sub.zeta_group, false),
    ];
    OracleAccounts::for_sub_exchange(snapshot, sub).append_to(&mut accounts);
    new_instruction(
        snapshot.program_id(),
        "initialize_market_strikes",
        accounts,
        &(),
    )
}

#[derive(BorshSerialize)]
struct MarketNodeArgs {
    nonce: u8,
    index: u8,
}

/// `initialize_market_node` at `index`, paid by `payer`.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` or `SdkError::InvalidSeed`.
pub fn initialize_market_node(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    index: u8,
    payer: Pubkey,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let (market_node, nonce) = ProgramAddress::MarketNode {
        zeta_group: sub.zeta_group,
        index,
    }
    .derive(&snapshot.program_id())?;
    let accounts = vec![
        AccountMeta::new_readonly(sub.zeta_group, false),
        AccountMeta::new(market_node, false),
        AccountMeta::new(sub.greeks, false),
        AccountMeta::new(payer, true),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
    ];
    new_instruction(
        snapshot.program_id(),
        "initialize_market_node",
        accounts,
        &MarketNodeArgs { nonce, index },
    )
}

/// `initialize_market_tif_epoch_cycle`: sets the time-in-force epoch length
/// of a market, in seconds.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` or `SdkError::MarketIndexOutOfRange`.
pub fn initialize_market_tif_epoch_cycle(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market_index: Option<usize>,
    cycle_length: u16,
) -> Result<Instruction, SdkError> {
    let market = snapshot.resolve(asset)?.select_market(market_index)?;
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(snapshot.admin, true),
        AccountMeta::new(market.address, false),
        AccountMeta::new_readonly(snapshot.serum_authority, false),
        AccountMeta::new_readonly(snapshot.dex_program_id(), false),
    ];
    new_instruction(
        snapshot.program_id(),
        "initialize_market_tif_epoch_cycle",
        accounts,
        &cycle_length,
    )
}

/// Dex accounts pre-allocated for a new market.
///
/// The caller creates them, owned by the dex program, with
/// [`REQUEST_QUEUE_SPACE`](crate::constants::REQUEST_QUEUE_SPACE),
/// [`EVENT_QUEUE_SPACE`](crate::constants::EVENT_QUEUE_SPACE) and
/// [`ORDERBOOK_SIDE_SPACE`](crate::constants::ORDERBOOK_SIDE_SPACE) bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketListing {
    /// Asset of the market.
    pub asset: Asset,
    /// Index the market takes in its zeta group.
    pub market_index: u8,
    /// Seed index of the uninitialized market address.
    pub seed_index: u8,
    /// Request queue.
    pub request_queue: Pubkey,
    /// Event queue.
    pub event_queue: Pubkey,
    /// Bids.
    pub bids: Pubkey,
    /// Asks.
    pub asks: Pubkey,
    /// Market indexes account of the group.
    pub market_indexes: Pubkey,
}

#[derive(BorshSerialize)]
struct InitializeMarketArgs {
    index: u8,
    market_nonce: u8,
    base_mint_nonce: u8,
    quote_mint_nonce: u8,
    zeta_base_vault_nonce: u8,
    zeta_quote_vault_nonce: u8,
    dex_base_vault_nonce: u8,
    dex_quote_vault_nonce: u8,
    vault_signer_nonce: u64,
}

/// `initialize_zeta_market`. Derives the market, its mints, the Zeta and
/// dex vaults and the dex vault signer. Returns the instruction and the
/// market address.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` or `SdkError::InvalidSeed`.
pub fn initialize_zeta_market(
    snapshot: &ExchangeSnapshot,
    listing: &MarketListing,
) -> Result<(Instruction, Pubkey), SdkError> {
    let program_id = snapshot.program_id();
    let dex_program = snapshot.dex_program_id();
    let zeta_group = snapshot.resolve(listing.asset)?.zeta_group;

    let (market, market_nonce) = ProgramAddress::UninitializedMarket {
        zeta_group,
        seed_index: listing.seed_index,
    }
    .derive(&program_id)?;
    let (vault_owner, vault_signer_nonce) = derive_vault_signer(&market, &dex_program)?;
    let (base_mint, base_mint_nonce) = ProgramAddress::BaseMint { market }.derive(&program_id)?;
    let (quote_mint, quote_mint_nonce) = ProgramAddress::QuoteMint { market }.derive(&program_id)?;
    let (zeta_base_vault, zeta_base_vault_nonce) =
        ProgramAddress::ZetaVault { mint: base_mint }.derive(&program_id)?;
    let (zeta_quote_vault, zeta_quote_vault_nonce) =
        ProgramAddress::ZetaVault { mint: quote_mint }.derive(&program_id)?;
    let (dex_base_vault, dex_base_vault_nonce) =
        ProgramAddress::SerumVault { mint: base_mint }.derive(&program_id)?;
    let (dex_quote_vault, dex_quote_vault_nonce) =
        ProgramAddress::SerumVault { mint: quote_mint }.derive(&program_id)?;
    debug!(
        asset = %listing.asset,
        index = listing.market_index,
        %market,
        vault_signer_nonce,
        "initializing zeta market"
    );

    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(listing.market_indexes, false),
        AccountMeta::new_readonly(zeta_group, false),
        AccountMeta::new(snapshot.admin, true),
        AccountMeta::new(market, false),
        AccountMeta::new(listing.request_queue, false),
        AccountMeta::new(listing.event_queue, false),
        AccountMeta::new(listing.bids, false),
        AccountMeta::new(listing.asks, false),
        AccountMeta::new(base_mint, false),
        AccountMeta::new(quote_mint, false),
        AccountMeta::new(zeta_base_vault, false),
        AccountMeta::new(zeta_quote_vault, false),
        AccountMeta::new(dex_base_vault, false),
        AccountMeta::new(dex_quote_vault, false),
        AccountMeta::new_readonly(vault_owner, false),
        AccountMeta::new_readonly(snapshot.mint_authority, false),
        AccountMeta::new_readonly(snapshot.serum_authority, false),
        AccountMeta::new_readonly(dex_program, false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
    ];
    let args = InitializeMarketArgs {
        index: listing.market_index,
        market_nonce,
        base_mint_nonce,
        quote_mint_nonce,
        zeta_base_vault_nonce,
        zeta_quote_vault_nonce,
        dex_base_vault_nonce,
        dex_quote_vault_nonce,
        vault_signer_nonce,
    };
    let ix = new_instruction(program_id, "initialize_zeta_market", accounts, &args)?;
    Ok((ix, market))
}
