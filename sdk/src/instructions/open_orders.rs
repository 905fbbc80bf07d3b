//! Open orders account lifecycle.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::constants::{RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID};
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::Asset;

use super::new_instruction;
use super::pda::ProgramAddress;

/// `initialize_open_orders` on `market` for `user`.
///
/// Returns the instruction and the derived open orders account.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` or `SdkError::InvalidSeed`.
pub fn initialize_open_orders(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market: Pubkey,
    user: Pubkey,
    authority: Pubkey,
    margin_account: Pubkey,
) -> Result<(Instruction, Pubkey), SdkError> {
    let program_id = snapshot.program_id();
    let zeta_group = snapshot.resolve(asset)?.zeta_group;
    let open_orders = ProgramAddress::OpenOrders {
        dex_program: snapshot.dex_program_id(),
        market,
        owner: user,
    }
    .address(&program_id)?;
    let open_orders_map = ProgramAddress::OpenOrdersMap { open_orders }.address(&program_id)?;

    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(zeta_group, false),
        AccountMeta::new_readonly(snapshot.dex_program_id(), false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new(open_orders, false),
        AccountMeta::new_readonly(margin_account, false),
        AccountMeta::new_readonly(authority, true),
        AccountMeta::new(authority, true),
        AccountMeta::new_readonly(market, false),
        AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
        AccountMeta::new_readonly(snapshot.serum_authority, false),
        AccountMeta::new(open_orders_map, false),
    ];
    let ix = new_instruction(program_id, "initialize_open_orders", accounts, &())?;
    Ok((ix, open_orders))
}

/// `close_open_orders`: closes `open_orders` and its map entry.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` or `SdkError::InvalidSeed`.
pub fn close_open_orders(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market: Pubkey,
    user: Pubkey,
    margin_account: Pubkey,
    open_orders: Pubkey,
) -> Result<Instruction, SdkError> {
    let program_id = snapshot.program_id();
    let zeta_group = snapshot.resolve(asset)?.zeta_group;
    let (open_orders_map, map_nonce) =
        ProgramAddress::OpenOrdersMap { open_orders }.derive(&program_id)?;

    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(zeta_group, false),
        AccountMeta::new_readonly(snapshot.dex_program_id(), false),
        AccountMeta::new(open_orders, false),
        AccountMeta::new(margin_account, false),
        AccountMeta::new(user, true),
        AccountMeta::new_readonly(market, false),
        AccountMeta::new_readonly(snapshot.serum_authority, false),
        AccountMeta::new(open_orders_map, false),
    ];
    new_instruction(program_id, "close_open_orders", accounts, &map_nonce)
}
