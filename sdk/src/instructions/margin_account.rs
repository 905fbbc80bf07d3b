//! Margin and spread account lifecycle, and moves between them.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::constants::{SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::{Asset, MovementType, PositionMovementArg};

use super::accounts::{OracleAccounts, ToAccountMetas};
use super::new_instruction;

#[derive(BorshSerialize)]
struct PositionMovementWire<'a> {
    movement_type: MovementType,
    movements: &'a [PositionMovementArg],
}

fn initialize_account(
    snapshot: &ExchangeSnapshot,
    name: &str,
    zeta_group: Pubkey,
    account: Pubkey,
    user: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new_readonly(zeta_group, false),
        AccountMeta::new(account, false),
        AccountMeta::new_readonly(user, true),
        AccountMeta::new(user, true),
        AccountMeta::new_readonly(snapshot.program_id(), false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
    ];
    new_instruction(snapshot.program_id(), name, accounts, &())
}

/// `initialize_margin_account`; `user` is both authority and payer.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn initialize_margin_account(
    snapshot: &ExchangeSnapshot,
    zeta_group: Pubkey,
    margin_account: Pubkey,
    user: Pubkey,
) -> Result<Instruction, SdkError> {
    initialize_account(
        snapshot,
        "initialize_margin_account",
        zeta_group,
        margin_account,
        user,
    )
}

/// `close_margin_account`.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` if the asset is not initialized.
pub fn close_margin_account(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    user: Pubkey,
    margin_account: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new(margin_account, false),
        AccountMeta::new(user, true),
        AccountMeta::new_readonly(snapshot.resolve(asset)?.zeta_group, false),
    ];
    new_instruction(snapshot.program_id(), "close_margin_account", accounts, &())
}

/// `initialize_spread_account`; `user` is both authority and payer.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn initialize_spread_account(
    snapshot: &ExchangeSnapshot,
    zeta_group: Pubkey,
    spread_account: Pubkey,
    user: Pubkey,
) -> Result<Instruction, SdkError> {
    initialize_account(
        snapshot,
        "initialize_spread_account",
        zeta_group,
        spread_account,
        user,
    )
}

/// `close_spread_account`.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn close_spread_account(
    snapshot: &ExchangeSnapshot,
    zeta_group: Pubkey,
    spread_account: Pubkey,
    user: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new_readonly(zeta_group, false),
        AccountMeta::new(spread_account, false),
        AccountMeta::new(user, true),
    ];
    new_instruction(snapshot.program_id(), "close_spread_account", accounts, &())
}

/// `position_movement`: locks positions into, or unlocks them from, the
/// spread account.
///
/// # Errors
///
/// Returns `SdkError::InvalidInput` for an empty movement list, or
/// `SdkError::UnknownAsset`.
pub fn position_movement(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    margin_account: Pubkey,
    spread_account: Pubkey,
    user: Pubkey,
    movement_type: MovementType,
    movements: &[PositionMovementArg],
) -> Result<Instruction, SdkError> {
    if movements.is_empty() {
        return Err(SdkError::InvalidInput(
            "position movement needs at least one leg".to_string(),
        ));
    }
    let sub = snapshot.resolve(asset)?;
    let mut accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(sub.zeta_group, false),
        AccountMeta::new(margin_account, false),
        AccountMeta::new(spread_account, false),
        AccountMeta::new_readonly(user, true),
        AccountMeta::new_readonly(sub.greeks, false),
    ];
    OracleAccounts::for_sub_exchange(snapshot, sub).append_to(&mut accounts);
    new_instruction(
        snapshot.program_id(),
        "position_movement",
        accounts,
        &PositionMovementWire {
            movement_type,
            movements,
        },
    )
}

/// `transfer_excess_spread_balance`: returns spread account collateral that
/// is no longer needed to the margin account.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn transfer_excess_spread_balance(
    snapshot: &ExchangeSnapshot,
    zeta_group: Pubkey,
    margin_account: Pubkey,
    spread_account: Pubkey,
    user: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new_readonly(zeta_group, false),
        AccountMeta::new(margin_account, false),
        AccountMeta::new(spread_account, false),
        AccountMeta::new_readonly(user, true),
    ];
    new_instruction(
        snapshot.program_id(),
        "transfer_excess_spread_balance",
        accounts,
        &(),
    )
}

/// `edit_delegated_pubkey`: sets the key allowed to trade on the margin
/// account's behalf.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` if the asset is not initialized.
pub fn edit_delegated_pubkey(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    delegated_pubkey: Pubkey,
    margin_account: Pubkey,
    authority: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(snapshot.resolve(asset)?.zeta_group, false),
        AccountMeta::new(margin_account, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(authority, true),
    ];
    new_instruction(
        snapshot.program_id(),
        "edit_delegated_pubkey",
        accounts,
        &delegated_pubkey.to_bytes(),
    )
}
