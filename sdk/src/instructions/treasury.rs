//! Treasury wallet collection and transfers.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use tracing::debug;

use crate::constants::TOKEN_PROGRAM_ID;
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::TreasuryMovementType;

use super::new_instruction;

/// `collect_treasury_funds`: moves `amount` from the treasury wallet to
/// `collection_token_account`.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn collect_treasury_funds(
    snapshot: &ExchangeSnapshot,
    collection_token_account: Pubkey,
    amount: u64,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(snapshot.treasury_wallet, false),
        AccountMeta::new(collection_token_account, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(admin, true),
    ];
    new_instruction(
        snapshot.program_id(),
        "collect_treasury_funds",
        accounts,
        &amount,
    )
}

/// `treasury_movement` between the insurance vault, the treasury wallet and
/// the referrals rewards wallet.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn treasury_movement(
    snapshot: &ExchangeSnapshot,
    movement_type: TreasuryMovementType,
    amount: u64,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    debug!(?movement_type, amount, "building treasury movement");
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(snapshot.combined_insurance_vault, false),
        AccountMeta::new(snapshot.treasury_wallet, false),
        AccountMeta::new(snapshot.referrals_rewards_wallet, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(admin, true),
    ];
    new_instruction(
        snapshot.program_id(),
        "treasury_movement",
        accounts,
        &(movement_type, amount),
    )
}
