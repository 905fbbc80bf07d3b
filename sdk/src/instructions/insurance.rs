//! Insurance vault deposits and withdrawals.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::constants::{SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;

use super::new_instruction;
use super::pda::ProgramAddress;

/// `initialize_insurance_deposit_account` for `user`, paid by `payer`.
///
/// Returns the instruction and the derived deposit account.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if derivation fails.
pub fn initialize_insurance_deposit_account(
    snapshot: &ExchangeSnapshot,
    payer: Pubkey,
    user: Pubkey,
    whitelist_insurance_account: Pubkey,
) -> Result<(Instruction, Pubkey), SdkError> {
    let (deposit_account, nonce) =
        ProgramAddress::UserInsuranceDeposit { user }.derive(&snapshot.program_id())?;
    let accounts = vec![
        AccountMeta::new(deposit_account, false),
        AccountMeta::new(payer, true),
        AccountMeta::new_readonly(user, true),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(whitelist_insurance_account, false),
    ];
    let ix = new_instruction(
        snapshot.program_id(),
        "initialize_insurance_deposit_account",
        accounts,
        &nonce,
    )?;
    Ok((ix, deposit_account))
}

/// `deposit_insurance_vault`: `amount` in native USDC units.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn deposit_insurance_vault(
    snapshot: &ExchangeSnapshot,
    amount: u64,
    insurance_deposit_account: Pubkey,
    user_token_account: Pubkey,
    user: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(snapshot.combined_insurance_vault, false),
        AccountMeta::new(insurance_deposit_account, false),
        AccountMeta::new(user_token_account, false),
        AccountMeta::new(snapshot.combined_vault, false),
        AccountMeta::new(snapshot.combined_socialized_loss, false),
        AccountMeta::new_readonly(user, true),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
    ];
    new_instruction(
        snapshot.program_id(),
        "deposit_insurance_vault",
        accounts,
        &amount,
    )
}

/// `withdraw_insurance_vault`: withdraws a percentage of the user's share.
///
/// # Errors
///
/// Returns `SdkError::InvalidInput` if `percentage` is zero or above 100.
pub fn withdraw_insurance_vault(
    snapshot: &ExchangeSnapshot,
    percentage: u64,
    insurance_deposit_account: Pubkey,
    user_token_account: Pubkey,
    user: Pubkey,
) -> Result<Instruction, SdkError> {
    if percentage == 0 || percentage > 100 {
        return Err(SdkError::InvalidInput(format!(
            "withdrawal percentage {percentage} outside 1..=100"
        )));
    }
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(snapshot.combined_insurance_vault, false),
        AccountMeta::new(insurance_deposit_account, false),
        AccountMeta::new(user_token_account, false),
        AccountMeta::new_readonly(user, true),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
    ];
    new_instruction(
        snapshot.program_id(),
        "withdraw_insurance_vault",
        accounts,
        &percentage,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::tests::test_snapshot;
    use crate::exchange::SchemaVersion;

    #[test]
    fn test_initialize_insurance_deposit_account() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let user = Pubkey::new_unique();
        let (ix, account) = initialize_insurance_deposit_account(
            &snapshot,
            user,
            user,
            Pubkey::new_unique(),
        )
        .expect("should build instruction");

        let (expected, nonce) = ProgramAddress::UserInsuranceDeposit { user }
            .derive(&snapshot.program_id())
            .expect("derive");
        assert_eq!(account, expected);
        assert_eq!(ix.accounts[0].pubkey, expected);
        assert_eq!(ix.data[8..], [nonce]);
    }

    #[test]
    fn test_deposit_insurance_vault() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let ix = deposit_insurance_vault(
            &snapshot,
            5_000_000,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
        )
        .expect("should build instruction");
        assert_eq!(ix.accounts.len(), 8);
        assert_eq!(ix.accounts[1].pubkey, snapshot.combined_insurance_vault);
        assert_eq!(ix.accounts[4].pubkey, snapshot.combined_vault);
    }

    #[test]
    fn test_withdraw_insurance_vault_percentage() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let build = |pct| {
            withdraw_insurance_vault(
                &snapshot,
                pct,
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
            )
        };
        assert!(build(100).is_ok());
        assert!(matches!(build(0), Err(SdkError::InvalidInput(_))));
        assert!(matches!(build(101), Err(SdkError::InvalidInput(_))));
    }
}
