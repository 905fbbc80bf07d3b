//! Referral program instructions.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::constants::{SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::SetReferralsRewardsArgs;

use super::accounts::writable_remaining;
use super::new_instruction;
use super::pda::ProgramAddress;

/// `refer_user`: records `referrer` as the referrer of `user`.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if derivation fails.
pub fn refer_user(
    snapshot: &ExchangeSnapshot,
    user: Pubkey,
    referrer: Pubkey,
) -> Result<Instruction, SdkError> {
    let program_id = snapshot.program_id();
    let referrer_account = ProgramAddress::Referrer { referrer }.address(&program_id)?;
    let referral_account = ProgramAddress::Referral { user }.address(&program_id)?;
    let accounts = vec![
        AccountMeta::new(user, true),
        AccountMeta::new_readonly(referrer_account, false),
        AccountMeta::new(referral_account, false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
    ];
    new_instruction(program_id, "refer_user", accounts, &())
}

/// `initialize_referrer_account`. Returns the instruction and the account.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if derivation fails.
pub fn initialize_referrer_account(
    snapshot: &ExchangeSnapshot,
    referrer: Pubkey,
) -> Result<(Instruction, Pubkey), SdkError> {
    let program_id = snapshot.program_id();
    let referrer_account = ProgramAddress::Referrer { referrer }.address(&program_id)?;
    let accounts = vec![
        AccountMeta::new(referrer, true),
        AccountMeta::new(referrer_account, false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
    ];
    let ix = new_instruction(program_id, "initialize_referrer_account", accounts, &())?;
    Ok((ix, referrer_account))
}

/// `initialize_referrer_alias`: claims `alias` for `referrer`.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if `alias` is longer than a seed allows.
pub fn initialize_referrer_alias(
    snapshot: &ExchangeSnapshot,
    referrer: Pubkey,
    alias: &str,
) -> Result<Instruction, SdkError> {
    let program_id = snapshot.program_id();
    let referrer_alias = ProgramAddress::ReferrerAlias { alias }.address(&program_id)?;
    let referrer_account = ProgramAddress::Referrer { referrer }.address(&program_id)?;
    let accounts = vec![
        AccountMeta::new(referrer, true),
        AccountMeta::new(referrer_alias, false),
        AccountMeta::new(referrer_account, false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
    ];
    new_instruction(program_id, "initialize_referrer_alias", accounts, &alias)
}

/// `set_referrals_rewards`: credits pending rewards; the referral accounts
/// named in `args` go in `referral_accounts`, in the same order.
///
/// # Errors
///
/// Returns `SdkError::InvalidInput` if the two lists differ in length.
pub fn set_referrals_rewards(
    snapshot: &ExchangeSnapshot,
    args: &[SetReferralsRewardsArgs],
    referrals_admin: Pubkey,
    referral_accounts: &[Pubkey],
) -> Result<Instruction, SdkError> {
    if args.len() != referral_accounts.len() {
        return Err(SdkError::InvalidInput(format!(
            "{} rewards for {} referral accounts",
            args.len(),
            referral_accounts.len()
        )));
    }
    let mut accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(referrals_admin, true),
    ];
    accounts.extend(writable_remaining(referral_accounts));
    new_instruction(snapshot.program_id(), "set_referrals_rewards", accounts, &args)
}

/// `claim_referrals_rewards` into `user_token_account`.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn claim_referrals_rewards(
    snapshot: &ExchangeSnapshot,
    user_referrals_account: Pubkey,
    user_token_account: Pubkey,
    user: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(snapshot.referrals_rewards_wallet, false),
        AccountMeta::new(user_referrals_account, false),
        AccountMeta::new(user_token_account, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(user, true),
    ];
    new_instruction(
        snapshot.program_id(),
        "claim_referrals_rewards",
        accounts,
        &(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::tests::test_snapshot;
    use crate::exchange::SchemaVersion;

    #[test]
    fn test_refer_user_accounts() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let user = Pubkey::new_unique();
        let referrer = Pubkey::new_unique();
        let ix = refer_user(&snapshot, user, referrer).expect("should build instruction");
        let program_id = snapshot.program_id();
        assert_eq!(
            ix.accounts[1].pubkey,
            ProgramAddress::Referrer { referrer }.address(&program_id).expect("referrer")
        );
        assert_eq!(
            ix.accounts[2].pubkey,
            ProgramAddress::Referral { user }.address(&program_id).expect("referral")
        );
        assert!(ix.accounts[0].is_signer);
    }

    #[test]
    fn test_initialize_referrer_alias_encoding() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let ix = initialize_referrer_alias(&snapshot, Pubkey::new_unique(), "zeta")
            .expect("should build instruction");
        let args = &ix.data[8..];
        assert_eq!(&args[..4], &4u32.to_le_bytes());
        assert_eq!(&args[4..], b"zeta");
    }

    #[test]
    fn test_initialize_referrer_alias_too_long() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let alias = "a".repeat(33);
        assert!(matches!(
            initialize_referrer_alias(&snapshot, Pubkey::new_unique(), &alias),
            Err(SdkError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_set_referrals_rewards() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let referral = Pubkey::new_unique();
        let args = [SetReferralsRewardsArgs {
            referrals_account_key: referral,
            pending_rewards: 500,
            overwrite: false,
        }];
        let ix = set_referrals_rewards(&snapshot, &args, Pubkey::new_unique(), &[referral])
            .expect("should build instruction");
        assert_eq!(ix.accounts.len(), 3);
        assert!(ix.accounts[2].is_writable);
        let data = &ix.data[8..];
        assert_eq!(&data[..4], &1u32.to_le_bytes());
        assert_eq!(&data[4..36], referral.as_ref());
        assert_eq!(data.len(), 4 + 32 + 8 + 1);

        assert!(matches!(
            set_referrals_rewards(&snapshot, &args, Pubkey::new_unique(), &[]),
            Err(SdkError::InvalidInput(_))
        ));
    }
}
