//! Expiry settlement of margin and spread accounts.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::constants::MAX_SETTLEMENT_ACCOUNTS;
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::Asset;

use super::accounts::writable_remaining;
use super::batch::build_batched;
use super::new_instruction;
use super::variant::{InstructionVariant, SettlePositionsHaltedVariant};

/// Settlement account of one expiry, as produced by
/// [`ProgramAddress::Settlement`](super::pda::ProgramAddress::Settlement).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementTarget {
    /// Expiry timestamp in seconds.
    pub expiration_ts: u64,
    /// Settlement account address.
    pub settlement_account: Pubkey,
    /// Bump of the settlement account.
    pub nonce: u8,
}

fn settle(
    snapshot: &ExchangeSnapshot,
    name: &str,
    asset: Asset,
    target: &SettlementTarget,
    accounts: &[Pubkey],
) -> Result<Instruction, SdkError> {
    let mut metas = vec![
        AccountMeta::new_readonly(snapshot.resolve(asset)?.zeta_group, false),
        AccountMeta::new_readonly(target.settlement_account, false),
    ];
    metas.extend(writable_remaining(accounts));
    new_instruction(
        snapshot.program_id(),
        name,
        metas,
        &(target.expiration_ts, target.nonce),
    )
}

/// `settle_positions` for a set of margin accounts.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn settle_positions(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    target: &SettlementTarget,
    margin_accounts: &[Pubkey],
) -> Result<Instruction, SdkError> {
    settle(snapshot, "settle_positions", asset, target, margin_accounts)
}

/// `settle_positions` in chunks of `MAX_SETTLEMENT_ACCOUNTS`.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn settle_positions_txs(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    target: &SettlementTarget,
    margin_accounts: &[Pubkey],
) -> Result<Vec<Instruction>, SdkError> {
    build_batched(margin_accounts, MAX_SETTLEMENT_ACCOUNTS, |chunk| {
        settle_positions(snapshot, asset, target, chunk)
    })
}

/// `settle_spread_positions` for a set of spread accounts.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn settle_spread_positions(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    target: &SettlementTarget,
    spread_accounts: &[Pubkey],
) -> Result<Instruction, SdkError> {
    settle(snapshot, "settle_spread_positions", asset, target, spread_accounts)
}

/// `settle_positions_halted` / `_v2`: admin settlement of a halted group.
/// `asset` is only read by the v1 layout.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` for v1, or
/// `SdkError::SchemaVersionMismatch` for v2 against a pre-pricing snapshot.
pub fn settle_positions_halted(
    snapshot: &ExchangeSnapshot,
    variant: SettlePositionsHaltedVariant,
    asset: Asset,
    margin_accounts: &[Pubkey],
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let mut accounts = vec![AccountMeta::new_readonly(snapshot.state, false)];
    match variant {
        SettlePositionsHaltedVariant::V1 => {
            let sub = snapshot.resolve(asset)?;
            accounts.extend([
                AccountMeta::new_readonly(sub.zeta_group, false),
                AccountMeta::new_readonly(sub.greeks, false),
            ]);
        }
        SettlePositionsHaltedVariant::V2 => {
            let pricing = snapshot.pricing(variant.name())?;
            accounts.push(AccountMeta::new_readonly(pricing.address, false));
        }
    }
    accounts.push(AccountMeta::new_readonly(admin, true));
    accounts.extend(writable_remaining(margin_accounts));
    new_instruction(snapshot.program_id(), variant.name(), accounts, &())
}

/// [`settle_positions_halted`] in chunks of `MAX_SETTLEMENT_ACCOUNTS`.
///
/// # Errors
///
/// Same as [`settle_positions_halted`].
pub fn settle_positions_halted_txs(
    snapshot: &ExchangeSnapshot,
    variant: SettlePositionsHaltedVariant,
    asset: Asset,
    margin_accounts: &[Pubkey],
    admin: Pubkey,
) -> Result<Vec<Instruction>, SdkError> {
    build_batched(margin_accounts, MAX_SETTLEMENT_ACCOUNTS, |chunk| {
        settle_positions_halted(snapshot, variant, asset, chunk, admin)
    })
}

/// `settle_spread_positions_halted`.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn settle_spread_positions_halted(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    spread_accounts: &[Pubkey],
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let mut accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(sub.zeta_group, false),
        AccountMeta::new_readonly(sub.greeks, false),
        AccountMeta::new_readonly(admin, true),
    ];
    accounts.extend(writable_remaining(spread_accounts));
    new_instruction(
        snapshot.program_id(),
        "settle_spread_positions_halted",
        accounts,
        &(),
    )
}

/// [`settle_spread_positions_halted`] in chunks of `MAX_SETTLEMENT_ACCOUNTS`.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn settle_spread_positions_halted_txs(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    spread_accounts: &[Pubkey],
    admin: Pubkey,
) -> Result<Vec<Instruction>, SdkError> {
    build_batched(spread_accounts, MAX_SETTLEMENT_ACCOUNTS, |chunk| {
        settle_spread_positions_halted(snapshot, asset, chunk, admin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::tests::test_snapshot;
    use crate::exchange::SchemaVersion;
    use crate::instructions::ProgramAddress;

    fn keys(n: usize) -> Vec<Pubkey> {
        (0..n).map(|_| Pubkey::new_unique()).collect()
    }

    fn target(snapshot: &ExchangeSnapshot) -> SettlementTarget {
        let sub = snapshot.resolve(Asset::Btc).expect("btc");
        let expiration_ts = 1_700_000_000;
        let (settlement_account, nonce) = ProgramAddress::Settlement {
            underlying_mint: sub.underlying_mint,
            expiration_ts,
        }
        .derive(&snapshot.program_id())
        .expect("derive");
        SettlementTarget {
            expiration_ts,
            settlement_account,
            nonce,
        }
    }

    #[test]
    fn test_settle_positions_encoding() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let target = target(&snapshot);
        let ix = settle_positions(&snapshot, Asset::Btc, &target, &keys(2))
            .expect("should build instruction");
        assert_eq!(ix.accounts.len(), 4);
        assert_eq!(ix.accounts[1].pubkey, target.settlement_account);
        let args = &ix.data[8..];
        assert_eq!(&args[..8], &target.expiration_ts.to_le_bytes());
        assert_eq!(args[8], target.nonce);
    }

    #[test]
    fn test_settle_positions_txs_chunks() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let target = target(&snapshot);
        let accounts = keys(41);
        let ixs = settle_positions_txs(&snapshot, Asset::Btc, &target, &accounts)
            .expect("should build instructions");
        assert_eq!(ixs.len(), 3);
        assert_eq!(ixs[0].accounts.len(), 2 + MAX_SETTLEMENT_ACCOUNTS);
        assert_eq!(ixs[2].accounts.len(), 2 + 1);
        assert_eq!(ixs[2].accounts[2].pubkey, accounts[40]);
    }

    #[test]
    fn test_settle_positions_halted_variants() {
        let snapshot = test_snapshot(SchemaVersion::Pricing);
        let admin = Pubkey::new_unique();
        let v1 = settle_positions_halted(
            &snapshot,
            SettlePositionsHaltedVariant::V1,
            Asset::Sol,
            &keys(1),
            admin,
        )
        .expect("v1");
        let v2 = settle_positions_halted(
            &snapshot,
            SettlePositionsHaltedVariant::V2,
            Asset::Sol,
            &keys(1),
            admin,
        )
        .expect("v2");
        assert_eq!(v1.accounts.len(), 5);
        assert_eq!(v2.accounts.len(), 4);
        assert!(v1.accounts[3].is_signer);
        assert!(v2.accounts[2].is_signer);
        assert_ne!(v1.data[..8], v2.data[..8]);
    }

    #[test]
    fn test_settle_positions_halted_v2_requires_pricing() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let result = settle_positions_halted(
            &snapshot,
            SettlePositionsHaltedVariant::V2,
            Asset::Sol,
            &[],
            Pubkey::new_unique(),
        );
        assert!(matches!(
            result,
            Err(SdkError::SchemaVersionMismatch { .. })
        ));
    }

    #[test]
    fn test_settle_spread_positions_halted_txs() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let ixs = settle_spread_positions_halted_txs(
            &snapshot,
            Asset::Btc,
            &keys(20),
            Pubkey::new_unique(),
        )
        .expect("should build instructions");
        assert_eq!(ixs.len(), 1);
        assert_eq!(ixs[0].accounts.len(), 4 + 20);
    }
}
