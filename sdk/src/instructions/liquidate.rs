//! Liquidation instruction builder.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use tracing::debug;

use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::Asset;

use super::accounts::{OracleAccounts, ToAccountMetas};
use super::new_instruction;
use super::variant::{InstructionVariant, LiquidateVariant};

/// Parties and market of a liquidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Liquidation {
    /// Asset of the market.
    pub asset: Asset,
    /// Signing liquidator.
    pub liquidator: Pubkey,
    /// Margin account receiving the position.
    pub liquidator_margin_account: Pubkey,
    /// Market the position is on.
    pub market: Pubkey,
    /// Margin account being liquidated.
    pub liquidated_margin_account: Pubkey,
}

/// `liquidate` / `liquidate_v2` for `size` contracts in native units.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`, or `SdkError::SchemaVersionMismatch`
/// for v2 against a pre-pricing snapshot.
pub fn liquidate(
    snapshot: &ExchangeSnapshot,
    variant: LiquidateVariant,
    liquidation: &Liquidation,
    size: u64,
) -> Result<Instruction, SdkError> {
    debug!(asset = %liquidation.asset, variant = variant.name(), size, "building liquidation");

    let mut accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(liquidation.liquidator, true),
        AccountMeta::new(liquidation.liquidator_margin_account, false),
    ];
    match variant {
        LiquidateVariant::V1 => {
            let sub = snapshot.resolve(liquidation.asset)?;
            accounts.push(AccountMeta::new_readonly(sub.greeks, false));
            OracleAccounts::for_sub_exchange(snapshot, sub).append_to(&mut accounts);
            accounts.extend([
                AccountMeta::new_readonly(liquidation.market, false),
                AccountMeta::new_readonly(sub.zeta_group, false),
            ]);
        }
        LiquidateVariant::V2 => {
            let pricing = snapshot.pricing(variant.name())?;
            accounts.push(AccountMeta::new(pricing.address, false));
            OracleAccounts::from_pair(snapshot, pricing.oracles_for(liquidation.asset)?)
                .append_to(&mut accounts);
            accounts.push(AccountMeta::new_readonly(liquidation.market, false));
        }
    }
    accounts.push(AccountMeta::new(liquidation.liquidated_margin_account, false));

    new_instruction(snapshot.program_id(), variant.name(), accounts, &size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::tests::test_snapshot;
    use crate::exchange::SchemaVersion;

    fn liquidation(snapshot: &ExchangeSnapshot) -> Liquidation {
        Liquidation {
            asset: Asset::Btc,
            liquidator: Pubkey::new_unique(),
            liquidator_margin_account: Pubkey::new_unique(),
            market: snapshot.market(Asset::Btc, 0).expect("market").address,
            liquidated_margin_account: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_liquidate_v1() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let target = liquidation(&snapshot);
        let ix = liquidate(&snapshot, LiquidateVariant::V1, &target, 1_000)
            .expect("should build instruction");
        let sub = snapshot.resolve(Asset::Btc).expect("btc");
        assert_eq!(ix.accounts.len(), 10);
        assert_eq!(ix.accounts[3].pubkey, sub.greeks);
        assert_eq!(ix.accounts[8].pubkey, sub.zeta_group);
        assert_eq!(ix.accounts[9].pubkey, target.liquidated_margin_account);
        assert_eq!(&ix.data[8..], &1_000u64.to_le_bytes());
    }

    #[test]
    fn test_liquidate_v2_reads_pricing_oracles() {
        let snapshot = test_snapshot(SchemaVersion::Pricing);
        let target = liquidation(&snapshot);
        let ix = liquidate(&snapshot, LiquidateVariant::V2, &target, 1_000)
            .expect("should build instruction");
        let pricing = snapshot.pricing("liquidate_v2").expect("pricing");
        assert_eq!(ix.accounts.len(), 9);
        assert_eq!(ix.accounts[3].pubkey, pricing.address);
        assert_eq!(ix.accounts[4].pubkey, pricing.oracles[Asset::Btc.index()]);
        assert_eq!(
            ix.accounts[5].pubkey,
            pricing.oracle_backup_feeds[Asset::Btc.index()]
        );
    }

    #[test]
    fn test_liquidate_zero_size_is_encoded() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let target = liquidation(&snapshot);
        let ix = liquidate(&snapshot, LiquidateVariant::V1, &target, 0)
            .expect("should build instruction");
        assert_eq!(&ix.data[8..], &0u64.to_le_bytes());
    }
}
