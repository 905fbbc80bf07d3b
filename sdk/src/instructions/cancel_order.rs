//! Cancel instruction builders.
//!
//! Every cancel shares the ten-account [`CancelAccounts`] group. User cancels
//! prefix the signing authority; permissionless cancels omit it, and the
//! force cancels prefix greeks and oracles instead.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use tracing::debug;

use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::{Asset, Side};

use super::accounts::{CancelAccounts, OracleAccounts, ToAccountMetas};
use super::new_instruction;
use super::variant::{CancelOrderVariant, InstructionVariant};

#[derive(Debug, Clone, BorshSerialize)]
struct CancelArgs {
    side: Side,
    order_id: u128,
}

/// Order being cancelled: where it rests and who owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelTarget {
    /// Asset of the market.
    pub asset: Asset,
    /// Dated market index, `None` for the perpetual market.
    pub market_index: Option<usize>,
    /// Margin account owning the order.
    pub margin_account: Pubkey,
    /// Open orders account of the margin account on the market.
    pub open_orders: Pubkey,
}

impl CancelTarget {
    /// Targets a dated market.
    #[must_use]
    pub const fn dated(
        asset: Asset,
        market_index: usize,
        margin_account: Pubkey,
        open_orders: Pubkey,
    ) -> Self {
        Self {
            asset,
            market_index: Some(market_index),
            margin_account,
            open_orders,
        }
    }

    /// Targets the perpetual market.
    #[must_use]
    pub const fn perp(asset: Asset, margin_account: Pubkey, open_orders: Pubkey) -> Self {
        Self {
            asset,
            market_index: None,
            margin_account,
            open_orders,
        }
    }

    /// Resolves the zeta-group keyed cancel accounts.
    fn zeta_group_accounts(&self, snapshot: &ExchangeSnapshot) -> Result<CancelAccounts, SdkError> {
        let sub = snapshot.resolve(self.asset)?;
        let market = sub.select_market(self.market_index)?;
        Ok(CancelAccounts::new(
            snapshot,
            sub.zeta_group,
            market,
            self.margin_account,
            self.open_orders,
        ))
    }
}

/// Builder for `cancel_order` and `cancel_order_v2`.
#[derive(Debug, Clone)]
pub struct CancelOrderBuilder<'a> {
    snapshot: &'a ExchangeSnapshot,
    variant: Option<CancelOrderVariant>,
    target: Option<CancelTarget>,
    authority: Option<Pubkey>,
    side: Option<Side>,
    order_id: Option<u128>,
}

impl<'a> CancelOrderBuilder<'a> {
    /// Creates a new builder reading from `snapshot`.
    #[must_use]
    pub fn new(snapshot: &'a ExchangeSnapshot) -> Self {
        Self {
            snapshot,
            variant: None,
            target: None,
            authority: None,
            side: None,
            order_id: None,
        }
    }

    /// Pins the layout. Defaults to the snapshot schema.
    #[must_use]
    pub fn variant(mut self, variant: CancelOrderVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Sets the order location and owner.
    #[must_use]
    pub fn target(mut self, target: CancelTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the signing authority.
    #[must_use]
    pub fn authority(mut self, authority: Pubkey) -> Self {
        self.authority = Some(authority);
        self
    }

    /// Sets the side the order rests on.
    #[must_use]
    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Sets the order id.
    #[must_use]
    pub fn order_id(mut self, order_id: u128) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidInput` for a missing field, or the snapshot
    /// lookup errors.
    pub fn build(self) -> Result<Instruction, SdkError> {
        let target = self.target.ok_or_else(|| SdkError::not_set("target"))?;
        let authority = self.authority.ok_or_else(|| SdkError::not_set("authority"))?;
        let side = self.side.ok_or_else(|| SdkError::not_set("side"))?;
        let order_id = self.order_id.ok_or_else(|| SdkError::not_set("order id"))?;

        let snapshot = self.snapshot;
        let variant = self
            .variant
            .unwrap_or_else(|| CancelOrderVariant::for_schema(snapshot.schema));
        debug!(asset = %target.asset, variant = variant.name(), %order_id, "building cancel order");

        let mut cancel = target.zeta_group_accounts(snapshot)?;
        if variant == CancelOrderVariant::V2 {
            cancel.zeta_group = snapshot.pricing(variant.name())?.address;
        }

        let mut accounts = vec![AccountMeta::new_readonly(authority, true)];
        cancel.append_to(&mut accounts);
        new_instruction(
            snapshot.program_id(),
            variant.name(),
            accounts,
            &CancelArgs { side, order_id },
        )
    }
}

fn with_authority(
    snapshot: &ExchangeSnapshot,
    target: &CancelTarget,
    authority: Pubkey,
) -> Result<Vec<AccountMeta>, SdkError> {
    let mut accounts = vec![AccountMeta::new_readonly(authority, true)];
    target.zeta_group_accounts(snapshot)?.append_to(&mut accounts);
    Ok(accounts)
}

fn with_oracles(
    snapshot: &ExchangeSnapshot,
    target: &CancelTarget,
) -> Result<Vec<AccountMeta>, SdkError> {
    let sub = snapshot.resolve(target.asset)?;
    let mut accounts = vec![AccountMeta::new_readonly(sub.greeks, false)];
    OracleAccounts::for_sub_exchange(snapshot, sub).append_to(&mut accounts);
    target.zeta_group_accounts(snapshot)?.append_to(&mut accounts);
    Ok(accounts)
}

/// `cancel_order_no_error`: like `cancel_order` but succeeds when the order
/// is already gone.
///
/// # Errors
///
/// Returns the snapshot lookup errors.
pub fn cancel_order_no_error(
    snapshot: &ExchangeSnapshot,
    target: &CancelTarget,
    authority: Pubkey,
    side: Side,
    order_id: u128,
) -> Result<Instruction, SdkError> {
    new_instruction(
        snapshot.program_id(),
        "cancel_order_no_error",
        with_authority(snapshot, target, authority)?,
        &CancelArgs { side, order_id },
    )
}

/// `cancel_all_market_orders`: cancels every order of the margin account on
/// one market.
///
/// # Errors
///
/// Returns the snapshot lookup errors.
pub fn cancel_all_market_orders(
    snapshot: &ExchangeSnapshot,
    target: &CancelTarget,
    authority: Pubkey,
) -> Result<Instruction, SdkError> {
    new_instruction(
        snapshot.program_id(),
        "cancel_all_market_orders",
        with_authority(snapshot, target, authority)?,
        &(),
    )
}

/// `cancel_order_by_client_order_id`.
///
/// # Errors
///
/// Returns the snapshot lookup errors.
pub fn cancel_order_by_client_order_id(
    snapshot: &ExchangeSnapshot,
    target: &CancelTarget,
    authority: Pubkey,
    client_order_id: u64,
) -> Result<Instruction, SdkError> {
    new_instruction(
        snapshot.program_id(),
        "cancel_order_by_client_order_id",
        with_authority(snapshot, target, authority)?,
        &client_order_id,
    )
}

/// `cancel_order_by_client_order_id_no_error`.
///
/// # Errors
///
/// Returns the snapshot lookup errors.
pub fn cancel_order_by_client_order_id_no_error(
    snapshot: &ExchangeSnapshot,
    target: &CancelTarget,
    authority: Pubkey,
    client_order_id: u64,
) -> Result<Instruction, SdkError> {
    new_instruction(
        snapshot.program_id(),
        "cancel_order_by_client_order_id_no_error",
        with_authority(snapshot, target, authority)?,
        &client_order_id,
    )
}

/// `cancel_expired_order`: permissionless cancel of an order past its
/// time-in-force.
///
/// # Errors
///
/// Returns the snapshot lookup errors.
pub fn cancel_expired_order(
    snapshot: &ExchangeSnapshot,
    target: &CancelTarget,
    side: Side,
    order_id: u128,
) -> Result<Instruction, SdkError> {
    new_instruction(
        snapshot.program_id(),
        "cancel_expired_order",
        target.zeta_group_accounts(snapshot)?.to_account_metas(),
        &CancelArgs { side, order_id },
    )
}

/// `cancel_order_halted`: permissionless cancel while the group is halted.
///
/// # Errors
///
/// Returns the snapshot lookup errors.
pub fn cancel_order_halted(
    snapshot: &ExchangeSnapshot,
    target: &CancelTarget,
    side: Side,
    order_id: u128,
) -> Result<Instruction, SdkError> {
    new_instruction(
        snapshot.program_id(),
        "cancel_order_halted",
        target.zeta_group_accounts(snapshot)?.to_account_metas(),
        &CancelArgs { side, order_id },
    )
}

/// `force_cancel_order_by_order_id`: cancels one order of an account under
/// maintenance margin.
///
/// # Errors
///
/// Returns the snapshot lookup errors.
pub fn force_cancel_order_by_order_id(
    snapshot: &ExchangeSnapshot,
    target: &CancelTarget,
    side: Side,
    order_id: u128,
) -> Result<Instruction, SdkError> {
    new_instruction(
        snapshot.program_id(),
        "force_cancel_order_by_order_id",
        with_oracles(snapshot, target)?,
        &CancelArgs { side, order_id },
    )
}

/// `force_cancel_orders`: cancels every order of an account under
/// maintenance margin on one market.
///
/// # Errors
///
/// Returns the snapshot lookup errors.
pub fn force_cancel_orders(
    snapshot: &ExchangeSnapshot,
    target: &CancelTarget,
) -> Result<Instruction, SdkError> {
    new_instruction(
        snapshot.program_id(),
        "force_cancel_orders",
        with_oracles(snapshot, target)?,
        &(),
    )
}

/// `prune_expired_tif_orders`: drops expired time-in-force orders from a
/// market's book.
///
/// # Errors
///
/// Returns the snapshot lookup errors.
pub fn prune_expired_tif_orders(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    market_index: Option<usize>,
) -> Result<Instruction, SdkError> {
    let market = snapshot.resolve(asset)?.select_market(market_index)?;
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.dex_program_id(), false),
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(snapshot.serum_authority, false),
        AccountMeta::new(market.address, false),
        AccountMeta::new(market.dex.bids, false),
        AccountMeta::new(market.dex.asks, false),
        AccountMeta::new(market.dex.event_queue, false),
    ];
    new_instruction(
        snapshot.program_id(),
        "prune_expired_tif_orders",
        accounts,
        &(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::tests::test_snapshot;
    use crate::exchange::SchemaVersion;
    use crate::instructions::discriminator;

    fn target() -> CancelTarget {
        CancelTarget::dated(Asset::Btc, 2, Pubkey::new_unique(), Pubkey::new_unique())
    }

    #[test]
    fn test_cancel_order_v1() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let target = target();
        let authority = Pubkey::new_unique();
        let ix = CancelOrderBuilder::new(&snapshot)
            .target(target)
            .authority(authority)
            .side(Side::Ask)
            .order_id(12_345)
            .build()
            .expect("should build instruction");

        let sub = snapshot.resolve(Asset::Btc).expect("btc");
        assert_eq!(ix.accounts.len(), 1 + CancelAccounts::LEN);
        assert_eq!(ix.accounts[0], AccountMeta::new_readonly(authority, true));
        assert_eq!(ix.accounts[1].pubkey, sub.zeta_group);
        assert_eq!(ix.accounts[3].pubkey, target.margin_account);
        assert_eq!(ix.accounts[6].pubkey, target.open_orders);
        assert_eq!(ix.accounts[7].pubkey, sub.markets[2].address);
        assert_eq!(&ix.data[..8], &CancelOrderVariant::V1.discriminator());
        assert_eq!(ix.data[8], 2);
        assert_eq!(&ix.data[9..], &12_345u128.to_le_bytes());
    }

    #[test]
    fn test_cancel_order_v2_uses_pricing() {
        let snapshot = test_snapshot(SchemaVersion::Pricing);
        let ix = CancelOrderBuilder::new(&snapshot)
            .target(target())
            .authority(Pubkey::new_unique())
            .side(Side::Bid)
            .order_id(1)
            .build()
            .expect("should build instruction");
        let pricing = snapshot.pricing("cancel_order_v2").expect("pricing");
        assert_eq!(ix.accounts[1].pubkey, pricing.address);
        assert_eq!(&ix.data[..8], &CancelOrderVariant::V2.discriminator());
    }

    #[test]
    fn test_cancel_order_v2_without_pricing() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let result = CancelOrderBuilder::new(&snapshot)
            .variant(CancelOrderVariant::V2)
            .target(target())
            .authority(Pubkey::new_unique())
            .side(Side::Bid)
            .order_id(1)
            .build();
        assert!(matches!(result, Err(SdkError::SchemaVersionMismatch { .. })));
    }

    #[test]
    fn test_permissionless_cancels_have_no_signer() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let target = target();
        for ix in [
            cancel_expired_order(&snapshot, &target, Side::Bid, 9).expect("expired"),
            cancel_order_halted(&snapshot, &target, Side::Bid, 9).expect("halted"),
        ] {
            assert_eq!(ix.accounts.len(), CancelAccounts::LEN);
            assert!(ix.accounts.iter().all(|meta| !meta.is_signer));
        }
    }

    #[test]
    fn test_force_cancel_prefix() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let sub = snapshot.resolve(Asset::Btc).expect("btc");
        let ix = force_cancel_orders(&snapshot, &target()).expect("force cancel");
        assert_eq!(ix.accounts.len(), 4 + CancelAccounts::LEN);
        assert_eq!(ix.accounts[0].pubkey, sub.greeks);
        assert_eq!(ix.accounts[1].pubkey, sub.oracle);
        assert_eq!(ix.accounts[3].pubkey, snapshot.oracle_backup_program_id());
        assert_eq!(ix.data, discriminator("force_cancel_orders").to_vec());

        let ix = force_cancel_order_by_order_id(&snapshot, &target(), Side::Ask, 5)
            .expect("force cancel by id");
        assert_eq!(ix.accounts.len(), 14);
        assert_eq!(ix.data.len(), 8 + 1 + 16);
    }

    #[test]
    fn test_cancel_by_client_order_id() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let ix = cancel_order_by_client_order_id(&snapshot, &target(), Pubkey::new_unique(), 77)
            .expect("cancel by client id");
        assert_eq!(&ix.data[8..], &77u64.to_le_bytes());
        let ix = cancel_order_by_client_order_id_no_error(
            &snapshot,
            &target(),
            Pubkey::new_unique(),
            77,
        )
        .expect("cancel by client id");
        assert_eq!(
            &ix.data[..8],
            &discriminator("cancel_order_by_client_order_id_no_error")
        );
    }

    #[test]
    fn test_perp_target() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let target = CancelTarget::perp(Asset::Sol, Pubkey::new_unique(), Pubkey::new_unique());
        let ix = cancel_all_market_orders(&snapshot, &target, Pubkey::new_unique())
            .expect("cancel all");
        let perp = snapshot.perp_market(Asset::Sol).expect("perp");
        assert_eq!(ix.accounts[7].pubkey, perp.address);
        assert_eq!(ix.accounts[10].pubkey, perp.dex.event_queue);
    }

    #[test]
    fn test_prune_expired_tif_orders() {
        let snapshot = test_snapshot(SchemaVersion::ZetaGroup);
        let ix = prune_expired_tif_orders(&snapshot, Asset::Btc, Some(1)).expect("prune");
        let market = snapshot.market(Asset::Btc, 1).expect("market");
        assert_eq!(ix.accounts.len(), 7);
        assert_eq!(ix.accounts[0].pubkey, snapshot.dex_program_id());
        assert_eq!(ix.accounts[3].pubkey, market.address);

        let result = prune_expired_tif_orders(&snapshot, Asset::Btc, Some(9));
        assert!(matches!(result, Err(SdkError::MarketIndexOutOfRange { .. })));
    }
}
