//! Nested account groups shared by several instructions.
//!
//! These mirror the sub-structs of the on-chain account contexts. Each group
//! flattens into its fixed slice of [`AccountMeta`]s in declaration order.

use solana_sdk::instruction::AccountMeta;
use solana_sdk::pubkey::Pubkey;

use crate::exchange::{ExchangeSnapshot, SubExchange};
use crate::types::{Market, Side};

/// Flattens a group into ordered account metas.
pub trait ToAccountMetas {
    /// Appends this group's accounts to `metas`.
    fn append_to(&self, metas: &mut Vec<AccountMeta>);

    /// Returns this group's accounts.
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        let mut metas = Vec::new();
        self.append_to(&mut metas);
        metas
    }
}

/// Order-book accounts of a place-order instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketAccounts {
    /// Market.
    pub market: Pubkey,
    /// Request queue.
    pub request_queue: Pubkey,
    /// Event queue.
    pub event_queue: Pubkey,
    /// Bids.
    pub bids: Pubkey,
    /// Asks.
    pub asks: Pubkey,
    /// Order-book base vault.
    pub coin_vault: Pubkey,
    /// Order-book quote vault.
    pub pc_vault: Pubkey,
    /// Zeta vault funding the order; depends on side.
    pub order_payer_token_account: Pubkey,
    /// Zeta base vault.
    pub coin_wallet: Pubkey,
    /// Zeta quote vault.
    pub pc_wallet: Pubkey,
}

impl MarketAccounts {
    /// Number of accounts in the group.
    pub const LEN: usize = 10;

    /// Position of the payer account within the group.
    pub const PAYER_OFFSET: usize = 7;

    /// Resolves the group for an order on `market`.
    #[must_use]
    pub const fn for_order(market: &Market, side: Side) -> Self {
        Self {
            market: market.address,
            request_queue: market.dex.request_queue,
            event_queue: market.dex.event_queue,
            bids: market.dex.bids,
            asks: market.dex.asks,
            coin_vault: market.dex.base_vault,
            pc_vault: market.dex.quote_vault,
            order_payer_token_account: market.payer_vault(side),
            coin_wallet: market.base_vault,
            pc_wallet: market.quote_vault,
        }
    }
}

impl ToAccountMetas for MarketAccounts {
    fn append_to(&self, metas: &mut Vec<AccountMeta>) {
        metas.extend([
            AccountMeta::new(self.market, false),
            AccountMeta::new(self.request_queue, false),
            AccountMeta::new(self.event_queue, false),
            AccountMeta::new(self.bids, false),
            AccountMeta::new(self.asks, false),
            AccountMeta::new(self.coin_vault, false),
            AccountMeta::new(self.pc_vault, false),
            AccountMeta::new(self.order_payer_token_account, false),
            AccountMeta::new(self.coin_wallet, false),
            AccountMeta::new(self.pc_wallet, false),
        ]);
    }
}

/// Shared accounts of every cancel instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelAccounts {
    /// Zeta group (v1) or pricing account (v2).
    pub zeta_group: Pubkey,
    /// State.
    pub state: Pubkey,
    /// Margin account owning the order.
    pub margin_account: Pubkey,
    /// Order-book program.
    pub dex_program: Pubkey,
    /// Order-book authority.
    pub serum_authority: Pubkey,
    /// Open orders of the margin account.
    pub open_orders: Pubkey,
    /// Market.
    pub market: Pubkey,
    /// Bids.
    pub bids: Pubkey,
    /// Asks.
    pub asks: Pubkey,
    /// Event queue.
    pub event_queue: Pubkey,
}

impl CancelAccounts {
    /// Number of accounts in the group.
    pub const LEN: usize = 10;

    /// Resolves the group. `group_key` is the zeta group or pricing account
    /// depending on the variant.
    #[must_use]
    pub const fn new(
        snapshot: &ExchangeSnapshot,
        group_key: Pubkey,
        market: &Market,
        margin_account: Pubkey,
        open_orders: Pubkey,
    ) -> Self {
        Self {
            zeta_group: group_key,
            state: snapshot.state,
            margin_account,
            dex_program: snapshot.network.dex_program_id,
            serum_authority: snapshot.serum_authority,
            open_orders,
            market: market.address,
            bids: market.dex.bids,
            asks: market.dex.asks,
            event_queue: market.dex.event_queue,
        }
    }
}

impl ToAccountMetas for CancelAccounts {
    fn append_to(&self, metas: &mut Vec<AccountMeta>) {
        metas.extend([
            AccountMeta::new_readonly(self.zeta_group, false),
            AccountMeta::new_readonly(self.state, false),
            AccountMeta::new(self.margin_account, false),
            AccountMeta::new_readonly(self.dex_program, false),
            AccountMeta::new_readonly(self.serum_authority, false),
            AccountMeta::new(self.open_orders, false),
            AccountMeta::new(self.market, false),
            AccountMeta::new(self.bids, false),
            AccountMeta::new(self.asks, false),
            AccountMeta::new(self.event_queue, false),
        ]);
    }
}

/// Primary oracle, backup feed and backup program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleAccounts {
    /// Primary oracle.
    pub oracle: Pubkey,
    /// Backup feed.
    pub oracle_backup_feed: Pubkey,
    /// Backup oracle program.
    pub oracle_backup_program: Pubkey,
}

impl OracleAccounts {
    /// Oracles of a sub-exchange.
    #[must_use]
    pub const fn for_sub_exchange(snapshot: &ExchangeSnapshot, sub: &SubExchange) -> Self {
        Self {
            oracle: sub.oracle,
            oracle_backup_feed: sub.oracle_backup_feed,
            oracle_backup_program: snapshot.network.oracle_backup_program_id,
        }
    }

    /// Oracles from the pricing account's per-asset tables.
    #[must_use]
    pub const fn from_pair(snapshot: &ExchangeSnapshot, pair: (Pubkey, Pubkey)) -> Self {
        Self {
            oracle: pair.0,
            oracle_backup_feed: pair.1,
            oracle_backup_program: snapshot.network.oracle_backup_program_id,
        }
    }
}

impl ToAccountMetas for OracleAccounts {
    fn append_to(&self, metas: &mut Vec<AccountMeta>) {
        metas.extend([
            AccountMeta::new_readonly(self.oracle, false),
            AccountMeta::new_readonly(self.oracle_backup_feed, false),
            AccountMeta::new_readonly(self.oracle_backup_program, false),
        ]);
    }
}

/// Appends an optional trailing account, readonly, only when present.
pub fn append_optional(metas: &mut Vec<AccountMeta>, account: Option<Pubkey>) {
    if let Some(account) = account {
        metas.push(AccountMeta::new_readonly(account, false));
    }
}

/// Remaining accounts, all writable, in caller order.
#[must_use]
pub fn writable_remaining(accounts: &[Pubkey]) -> Vec<AccountMeta> {
    accounts
        .iter()
        .map(|account| AccountMeta::new(*account, false))
        .collect()
}
