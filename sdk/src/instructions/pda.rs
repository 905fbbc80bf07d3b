//! Program address derivation for Zeta accounts.
//!
//! Every seed scheme the program uses is one [`ProgramAddress`] variant. The
//! seeds are a domain prefix followed by addresses and fixed-width
//! little-endian integers, and must match the deployed program byte for byte.

use solana_sdk::pubkey::Pubkey;

use crate::constants::{MAX_SEEDS, MAX_SEED_LEN, MAX_VAULT_SIGNER_NONCE};
use crate::error::SdkError;

/// Seed prefix of the state account.
pub const STATE_SEED: &[u8] = b"state";
/// Seed prefix of the unified pricing account.
pub const PRICING_SEED: &[u8] = b"pricing";
/// Seed prefix of the order-book authority.
pub const SERUM_AUTHORITY_SEED: &[u8] = b"serum";
/// Seed prefix of the mint authority.
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint-auth";
/// Seed prefix of the treasury wallet.
pub const TREASURY_WALLET_SEED: &[u8] = b"zeta-treasury-wallet";
/// Seed prefix of the referrals rewards wallet.
pub const REFERRALS_REWARDS_WALLET_SEED: &[u8] = b"zeta-referrals-rewards-wallet";
/// Seed prefix of the combined vault.
pub const COMBINED_VAULT_SEED: &[u8] = b"combined-vault";
/// Seed prefix of insurance vaults, combined and per group.
pub const INSURANCE_VAULT_SEED: &[u8] = b"zeta-insurance-vault";
/// Seed prefix of the combined socialized loss account.
pub const COMBINED_SOCIALIZED_LOSS_SEED: &[u8] = b"combined-socialized-loss";
/// Seed prefix of zeta groups.
pub const ZETA_GROUP_SEED: &[u8] = b"zeta-group";
/// Seed prefix of greeks accounts.
pub const GREEKS_SEED: &[u8] = b"greeks";
/// Seed prefix of perp sync queues.
pub const PERP_SYNC_QUEUE_SEED: &[u8] = b"perp-sync-queue";
/// Seed prefix of market index accounts.
pub const MARKET_INDEXES_SEED: &[u8] = b"market-indexes";
/// Seed prefix of per-group vaults.
pub const VAULT_SEED: &[u8] = b"vault";
/// Seed prefix of per-group socialized loss accounts.
pub const SOCIALIZED_LOSS_SEED: &[u8] = b"socialized-loss";
/// Seed prefix of margin accounts.
pub const MARGIN_SEED: &[u8] = b"margin";
/// Seed prefix of spread accounts.
pub const SPREAD_SEED: &[u8] = b"spread";
/// Seed prefix of cross-margin accounts.
pub const CROSS_MARGIN_SEED: &[u8] = b"cross-margin";
/// Seed prefix of cross-margin account managers.
pub const CROSS_MARGIN_MANAGER_SEED: &[u8] = b"cross-margin-manager";
/// Seed prefix of open orders accounts.
pub const OPEN_ORDERS_SEED: &[u8] = b"open-orders";
/// Seed prefix of open orders maps.
pub const OPEN_ORDERS_MAP_SEED: &[u8] = b"open-orders-map";
/// Seed prefix of markets before they are listed.
pub const MARKET_SEED: &[u8] = b"market";
/// Seed prefix of market base mints.
pub const BASE_MINT_SEED: &[u8] = b"base-mint";
/// Seed prefix of market quote mints.
pub const QUOTE_MINT_SEED: &[u8] = b"quote-mint";
/// Seed prefix of zeta-owned market vaults.
pub const ZETA_VAULT_SEED: &[u8] = b"zeta-vault";
/// Seed prefix of order-book market vaults.
pub const SERUM_VAULT_SEED: &[u8] = b"serum-vault";
/// Seed prefix of greeks market nodes.
pub const MARKET_NODE_SEED: &[u8] = b"market-node";
/// Seed prefix of underlying accounts.
pub const UNDERLYING_SEED: &[u8] = b"underlying";
/// Seed prefix of flex underlying accounts.
pub const FLEX_UNDERLYING_SEED: &[u8] = b"flex-underlying";
/// Seed prefix of settlement accounts.
pub const SETTLEMENT_SEED: &[u8] = b"settlement";
/// Seed prefix of insurance deposit accounts.
pub const USER_INSURANCE_DEPOSIT_SEED: &[u8] = b"user-insurance-deposit";
/// Seed prefix of whitelisted deposit accounts.
pub const WHITELIST_DEPOSIT_SEED: &[u8] = b"whitelist-deposit";
/// Seed prefix of whitelisted insurance accounts.
pub const WHITELIST_INSURANCE_SEED: &[u8] = b"whitelist-insurance";
/// Seed prefix of whitelisted trading fee accounts.
pub const WHITELIST_TRADING_FEES_SEED: &[u8] = b"whitelist-trading-fees";
/// Seed prefix of referrer accounts.
pub const REFERRER_SEED: &[u8] = b"referrer";
/// Seed prefix of referral accounts.
pub const REFERRAL_SEED: &[u8] = b"referral";
/// Seed prefix of referrer aliases.
pub const REFERRER_ALIAS_SEED: &[u8] = b"referrer-alias";

/// A program-derived account and the inputs of its seed scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramAddress<'a> {
    /// Exchange state.
    State,
    /// Unified pricing account.
    Pricing,
    /// Order-book authority.
    SerumAuthority,
    /// Mint authority.
    MintAuthority,
    /// Treasury wallet.
    TreasuryWallet,
    /// Referrals rewards wallet.
    ReferralsRewardsWallet,
    /// Combined collateral vault.
    CombinedVault,
    /// Combined insurance vault.
    CombinedInsuranceVault,
    /// Combined socialized loss account.
    CombinedSocializedLoss,
    /// Zeta group of an underlying mint.
    ZetaGroup {
        /// Underlying mint.
        underlying_mint: Pubkey,
    },
    /// Greeks of a zeta group.
    Greeks {
        /// Zeta group.
        zeta_group: Pubkey,
    },
    /// Perp sync queue of a zeta group.
    PerpSyncQueue {
        /// Zeta group.
        zeta_group: Pubkey,
    },
    /// Market indexes of a zeta group.
    MarketIndexes {
        /// Zeta group.
        zeta_group: Pubkey,
    },
    /// Collateral vault of a zeta group.
    Vault {
        /// Zeta group.
        zeta_group: Pubkey,
    },
    /// Insurance vault of a zeta group.
    InsuranceVault {
        /// Zeta group.
        zeta_group: Pubkey,
    },
    /// Socialized loss account of a zeta group.
    SocializedLoss {
        /// Zeta group.
        zeta_group: Pubkey,
    },
    /// Margin account of an owner.
    MarginAccount {
        /// Zeta group.
        zeta_group: Pubkey,
        /// Account owner.
        owner: Pubkey,
    },
    /// Spread account of an owner.
    SpreadAccount {
        /// Zeta group.
        zeta_group: Pubkey,
        /// Account owner.
        owner: Pubkey,
    },
    /// Cross-margin sub-account of an owner.
    CrossMarginAccount {
        /// Account owner.
        owner: Pubkey,
        /// Sub-account index.
        subaccount: u8,
    },
    /// Cross-margin account manager of an owner.
    CrossMarginAccountManager {
        /// Account owner.
        owner: Pubkey,
    },
    /// Open orders account of an owner on a market.
    OpenOrders {
        /// Order-book program.
        dex_program: Pubkey,
        /// Market.
        market: Pubkey,
        /// Owner (margin account).
        owner: Pubkey,
    },
    /// Map from an open orders account back to its owner.
    OpenOrdersMap {
        /// Open orders account.
        open_orders: Pubkey,
    },
    /// Market address reserved before listing.
    UninitializedMarket {
        /// Zeta group.
        zeta_group: Pubkey,
        /// Seed index of the market.
        seed_index: u8,
    },
    /// Base mint of a market.
    BaseMint {
        /// Market.
        market: Pubkey,
    },
    /// Quote mint of a market.
    QuoteMint {
        /// Market.
        market: Pubkey,
    },
    /// Zeta-owned vault of a market mint.
    ZetaVault {
        /// Mint.
        mint: Pubkey,
    },
    /// Order-book vault of a market mint.
    SerumVault {
        /// Mint.
        mint: Pubkey,
    },
    /// Greeks market node.
    MarketNode {
        /// Zeta group.
        zeta_group: Pubkey,
        /// Market index.
        index: u8,
    },
    /// Underlying account.
    Underlying {
        /// Underlying index.
        index: u8,
    },
    /// Flex underlying account.
    FlexUnderlying {
        /// Flex underlying index.
        index: u8,
    },
    /// Settlement account of an expiry.
    Settlement {
        /// Underlying mint.
        underlying_mint: Pubkey,
        /// Expiration timestamp.
        expiration_ts: u64,
    },
    /// Insurance deposit account of a user.
    UserInsuranceDeposit {
        /// User.
        user: Pubkey,
    },
    /// Whitelisted deposit account.
    WhitelistDeposit {
        /// User.
        user: Pubkey,
    },
    /// Whitelisted insurance account.
    WhitelistInsurance {
        /// User.
        user: Pubkey,
    },
    /// Whitelisted trading fee account.
    WhitelistTradingFees {
        /// User.
        user: Pubkey,
    },
    /// Referrer account.
    Referrer {
        /// Referrer.
        referrer: Pubkey,
    },
    /// Referral account of a referred user.
    Referral {
        /// Referred user.
        user: Pubkey,
    },
    /// Referrer alias.
    ReferrerAlias {
        /// Alias string.
        alias: &'a str,
    },
}

impl ProgramAddress<'_> {
    /// Returns the ordered seeds of this address.
    #[must_use]
    pub fn seeds(&self) -> Vec<Vec<u8>> {
        fn with(prefix: &[u8], rest: &[&[u8]]) -> Vec<Vec<u8>> {
            std::iter::once(prefix.to_vec())
                .chain(rest.iter().map(|seed| seed.to_vec()))
                .collect()
        }

        match self {
            Self::State => with(STATE_SEED, &[]),
            Self::Pricing => with(PRICING_SEED, &[]),
            Self::SerumAuthority => with(SERUM_AUTHORITY_SEED, &[]),
            Self::MintAuthority => with(MINT_AUTHORITY_SEED, &[]),
            Self::TreasuryWallet => with(TREASURY_WALLET_SEED, &[]),
            Self::ReferralsRewardsWallet => with(REFERRALS_REWARDS_WALLET_SEED, &[]),
            Self::CombinedVault => with(COMBINED_VAULT_SEED, &[]),
            Self::CombinedInsuranceVault => with(INSURANCE_VAULT_SEED, &[]),
            Self::CombinedSocializedLoss => with(COMBINED_SOCIALIZED_LOSS_SEED, &[]),
            Self::ZetaGroup { underlying_mint } => {
                with(ZETA_GROUP_SEED, &[underlying_mint.as_ref()])
            }
            Self::Greeks { zeta_group } => with(GREEKS_SEED, &[zeta_group.as_ref()]),
            Self::PerpSyncQueue { zeta_group } => {
                with(PERP_SYNC_QUEUE_SEED, &[zeta_group.as_ref()])
            }
            Self::MarketIndexes { zeta_group } => {
                with(MARKET_INDEXES_SEED, &[zeta_group.as_ref()])
            }
            Self::Vault { zeta_group } => with(VAULT_SEED, &[zeta_group.as_ref()]),
            Self::InsuranceVault { zeta_group } => {
                with(INSURANCE_VAULT_SEED, &[zeta_group.as_ref()])
            }
            Self::SocializedLoss { zeta_group } => {
                with(SOCIALIZED_LOSS_SEED, &[zeta_group.as_ref()])
            }
            Self::MarginAccount { zeta_group, owner } => {
                with(MARGIN_SEED, &[zeta_group.as_ref(), owner.as_ref()])
            }
            Self::SpreadAccount { zeta_group, owner } => {
                with(SPREAD_SEED, &[zeta_group.as_ref(), owner.as_ref()])
            }
            Self::CrossMarginAccount { owner, subaccount } => {
                with(CROSS_MARGIN_SEED, &[owner.as_ref(), &[*subaccount]])
            }
            Self::CrossMarginAccountManager { owner } => {
                with(CROSS_MARGIN_MANAGER_SEED, &[owner.as_ref()])
            }
            Self::OpenOrders {
                dex_program,
                market,
                owner,
            } => with(
                OPEN_ORDERS_SEED,
                &[dex_program.as_ref(), market.as_ref(), owner.as_ref()],
            ),
            Self::OpenOrdersMap { open_orders } => {
                with(OPEN_ORDERS_MAP_SEED, &[open_orders.as_ref()])
            }
            Self::UninitializedMarket {
                zeta_group,
                seed_index,
            } => with(MARKET_SEED, &[zeta_group.as_ref(), &[*seed_index]]),
            Self::BaseMint { market } => with(BASE_MINT_SEED, &[market.as_ref()]),
            Self::QuoteMint { market } => with(QUOTE_MINT_SEED, &[market.as_ref()]),
            Self::ZetaVault { mint } => with(ZETA_VAULT_SEED, &[mint.as_ref()]),
            Self::SerumVault { mint } => with(SERUM_VAULT_SEED, &[mint.as_ref()]),
            Self::MarketNode { zeta_group, index } => {
                with(MARKET_NODE_SEED, &[zeta_group.as_ref(), &[*index]])
            }
            Self::Underlying { index } => with(UNDERLYING_SEED, &[&[*index]]),
            Self::FlexUnderlying { index } => with(FLEX_UNDERLYING_SEED, &[&[*index]]),
            Self::Settlement {
                underlying_mint,
                expiration_ts,
            } => with(
                SETTLEMENT_SEED,
                &[underlying_mint.as_ref(), &expiration_ts.to_le_bytes()],
            ),
            Self::UserInsuranceDeposit { user } => {
                with(USER_INSURANCE_DEPOSIT_SEED, &[user.as_ref()])
            }
            Self::WhitelistDeposit { user } => with(WHITELIST_DEPOSIT_SEED, &[user.as_ref()]),
            Self::WhitelistInsurance { user } => {
                with(WHITELIST_INSURANCE_SEED, &[user.as_ref()])
            }
            Self::WhitelistTradingFees { user } => {
                with(WHITELIST_TRADING_FEES_SEED, &[user.as_ref()])
            }
            Self::Referrer { referrer } => with(REFERRER_SEED, &[referrer.as_ref()]),
            Self::Referral { user } => with(REFERRAL_SEED, &[user.as_ref()]),
            Self::ReferrerAlias { alias } => with(REFERRER_ALIAS_SEED, &[alias.as_bytes()]),
        }
    }

    /// Derives the address and bump nonce under a program.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidSeed` if the seeds exceed protocol limits.
    pub fn derive(&self, program_id: &Pubkey) -> Result<(Pubkey, u8), SdkError> {
        let seeds = self.seeds();
        let refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
        derive_program_address(&refs, program_id)
    }

    /// Derives the address alone.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidSeed` if the seeds exceed protocol limits.
    pub fn address(&self, program_id: &Pubkey) -> Result<Pubkey, SdkError> {
        self.derive(program_id).map(|(address, _)| address)
    }
}

/// Finds a program address after checking seed count and seed lengths.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if there are more than `MAX_SEEDS - 1`
/// seeds (one slot is kept for the bump), a seed is longer than
/// `MAX_SEED_LEN`, or no bump yields an off-curve address.
pub fn derive_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), SdkError> {
    if seeds.len() >= MAX_SEEDS {
        return Err(SdkError::InvalidSeed(format!(
            "{} seeds exceed the maximum of {}",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    if let Some(seed) = seeds.iter().find(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(SdkError::InvalidSeed(format!(
            "seed of {} bytes exceeds {MAX_SEED_LEN}",
            seed.len()
        )));
    }
    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or_else(|| SdkError::InvalidSeed("no viable bump seed".to_string()))
}

/// Derives the dex vault signer of a market.
///
/// Seeds: `[market, nonce as u64 LE]` under the dex program, with the first
/// nonce that yields a valid program address.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if no nonce below the search bound works.
pub fn derive_vault_signer(
    market: &Pubkey,
    dex_program_id: &Pubkey,
) -> Result<(Pubkey, u64), SdkError> {
    (0..MAX_VAULT_SIGNER_NONCE)
        .find_map(|nonce| {
            Pubkey::create_program_address(&[market.as_ref(), &nonce.to_le_bytes()], dex_program_id)
                .ok()
                .map(|signer| (signer, nonce))
        })
        .ok_or_else(|| SdkError::InvalidSeed(format!("no vault signer nonce for {market}")))
}
