//! Administrative instructions.
//!
//! Exchange bootstrap (state, pricing, zeta groups, combined vaults),
//! parameter updates, halting, admin rotation and whitelisting. Builders
//! whose signer is the recorded exchange admin read it from the snapshot;
//! the rest take the signing admin explicitly.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use tracing::debug;

use crate::constants::{RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID, VOLATILITY_POINTS};
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::{
    Asset, ExpireSeriesOverrideArgs, InitializeZetaGroupPricingArgs, OverrideExpiryArgs,
    StateParams, UpdateHaltStateArgs, UpdateInterestRateArgs, UpdateMarginParametersArgs,
    UpdatePerpParametersArgs, UpdatePricingParametersArgs, UpdateVolatilityArgs,
    UpdateZetaGroupExpiryArgs, UpdateZetaPricingPubkeysArgs,
};

use super::new_instruction;
use super::pda::ProgramAddress;

fn initialize_combined_account(
    snapshot: &ExchangeSnapshot,
    name: &str,
    address: ProgramAddress<'_>,
) -> Result<(Instruction, Pubkey), SdkError> {
    let (account, nonce) = address.derive(&snapshot.program_id())?;
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(account, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(snapshot.usdc_mint, false),
        AccountMeta::new(snapshot.admin, true),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
    ];
    let ix = new_instruction(snapshot.program_id(), name, accounts, &nonce)?;
    Ok((ix, account))
}

/// `initialize_combined_vault`. Returns the instruction and the vault.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if derivation fails.
pub fn initialize_combined_vault(
    snapshot: &ExchangeSnapshot,
) -> Result<(Instruction, Pubkey), SdkError> {
    initialize_combined_account(
        snapshot,
        "initialize_combined_vault",
        ProgramAddress::CombinedVault,
    )
}

/// `initialize_combined_insurance_vault`. Returns the instruction and the vault.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if derivation fails.
pub fn initialize_combined_insurance_vault(
    snapshot: &ExchangeSnapshot,
) -> Result<(Instruction, Pubkey), SdkError> {
    initialize_combined_account(
        snapshot,
        "initialize_combined_insurance_vault",
        ProgramAddress::CombinedInsuranceVault,
    )
}

/// `initialize_combined_socialized_loss_account`. Returns the instruction and
/// the account.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if derivation fails.
pub fn initialize_combined_socialized_loss_account(
    snapshot: &ExchangeSnapshot,
) -> Result<(Instruction, Pubkey), SdkError> {
    initialize_combined_account(
        snapshot,
        "initialize_combined_socialized_loss_account",
        ProgramAddress::CombinedSocializedLoss,
    )
}

#[derive(BorshSerialize)]
struct InitializeStateWire<'a> {
    params: &'a StateParams,
    state_nonce: u8,
    serum_nonce: u8,
    mint_auth_nonce: u8,
}

/// Signers and delegates named by a new exchange state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateAuthorities {
    /// Signing admin, also the payer.
    pub admin: Pubkey,
    /// Secondary admin.
    pub secondary_admin: Pubkey,
    /// Admin of the referrals program.
    pub referrals_admin: Pubkey,
}

/// `initialize_zeta_state`. Derives the state, serum authority, mint
/// authority and both wallets from the program id; returns the instruction
/// and the state address.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if derivation fails.
pub fn initialize_zeta_state(
    snapshot: &ExchangeSnapshot,
    authorities: &StateAuthorities,
    params: &StateParams,
) -> Result<(Instruction, Pubkey), SdkError> {
    let program_id = snapshot.program_id();
    let (state, state_nonce) = ProgramAddress::State.derive(&program_id)?;
    let (serum_authority, serum_nonce) = ProgramAddress::SerumAuthority.derive(&program_id)?;
    let (mint_authority, mint_auth_nonce) = ProgramAddress::MintAuthority.derive(&program_id)?;
    let treasury_wallet = ProgramAddress::TreasuryWallet.address(&program_id)?;
    let referrals_rewards_wallet = ProgramAddress::ReferralsRewardsWallet.address(&program_id)?;

    let accounts = vec![
        AccountMeta::new(state, false),
        AccountMeta::new_readonly(serum_authority, false),
        AccountMeta::new_readonly(mint_authority, false),
        AccountMeta::new(treasury_wallet, false),
        AccountMeta::new_readonly(authorities.referrals_admin, false),
        AccountMeta::new(referrals_rewards_wallet, false),
        AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(snapshot.usdc_mint, false),
        AccountMeta::new(authorities.admin, true),
        AccountMeta::new_readonly(authorities.secondary_admin, false),
    ];
    let ix = new_instruction(
        program_id,
        "initialize_zeta_state",
        accounts,
        &InitializeStateWire {
            params,
            state_nonce,
            serum_nonce,
            mint_auth_nonce,
        },
    )?;
    Ok((ix, state))
}

fn initialize_wallet(
    snapshot: &ExchangeSnapshot,
    name: &str,
    wallet: Pubkey,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(wallet, false),
        AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(snapshot.usdc_mint, false),
        AccountMeta::new(admin, true),
    ];
    new_instruction(snapshot.program_id(), name, accounts, &())
}

/// `initialize_zeta_treasury_wallet`.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn initialize_zeta_treasury_wallet(
    snapshot: &ExchangeSnapshot,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    initialize_wallet(
        snapshot,
        "initialize_zeta_treasury_wallet",
        snapshot.treasury_wallet,
        admin,
    )
}

/// `initialize_zeta_referrals_rewards_wallet`.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn initialize_zeta_referrals_rewards_wallet(
    snapshot: &ExchangeSnapshot,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    initialize_wallet(
        snapshot,
        "initialize_zeta_referrals_rewards_wallet",
        snapshot.referrals_rewards_wallet,
        admin,
    )
}

/// `update_zeta_state`.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn update_zeta_state(
    snapshot: &ExchangeSnapshot,
    params: &StateParams,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new(snapshot.state, false),
        AccountMeta::new_readonly(admin, true),
    ];
    new_instruction(snapshot.program_id(), "update_zeta_state", accounts, params)
}

#[derive(BorshSerialize)]
struct InitializePricingWire {
    min_funding_rate_percent: i64,
    max_funding_rate_percent: i64,
    perp_impact_cash_delta: u64,
    margin_initial: u64,
    margin_maintenance: u64,
}

/// `initialize_zeta_pricing`. Returns the instruction and the pricing account.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if derivation fails.
pub fn initialize_zeta_pricing(
    snapshot: &ExchangeSnapshot,
    perp: &UpdatePerpParametersArgs,
    margin: &UpdateMarginParametersArgs,
) -> Result<(Instruction, Pubkey), SdkError> {
    let pricing = ProgramAddress::Pricing.address(&snapshot.program_id())?;
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(pricing, false),
        AccountMeta::new(snapshot.admin, true),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
    ];
    let args = InitializePricingWire {
        min_funding_rate_percent: perp.min_funding_rate_percent,
        max_funding_rate_percent: perp.max_funding_rate_percent,
        perp_impact_cash_delta: perp.perp_impact_cash_delta,
        margin_initial: margin.future_margin_initial,
        margin_maintenance: margin.future_margin_maintenance,
    };
    let ix = new_instruction(
        snapshot.program_id(),
        "initialize_zeta_pricing",
        accounts,
        &args,
    )?;
    Ok((ix, pricing))
}

/// `update_zeta_pricing_pubkeys`.
///
/// # Errors
///
/// Returns `SdkError::SchemaVersionMismatch` against a pre-pricing snapshot.
pub fn update_zeta_pricing_pubkeys(
    snapshot: &ExchangeSnapshot,
    args: &UpdateZetaPricingPubkeysArgs,
) -> Result<Instruction, SdkError> {
    let pricing = snapshot.pricing("update_zeta_pricing_pubkeys")?;
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(pricing.address, false),
        AccountMeta::new_readonly(snapshot.admin, true),
    ];
    new_instruction(
        snapshot.program_id(),
        "update_zeta_pricing_pubkeys",
        accounts,
        args,
    )
}

/// Everything needed to list a new underlying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZetaGroupInit {
    /// Asset the group trades.
    pub asset: Asset,
    /// Mint of the underlying.
    pub underlying_mint: Pubkey,
    /// Primary oracle.
    pub oracle: Pubkey,
    /// Backup oracle feed.
    pub oracle_backup_feed: Pubkey,
    /// Initial pricing state.
    pub pricing: InitializeZetaGroupPricingArgs,
    /// Perp funding parameters.
    pub perp: UpdatePerpParametersArgs,
    /// Futures margin parameters.
    pub margin: UpdateMarginParametersArgs,
    /// Expiry schedule.
    pub expiry: UpdateZetaGroupExpiryArgs,
    /// List only the perpetual.
    pub perps_only: bool,
    /// Register under the flex underlying counter.
    pub flex_underlying: bool,
}

#[derive(BorshSerialize)]
struct InitializeZetaGroupWire {
    perps_only: bool,
    flex_underlying: bool,
    asset_override: Asset,
    zeta_group_nonce: u8,
    underlying_nonce: u8,
    greeks_nonce: u8,
    vault_nonce: u8,
    insurance_vault_nonce: u8,
    socialized_loss_account_nonce: u8,
    perp_sync_queue_nonce: u8,
    interest_rate: i64,
    volatility: [u64; VOLATILITY_POINTS],
    option_trade_normalizer: u64,
    future_trade_normalizer: u64,
    max_volatility_retreat: u64,
    max_interest_retreat: u64,
    max_delta: u64,
    min_delta: u64,
    min_interest_rate: i64,
    max_interest_rate: i64,
    min_volatility: u64,
    max_volatility: u64,
    future_margin_initial: u64,
    future_margin_maintenance: u64,
    expiry_interval_seconds: u32,
    new_expiry_threshold_seconds: u32,
    min_funding_rate_percent: i64,
    max_funding_rate_percent: i64,
    perp_impact_cash_delta: u64,
}

/// `initialize_zeta_group`. The underlying account is derived from the next
/// free underlying (or flex underlying) index recorded in the snapshot.
/// Returns the instruction and the zeta group.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if derivation fails.
pub fn initialize_zeta_group(
    snapshot: &ExchangeSnapshot,
    init: &ZetaGroupInit,
) -> Result<(Instruction, Pubkey), SdkError> {
    let program_id = snapshot.program_id();
    let (zeta_group, zeta_group_nonce) = ProgramAddress::ZetaGroup {
        underlying_mint: init.underlying_mint,
    }
    .derive(&program_id)?;
    let underlying_address = if init.flex_underlying {
        ProgramAddress::FlexUnderlying {
            index: snapshot.num_flex_underlyings,
        }
    } else {
        ProgramAddress::Underlying {
            index: snapshot.num_underlyings,
        }
    };
    let (underlying, underlying_nonce) = underlying_address.derive(&program_id)?;
    let (greeks, greeks_nonce) = ProgramAddress::Greeks { zeta_group }.derive(&program_id)?;
    let (perp_sync_queue, perp_sync_queue_nonce) =
        ProgramAddress::PerpSyncQueue { zeta_group }.derive(&program_id)?;
    let (vault, vault_nonce) = ProgramAddress::Vault { zeta_group }.derive(&program_id)?;
    let (insurance_vault, insurance_vault_nonce) =
        ProgramAddress::InsuranceVault { zeta_group }.derive(&program_id)?;
    let (socialized_loss, socialized_loss_account_nonce) =
        ProgramAddress::SocializedLoss { zeta_group }.derive(&program_id)?;
    debug!(asset = %init.asset, %zeta_group, %underlying, "initializing zeta group");

    let pricing = &init.pricing;
    let args = InitializeZetaGroupWire {
        perps_only: init.perps_only,
        flex_underlying: init.flex_underlying,
        asset_override: init.asset,
        zeta_group_nonce,
        underlying_nonce,
        greeks_nonce,
        vault_nonce,
        insurance_vault_nonce,
        socialized_loss_account_nonce,
        perp_sync_queue_nonce,
        interest_rate: pricing.interest_rate,
        volatility: pricing.volatility,
        option_trade_normalizer: pricing.option_trade_normalizer,
        future_trade_normalizer: pricing.future_trade_normalizer,
        max_volatility_retreat: pricing.max_volatility_retreat,
        max_interest_retreat: pricing.max_interest_retreat,
        max_delta: pricing.max_delta,
        min_delta: pricing.min_delta,
        min_interest_rate: pricing.min_interest_rate,
        max_interest_rate: pricing.max_interest_rate,
        min_volatility: pricing.min_volatility,
        max_volatility: pricing.max_volatility,
        future_margin_initial: init.margin.future_margin_initial,
        future_margin_maintenance: init.margin.future_margin_maintenance,
        expiry_interval_seconds: init.expiry.expiry_interval_seconds,
        new_expiry_threshold_seconds: init.expiry.new_expiry_threshold_seconds,
        min_funding_rate_percent: init.perp.min_funding_rate_percent,
        max_funding_rate_percent: init.perp.max_funding_rate_percent,
        perp_impact_cash_delta: init.perp.perp_impact_cash_delta,
    };
    let accounts = vec![
        AccountMeta::new(snapshot.state, false),
        AccountMeta::new(snapshot.admin, true),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(init.underlying_mint, false),
        AccountMeta::new_readonly(program_id, false),
        AccountMeta::new_readonly(init.oracle, false),
        AccountMeta::new_readonly(init.oracle_backup_feed, false),
        AccountMeta::new_readonly(snapshot.oracle_backup_program_id(), false),
        AccountMeta::new(zeta_group, false),
        AccountMeta::new(greeks, false),
        AccountMeta::new(perp_sync_queue, false),
        AccountMeta::new(underlying, false),
        AccountMeta::new(vault, false),
        AccountMeta::new(insurance_vault, false),
        AccountMeta::new(socialized_loss, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(snapshot.usdc_mint, false),
        AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
    ];
    let ix = new_instruction(program_id, "initialize_zeta_group", accounts, &args)?;
    Ok((ix, zeta_group))
}

/// `initialize_perp_sync_queue` for an existing zeta group.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset` or `SdkError::InvalidSeed`.
pub fn initialize_perp_sync_queue(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
) -> Result<Instruction, SdkError> {
    let program_id = snapshot.program_id();
    let zeta_group = snapshot.resolve(asset)?.zeta_group;
    let (perp_sync_queue, nonce) =
        ProgramAddress::PerpSyncQueue { zeta_group }.derive(&program_id)?;
    let accounts = vec![
        AccountMeta::new(snapshot.admin, true),
        AccountMeta::new_readonly(program_id, false),
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(perp_sync_queue, false),
        AccountMeta::new(zeta_group, false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
    ];
    new_instruction(program_id, "initialize_perp_sync_queue", accounts, &nonce)
}

/// Replacement oracles for [`modify_asset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetOracles {
    /// New primary oracle.
    pub oracle: Pubkey,
    /// New backup oracle feed.
    pub backup_oracle: Pubkey,
}

/// `modify_asset`: repoints a zeta group at a new asset and its oracles.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn modify_asset(
    snapshot: &ExchangeSnapshot,
    zeta_group: Pubkey,
    new_asset: Asset,
    oracles: AssetOracles,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(zeta_group, false),
        AccountMeta::new_readonly(admin, true),
        AccountMeta::new_readonly(oracles.oracle, false),
        AccountMeta::new_readonly(oracles.backup_oracle, false),
        AccountMeta::new_readonly(snapshot.oracle_backup_program_id(), false),
    ];
    new_instruction(snapshot.program_id(), "modify_asset", accounts, &new_asset)
}

/// State, a writable group-level account and the signing admin.
fn admin_update<T: BorshSerialize>(
    snapshot: &ExchangeSnapshot,
    name: &str,
    target: Pubkey,
    admin: Pubkey,
    args: &T,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(target, false),
        AccountMeta::new_readonly(admin, true),
    ];
    new_instruction(snapshot.program_id(), name, accounts, args)
}

/// `update_pricing_parameters` on a zeta group.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn update_pricing_parameters(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    args: &UpdatePricingParametersArgs,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    admin_update(
        snapshot,
        "update_pricing_parameters",
        snapshot.resolve(asset)?.zeta_group,
        admin,
        args,
    )
}

/// `update_margin_parameters` on the pricing account.
///
/// # Errors
///
/// Returns `SdkError::SchemaVersionMismatch` against a pre-pricing snapshot.
pub fn update_margin_parameters(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    args: &UpdateMarginParametersArgs,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let name = "update_margin_parameters";
    admin_update(snapshot, name, snapshot.pricing(name)?.address, admin, &(args, asset))
}

/// `update_perp_parameters` on the pricing account.
///
/// # Errors
///
/// Returns `SdkError::SchemaVersionMismatch` against a pre-pricing snapshot.
pub fn update_perp_parameters(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    args: &UpdatePerpParametersArgs,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let name = "update_perp_parameters";
    admin_update(snapshot, name, snapshot.pricing(name)?.address, admin, &(args, asset))
}

/// `update_zeta_group_margin_parameters` on a zeta group.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn update_zeta_group_margin_parameters(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    args: &UpdateMarginParametersArgs,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    admin_update(
        snapshot,
        "update_zeta_group_margin_parameters",
        snapshot.resolve(asset)?.zeta_group,
        admin,
        &(args, asset),
    )
}

/// `update_zeta_group_perp_parameters` on a zeta group.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn update_zeta_group_perp_parameters(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    args: &UpdatePerpParametersArgs,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    admin_update(
        snapshot,
        "update_zeta_group_perp_parameters",
        snapshot.resolve(asset)?.zeta_group,
        admin,
        &(args, asset),
    )
}

/// `update_zeta_group_expiry_parameters`.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn update_zeta_group_expiry_parameters(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    args: &UpdateZetaGroupExpiryArgs,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    admin_update(
        snapshot,
        "update_zeta_group_expiry_parameters",
        snapshot.resolve(asset)?.zeta_group,
        admin,
        args,
    )
}

/// `toggle_zeta_group_perps_only`.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn toggle_zeta_group_perps_only(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    admin_update(
        snapshot,
        "toggle_zeta_group_perps_only",
        snapshot.resolve(asset)?.zeta_group,
        admin,
        &(),
    )
}

/// `update_halt_state` on a halted zeta group.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn update_halt_state(
    snapshot: &ExchangeSnapshot,
    zeta_group: Pubkey,
    args: &UpdateHaltStateArgs,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    admin_update(snapshot, "update_halt_state", zeta_group, admin, args)
}

/// `update_volatility_nodes`.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn update_volatility_nodes(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    nodes: &[u64; VOLATILITY_POINTS],
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(sub.zeta_group, false),
        AccountMeta::new(sub.greeks, false),
        AccountMeta::new_readonly(admin, true),
    ];
    new_instruction(snapshot.program_id(), "update_volatility_nodes", accounts, nodes)
}

/// State, greeks, group and signing admin; greeks before group.
fn greeks_update<T: BorshSerialize>(
    snapshot: &ExchangeSnapshot,
    name: &str,
    asset: Asset,
    admin: Pubkey,
    args: &T,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(sub.greeks, false),
        AccountMeta::new_readonly(sub.zeta_group, false),
        AccountMeta::new_readonly(admin, true),
    ];
    new_instruction(snapshot.program_id(), name, accounts, args)
}

/// `update_volatility` for one expiry.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn update_volatility(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    args: &UpdateVolatilityArgs,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    greeks_update(snapshot, "update_volatility", asset, admin, args)
}

/// `update_interest_rate` for one expiry.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn update_interest_rate(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    args: &UpdateInterestRateArgs,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    greeks_update(snapshot, "update_interest_rate", asset, admin, args)
}

/// `halt_zeta_group`.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn halt_zeta_group(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    debug!(%asset, zeta_group = %sub.zeta_group, "halting zeta group");
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(sub.zeta_group, false),
        AccountMeta::new(sub.greeks, false),
        AccountMeta::new_readonly(admin, true),
    ];
    new_instruction(snapshot.program_id(), "halt_zeta_group", accounts, &())
}

/// `unhalt_zeta_group`.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn unhalt_zeta_group(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    debug!(%asset, zeta_group = %sub.zeta_group, "unhalting zeta group");
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(sub.zeta_group, false),
        AccountMeta::new_readonly(admin, true),
        AccountMeta::new(sub.greeks, false),
    ];
    new_instruction(snapshot.program_id(), "unhalt_zeta_group", accounts, &())
}

/// Admin key being rotated by [`update_admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRole {
    /// Primary exchange admin.
    Primary,
    /// Secondary exchange admin.
    Secondary,
    /// Referrals admin.
    Referrals,
}

impl AdminRole {
    const fn instruction_name(self) -> &'static str {
        match self {
            Self::Primary => "update_admin",
            Self::Secondary => "update_secondary_admin",
            Self::Referrals => "update_referrals_admin",
        }
    }
}

/// `update_admin` / `update_secondary_admin` / `update_referrals_admin`.
/// Both the current and the incoming admin sign.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn update_admin(
    snapshot: &ExchangeSnapshot,
    role: AdminRole,
    admin: Pubkey,
    new_admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new(snapshot.state, false),
        AccountMeta::new_readonly(admin, true),
        AccountMeta::new_readonly(new_admin, true),
    ];
    new_instruction(snapshot.program_id(), role.instruction_name(), accounts, &())
}

/// `expire_series_override`: force-settles an expiry at a given price.
///
/// # Errors
///
/// Returns `SdkError::UnknownAsset`.
pub fn expire_series_override(
    snapshot: &ExchangeSnapshot,
    asset: Asset,
    settlement_account: Pubkey,
    args: &ExpireSeriesOverrideArgs,
    admin: Pubkey,
) -> Result<Instruction, SdkError> {
    let sub = snapshot.resolve(asset)?;
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new(sub.zeta_group, false),
        AccountMeta::new(settlement_account, false),
        AccountMeta::new(admin, true),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new(sub.greeks, false),
    ];
    new_instruction(
        snapshot.program_id(),
        "expire_series_override",
        accounts,
        args,
    )
}

/// `override_expiry` on a zeta group, signed by the exchange admin.
///
/// # Errors
///
/// Returns `SdkError::Serialization` only if encoding fails.
pub fn override_expiry(
    snapshot: &ExchangeSnapshot,
    zeta_group: Pubkey,
    args: &OverrideExpiryArgs,
) -> Result<Instruction, SdkError> {
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(snapshot.admin, true),
        AccountMeta::new(zeta_group, false),
    ];
    new_instruction(snapshot.program_id(), "override_expiry", accounts, args)
}

/// `toggle_market_maker` on `user`'s margin account in `zeta_group`.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if derivation fails.
pub fn toggle_market_maker(
    snapshot: &ExchangeSnapshot,
    is_market_maker: bool,
    zeta_group: Pubkey,
    user: Pubkey,
) -> Result<Instruction, SdkError> {
    let margin_account = ProgramAddress::MarginAccount {
        zeta_group,
        owner: user,
    }
    .address(&snapshot.program_id())?;
    let accounts = vec![
        AccountMeta::new_readonly(snapshot.state, false),
        AccountMeta::new_readonly(snapshot.admin, true),
        AccountMeta::new(margin_account, false),
    ];
    new_instruction(
        snapshot.program_id(),
        "toggle_market_maker",
        accounts,
        &is_market_maker,
    )
}

/// Per-user whitelists granted by the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whitelist {
    /// Deposit limit exemption.
    Deposit,
    /// Insurance vault access.
    Insurance,
    /// Trading fee discount.
    TradingFees,
}

impl Whitelist {
    const fn instruction_name(self) -> &'static str {
        match self {
            Self::Deposit => "initialize_whitelist_deposit_account",
            Self::Insurance => "initialize_whitelist_insurance_account",
            Self::TradingFees => "initialize_whitelist_trading_fees_account",
        }
    }

    /// Address scheme of the whitelist account for `user`.
    #[must_use]
    pub const fn address(self, user: Pubkey) -> ProgramAddress<'static> {
        match self {
            Self::Deposit => ProgramAddress::WhitelistDeposit { user },
            Self::Insurance => ProgramAddress::WhitelistInsurance { user },
            Self::TradingFees => ProgramAddress::WhitelistTradingFees { user },
        }
    }
}

/// `initialize_whitelist_*_account` for `user`. Returns the instruction and
/// the whitelist account.
///
/// # Errors
///
/// Returns `SdkError::InvalidSeed` if derivation fails.
pub fn initialize_whitelist_account(
    snapshot: &ExchangeSnapshot,
    whitelist: Whitelist,
    user: Pubkey,
    admin: Pubkey,
) -> Result<(Instruction, Pubkey), SdkError> {
    let (account, nonce) = whitelist.address(user).derive(&snapshot.program_id())?;
    let accounts = vec![
        AccountMeta::new(account, false),
        AccountMeta::new(admin, true),
        AccountMeta::new_readonly(user, false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(snapshot.state, false),
    ];
    let ix = new_instruction(
        snapshot.program_id(),
        whitelist.instruction_name(),
        accounts,
        &nonce,
    )?;
    Ok((ix, account))
}
