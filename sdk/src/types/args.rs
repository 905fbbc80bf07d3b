//! Argument groups of the administrative and maintenance instructions.
//!
//! Field order is the borsh wire order. Structs that carry public keys are
//! encoded through a private wire struct holding raw key bytes.

use borsh::BorshSerialize;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use super::asset::Asset;
use super::serde_pubkey;
use crate::constants::VOLATILITY_POINTS;

/// Exchange-wide parameters held by the state account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct StateParams {
    /// Seconds before expiry at which strikes are initialized.
    pub strike_initialization_threshold_seconds: u32,
    /// Minimum seconds between pricing updates.
    pub pricing_frequency_seconds: u32,
    /// Share of liquidation proceeds paid to the liquidator.
    pub liquidator_liquidation_percentage: u32,
    /// Share of liquidation proceeds paid to the insurance vault.
    pub insurance_vault_liquidation_percentage: u32,
    /// Dated-future trade fee.
    pub native_d1_trade_fee_percentage: u64,
    /// Dated-future underlying fee.
    pub native_d1_underlying_fee_percentage: u64,
    /// Underlying fee for whitelisted accounts.
    pub native_whitelist_underlying_fee_percentage: u64,
    /// Per-account deposit limit.
    pub native_deposit_limit: u64,
    /// Seconds before expiry at which markets stop trading.
    pub expiration_threshold_seconds: u32,
    /// Fee for moving positions into a spread account.
    pub position_movement_fee_bps: u8,
    /// Margin concession for spread positions.
    pub margin_concession_percentage: u8,
    /// Option trade fee.
    pub native_option_trade_fee_percentage: u64,
    /// Option underlying fee.
    pub native_option_underlying_fee_percentage: u64,
    /// Staleness limit of the perp delta.
    pub max_perp_delta_age_seconds: u16,
    /// Withdrawal limit per epoch.
    pub native_withdraw_limit: u64,
    /// Length of the withdrawal-limit epoch.
    pub withdraw_limit_epoch_seconds: u32,
    /// Open interest limit.
    pub native_open_interest_limit: u64,
}

/// Pricing parameters of a zeta group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePricingParametersArgs {
    /// Option trade normalizer.
    pub option_trade_normalizer: u64,
    /// Future trade normalizer.
    pub future_trade_normalizer: u64,
    /// Maximum volatility retreat per update.
    pub max_volatility_retreat: u64,
    /// Maximum interest-rate retreat per update.
    pub max_interest_retreat: u64,
    /// Maximum delta of listed strikes.
    pub max_delta: u64,
    /// Minimum delta of listed strikes.
    pub min_delta: u64,
    /// Interest-rate floor.
    pub min_interest_rate: i64,
    /// Interest-rate ceiling.
    pub max_interest_rate: i64,
    /// Volatility floor.
    pub min_volatility: u64,
    /// Volatility ceiling.
    pub max_volatility: u64,
}

/// Initial pricing state of a new zeta group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeZetaGroupPricingArgs {
    /// Initial interest rate.
    pub interest_rate: i64,
    /// Initial volatility surface.
    pub volatility: [u64; VOLATILITY_POINTS],
    /// Option trade normalizer.
    pub option_trade_normalizer: u64,
    /// Future trade normalizer.
    pub future_trade_normalizer: u64,
    /// Maximum volatility retreat per update.
    pub max_volatility_retreat: u64,
    /// Maximum interest-rate retreat per update.
    pub max_interest_retreat: u64,
    /// Minimum delta of listed strikes.
    pub min_delta: u64,
    /// Maximum delta of listed strikes.
    pub max_delta: u64,
    /// Interest-rate floor.
    pub min_interest_rate: i64,
    /// Interest-rate ceiling.
    pub max_interest_rate: i64,
    /// Volatility floor.
    pub min_volatility: u64,
    /// Volatility ceiling.
    pub max_volatility: u64,
}

/// Futures margin parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMarginParametersArgs {
    /// Initial margin.
    pub future_margin_initial: u64,
    /// Maintenance margin.
    pub future_margin_maintenance: u64,
}

/// Perpetual funding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePerpParametersArgs {
    /// Funding rate floor.
    pub min_funding_rate_percent: i64,
    /// Funding rate ceiling.
    pub max_funding_rate_percent: i64,
    /// Cash delta used to measure book impact.
    pub perp_impact_cash_delta: u64,
}

/// Expiry schedule of a zeta group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateZetaGroupExpiryArgs {
    /// Interval between expiries.
    pub expiry_interval_seconds: u32,
    /// Lead time at which a new expiry is listed.
    pub new_expiry_threshold_seconds: u32,
}

/// One leg of a margin/spread position movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionMovementArg {
    /// Market index.
    pub index: u8,
    /// Signed size to move.
    pub size: i64,
}

/// Manual override of an expiry series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideExpiryArgs {
    /// Expiry series index.
    pub expiry_index: u8,
    /// Timestamp at which the series becomes active.
    pub active_ts: u64,
    /// Expiry timestamp.
    pub expiry_ts: u64,
}

/// Forced settlement of an expiry series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpireSeriesOverrideArgs {
    /// Bump of the settlement account.
    pub settlement_nonce: u8,
    /// Settlement price in native units.
    pub settlement_price: u64,
}

/// Spot price snapshot recorded while a zeta group is halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHaltStateArgs {
    /// Spot price in native units.
    pub spot_price: u64,
    /// Timestamp of the price.
    pub timestamp: u64,
}

/// Volatility surface update for one expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVolatilityArgs {
    /// Expiry series index.
    pub expiry_index: u8,
    /// Volatility points.
    pub volatility: [u64; VOLATILITY_POINTS],
}

/// Interest-rate update for one expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInterestRateArgs {
    /// Expiry series index.
    pub expiry_index: u8,
    /// Interest rate.
    pub interest_rate: i64,
}

/// Pending referral rewards for one referral account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetReferralsRewardsArgs {
    /// Referral account being credited.
    #[serde(with = "serde_pubkey")]
    pub referrals_account_key: Pubkey,
    /// Rewards in native quote units.
    pub pending_rewards: u64,
    /// Replace instead of adding to the existing balance.
    pub overwrite: bool,
}

#[derive(BorshSerialize)]
struct SetReferralsRewardsWire {
    referrals_account_key: [u8; 32],
    pending_rewards: u64,
    overwrite: bool,
}

impl BorshSerialize for SetReferralsRewardsArgs {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        SetReferralsRewardsWire {
            referrals_account_key: self.referrals_account_key.to_bytes(),
            pending_rewards: self.pending_rewards,
            overwrite: self.overwrite,
        }
        .serialize(writer)
    }
}

/// Per-asset addresses recorded in the pricing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateZetaPricingPubkeysArgs {
    /// Asset whose entry is replaced.
    pub asset: Asset,
    /// Primary oracle.
    #[serde(with = "serde_pubkey")]
    pub oracle: Pubkey,
    /// Backup oracle feed.
    #[serde(with = "serde_pubkey")]
    pub oracle_backup_feed: Pubkey,
    /// Perpetual market.
    #[serde(with = "serde_pubkey")]
    pub market: Pubkey,
    /// Perp sync queue.
    #[serde(with = "serde_pubkey")]
    pub perp_sync_queue: Pubkey,
    /// Zeta group of the asset.
    #[serde(with = "serde_pubkey")]
    pub zeta_group_key: Pubkey,
}

#[derive(BorshSerialize)]
struct UpdateZetaPricingPubkeysWire {
    asset: Asset,
    oracle: [u8; 32],
    oracle_backup_feed: [u8; 32],
    market: [u8; 32],
    perp_sync_queue: [u8; 32],
    zeta_group_key: [u8; 32],
}

impl BorshSerialize for UpdateZetaPricingPubkeysArgs {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        UpdateZetaPricingPubkeysWire {
            asset: self.asset,
            oracle: self.oracle.to_bytes(),
            oracle_backup_feed: self.oracle_backup_feed.to_bytes(),
            market: self.market.to_bytes(),
            perp_sync_queue: self.perp_sync_queue.to_bytes(),
            zeta_group_key: self.zeta_group_key.to_bytes(),
        }
        .serialize(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_args_layout() {
        let args = UpdateMarginParametersArgs {
            future_margin_initial: 1,
            future_margin_maintenance: 2,
        };
        let bytes = borsh::to_vec(&args).expect("serialize");
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..8], &1u64.to_le_bytes());
        assert_eq!(&bytes[8..], &2u64.to_le_bytes());
    }

    #[test]
    fn test_state_params_size() {
        let bytes = borsh::to_vec(&StateParams::default()).expect("serialize");
        // 6 u32 + 8 u64 + 2 u8 + 1 u16
        assert_eq!(bytes.len(), 6 * 4 + 8 * 8 + 2 + 2);
    }

    #[test]
    fn test_referrals_rewards_wire() {
        let key = Pubkey::new_unique();
        let args = SetReferralsRewardsArgs {
            referrals_account_key: key,
            pending_rewards: 500,
            overwrite: true,
        };
        let bytes = borsh::to_vec(&args).expect("serialize");
        assert_eq!(&bytes[..32], key.as_ref());
        assert_eq!(&bytes[32..40], &500u64.to_le_bytes());
        assert_eq!(bytes[40], 1);
    }

    #[test]
    fn test_pricing_pubkeys_wire() {
        let args = UpdateZetaPricingPubkeysArgs {
            asset: Asset::Eth,
            oracle: Pubkey::new_unique(),
            oracle_backup_feed: Pubkey::new_unique(),
            market: Pubkey::new_unique(),
            perp_sync_queue: Pubkey::new_unique(),
            zeta_group_key: Pubkey::new_unique(),
        };
        let bytes = borsh::to_vec(&args).expect("serialize");
        assert_eq!(bytes.len(), 1 + 5 * 32);
        assert_eq!(bytes[0], 2);
        assert_eq!(&bytes[1..33], args.oracle.as_ref());
    }

    #[test]
    fn test_state_params_json() {
        let json = r#"{
            "strikeInitializationThresholdSeconds": 1,
            "pricingFrequencySeconds": 2,
            "liquidatorLiquidationPercentage": 3,
            "insuranceVaultLiquidationPercentage": 4,
            "nativeD1TradeFeePercentage": 5,
            "nativeD1UnderlyingFeePercentage": 6,
            "nativeWhitelistUnderlyingFeePercentage": 7,
            "nativeDepositLimit": 8,
            "expirationThresholdSeconds": 9,
            "positionMovementFeeBps": 10,
            "marginConcessionPercentage": 11,
            "nativeOptionTradeFeePercentage": 12,
            "nativeOptionUnderlyingFeePercentage": 13,
            "maxPerpDeltaAgeSeconds": 14,
            "nativeWithdrawLimit": 15,
            "withdrawLimitEpochSeconds": 16,
            "nativeOpenInterestLimit": 17
        }"#;
        let params: StateParams = serde_json::from_str(json).expect("deserialize");
        assert_eq!(params.max_perp_delta_age_seconds, 14);
        assert_eq!(params.native_open_interest_limit, 17);
    }
}
