//! Withdraw instruction builder.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use tracing::debug;

use crate::constants::TOKEN_PROGRAM_ID;
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::Asset;

use super::accounts::{OracleAccounts, ToAccountMetas};
use super::new_instruction;
use super::variant::{InstructionVariant, WithdrawVariant};

/// Builder for `withdraw` and `withdraw_v2`.
#[derive(Debug, Clone)]
pub struct WithdrawBuilder<'a> {
    snapshot: &'a ExchangeSnapshot,
    variant: Option<WithdrawVariant>,
    asset: Option<Asset>,
    amount: Option<u64>,
    margin_account: Option<Pubkey>,
    user_token_account: Option<Pubkey>,
    authority: Option<Pubkey>,
}

impl<'a> WithdrawBuilder<'a> {
    /// Creates a new builder reading from `snapshot`.
    #[must_use]
    pub fn new(snapshot: &'a ExchangeSnapshot) -> Self {
        Self {
            snapshot,
            variant: None,
            asset: None,
            amount: None,
            margin_account: None,
            user_token_account: None,
            authority: None,
        }
    }

    /// Pins the layout. Defaults to the snapshot schema.
    #[must_use]
    pub fn variant(mut self, variant: WithdrawVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Sets the asset whose oracle prices the margin check.
    #[must_use]
    pub fn asset(mut self, asset: Asset) -> Self {
        self.asset = Some(asset);
        self
    }

    /// Sets the amount in native units (6 decimals).
    #[must_use]
    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the margin account debited.
    #[must_use]
    pub fn margin_account(mut self, margin_account: Pubkey) -> Self {
        self.margin_account = Some(margin_account);
        self
    }

    /// Sets the user's USDC token account.
    #[must_use]
    pub fn user_token_account(mut self, account: Pubkey) -> Self {
        self.user_token_account = Some(account);
        self
    }

    /// Sets the signing authority.
    #[must_use]
    pub fn authority(mut self, authority: Pubkey) -> Self {
        self.authority = Some(authority);
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidInput` if a required field is not set, or
    /// the snapshot lookup errors.
    pub fn build(self) -> Result<Instruction, SdkError> {
        let asset = self.asset.ok_or_else(|| SdkError::not_set("asset"))?;
        let amount = self.amount.ok_or_else(|| SdkError::not_set("amount"))?;
        let margin_account = self
            .margin_account
            .ok_or_else(|| SdkError::not_set("margin account"))?;
        let user_token_account = self
            .user_token_account
            .ok_or_else(|| SdkError::not_set("user token account"))?;
        let authority = self.authority.ok_or_else(|| SdkError::not_set("authority"))?;

        let snapshot = self.snapshot;
        let variant = self
            .variant
            .unwrap_or_else(|| WithdrawVariant::for_schema(snapshot.schema));
        debug!(%asset, variant = variant.name(), amount, "building withdraw");

        let sub = snapshot.resolve(asset)?;
        let group_key = match variant {
            WithdrawVariant::V1 => sub.zeta_group,
            WithdrawVariant::V2 => snapshot.pricing(variant.name())?.address,
        };

        let mut accounts = vec![
            AccountMeta::new_readonly(snapshot.state, false),
            AccountMeta::new_readonly(group_key, false),
            AccountMeta::new(snapshot.combined_vault, false),
            AccountMeta::new(margin_account, false),
            AccountMeta::new(user_token_account, false),
            AccountMeta::new_readonly(authority, true),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ];
        if variant == WithdrawVariant::V1 {
            accounts.push(AccountMeta::new_readonly(sub.greeks, false));
        }
        OracleAccounts::for_sub_exchange(snapshot, sub).append_to(&mut accounts);
        accounts.push(AccountMeta::new(snapshot.combined_socialized_loss, false));

        new_instruction(snapshot.program_id(), variant.name(), accounts, &amount)
    }
}
