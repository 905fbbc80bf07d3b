//! Deposit instruction builder.
//!
//! Moves collateral from the user's token account into the combined vault,
//! credited to a margin account.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use tracing::debug;

use crate::constants::TOKEN_PROGRAM_ID;
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::Asset;

use super::accounts::append_optional;
use super::new_instruction;
use super::variant::{DepositVariant, InstructionVariant};

/// Builder for `deposit` and `deposit_v2`.
#[derive(Debug, Clone)]
pub struct DepositBuilder<'a> {
    snapshot: &'a ExchangeSnapshot,
    variant: Option<DepositVariant>,
    asset: Option<Asset>,
    amount: Option<u64>,
    margin_account: Option<Pubkey>,
    user_token_account: Option<Pubkey>,
    authority: Option<Pubkey>,
    whitelist_deposit: Option<Pubkey>,
}

impl<'a> DepositBuilder<'a> {
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
            whitelist_deposit: None,
        }
    }

    /// Pins the layout. Defaults to the snapshot schema.
    #[must_use]
    pub fn variant(mut self, variant: DepositVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Sets the asset; the v1 layout reads its zeta group and greeks.
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

    /// Sets the margin account credited.
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

    /// Attaches a whitelisted deposit account.
    #[must_use]
    pub fn whitelist_deposit(mut self, account: Pubkey) -> Self {
        self.whitelist_deposit = Some(account);
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidInput` if a required field is not set, or
    /// the snapshot lookup errors.
    pub fn build(self) -> Result<Instruction, SdkError> {
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
            .unwrap_or_else(|| DepositVariant::for_schema(snapshot.schema));
        debug!(variant = variant.name(), amount, "building deposit");

        let mut accounts = Vec::with_capacity(10);
        let greeks = match variant {
            DepositVariant::V1 => {
                let asset = self.asset.ok_or_else(|| SdkError::not_set("asset"))?;
                let sub = snapshot.resolve(asset)?;
                accounts.push(AccountMeta::new_readonly(sub.zeta_group, false));
                Some(sub.greeks)
            }
            DepositVariant::V2 => {
                let pricing = snapshot.pricing(variant.name())?;
                accounts.push(AccountMeta::new_readonly(pricing.address, false));
                None
            }
        };
        accounts.extend([
            AccountMeta::new(margin_account, false),
            AccountMeta::new(snapshot.combined_vault, false),
            AccountMeta::new(user_token_account, false),
            AccountMeta::new(snapshot.combined_socialized_loss, false),
            AccountMeta::new_readonly(authority, true),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(snapshot.state, false),
        ]);
        if let Some(greeks) = greeks {
            accounts.push(AccountMeta::new_readonly(greeks, false));
        }
        append_optional(&mut accounts, self.whitelist_deposit);

        new_instruction(snapshot.program_id(), variant.name(), accounts, &amount)
    }
}
