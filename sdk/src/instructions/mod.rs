//! Instruction builders for Zeta transactions.
//!
//! Every builder is a pure function of an [`ExchangeSnapshot`](crate::exchange::ExchangeSnapshot)
//! and typed arguments, producing a Solana [`Instruction`]. The instruction
//! data is the 8-byte method discriminator followed by the borsh-encoded
//! arguments.
//!
//! # Example
//!
//! ```rust,ignore
//! use zeta_sdk::instructions::PlaceOrderBuilder;
//! use zeta_sdk::types::{Asset, Price, Side, Size};
//!
//! let ix = PlaceOrderBuilder::new(&snapshot)
//!     .asset(Asset::Btc)
//!     .market_index(3)
//!     .side(Side::Bid)
//!     .price(Price::new(21_000_000_000))
//!     .size(Size::new(500_000))
//!     .authority(wallet)
//!     .margin_account(margin_account)
//!     .open_orders(open_orders)
//!     .build()?;
//! ```

pub mod accounts;
pub mod admin;
pub mod batch;
pub mod cancel_order;
pub mod crank;
pub mod deposit;
pub mod insurance;
pub mod liquidate;
pub mod margin_account;
pub mod market;
pub mod open_orders;
pub mod pda;
pub mod place_order;
pub mod referrals;
pub mod settlement;
pub mod treasury;
pub mod variant;
pub mod withdraw;

use borsh::BorshSerialize;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::error::SdkError;

pub use accounts::{CancelAccounts, MarketAccounts, OracleAccounts, ToAccountMetas};
pub use batch::{split, InstructionGroup};
pub use cancel_order::{CancelOrderBuilder, CancelTarget};
pub use deposit::DepositBuilder;
pub use pda::{derive_program_address, derive_vault_signer, ProgramAddress};
pub use place_order::PlaceOrderBuilder;
pub use variant::{
    discriminator, CancelOrderVariant, DepositVariant, InstructionVariant, LiquidateVariant,
    PlaceOrderVariant, RebalanceInsuranceVaultVariant, SettlePositionsHaltedVariant,
    UpdatePricingVariant, WithdrawVariant,
};
pub use withdraw::WithdrawBuilder;

/// Encodes instruction data: discriminator of `name`, then `args` in borsh.
///
/// # Errors
///
/// Returns `SdkError::Serialization` if `args` fails to encode.
pub fn instruction_data<T: BorshSerialize>(name: &str, args: &T) -> Result<Vec<u8>, SdkError> {
    let mut data = discriminator(name).to_vec();
    args.serialize(&mut data)
        .map_err(|e| SdkError::Serialization(e.to_string()))?;
    Ok(data)
}

/// Assembles an instruction for a program method.
pub(crate) fn new_instruction<T: BorshSerialize>(
    program_id: Pubkey,
    name: &str,
    accounts: Vec<AccountMeta>,
    args: &T,
) -> Result<Instruction, SdkError> {
    Ok(Instruction {
        program_id,
        accounts,
        data: instruction_data(name, args)?,
    })
}
