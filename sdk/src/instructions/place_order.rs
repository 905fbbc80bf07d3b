//! Place-order instruction builder.
//!
//! Covers the dated-market (v3, v4) and perpetual (v1, v2, v3) layouts. The
//! tag is checked before anything is resolved from the snapshot.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use tracing::debug;

use crate::constants::{RENT_SYSVAR_ID, TOKEN_PROGRAM_ID};
use crate::error::SdkError;
use crate::exchange::ExchangeSnapshot;
use crate::types::{Asset, Kind, OrderOptions, OrderType, Price, Side, Size};

use super::accounts::{append_optional, MarketAccounts, OracleAccounts, ToAccountMetas};
use super::new_instruction;
use super::variant::{InstructionVariant, PlaceOrderVariant};

/// Arguments of the layouts without time-in-force.
#[derive(Debug, Clone, BorshSerialize)]
struct PlaceOrderArgs {
    price: u64,
    size: u64,
    side: Side,
    order_type: OrderType,
    client_order_id: Option<u64>,
    tag: Option<String>,
}

/// Arguments of the layouts with time-in-force.
#[derive(Debug, Clone, BorshSerialize)]
struct PlaceOrderTifArgs {
    price: u64,
    size: u64,
    side: Side,
    order_type: OrderType,
    client_order_id: Option<u64>,
    tag: Option<String>,
    tif_offset: Option<u16>,
}

/// Builder for the place-order instructions.
#[derive(Debug, Clone)]
pub struct PlaceOrderBuilder<'a> {
    snapshot: &'a ExchangeSnapshot,
    variant: Option<PlaceOrderVariant>,
    asset: Option<Asset>,
    market_index: Option<usize>,
    side: Option<Side>,
    price: Option<Price>,
    size: Option<Size>,
    options: OrderOptions,
    margin_account: Option<Pubkey>,
    authority: Option<Pubkey>,
    open_orders: Option<Pubkey>,
    whitelist_trading_fees: Option<Pubkey>,
}

impl<'a> PlaceOrderBuilder<'a> {
    /// Creates a new builder reading from `snapshot`.
    #[must_use]
    pub fn new(snapshot: &'a ExchangeSnapshot) -> Self {
        Self {
            snapshot,
            variant: None,
            asset: None,
            market_index: None,
            side: None,
            price: None,
            size: None,
            options: OrderOptions::default(),
            margin_account: None,
            authority: None,
            open_orders: None,
            whitelist_trading_fees: None,
        }
    }

    /// Pins the instruction layout. Without it the newest layout for the
    /// market kind under the snapshot schema is used.
    #[must_use]
    pub fn variant(mut self, variant: PlaceOrderVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Sets the asset.
    #[must_use]
    pub fn asset(mut self, asset: Asset) -> Self {
        self.asset = Some(asset);
        self
    }

    /// Sets the dated market index. Leave unset for the perpetual market.
    #[must_use]
    pub fn market_index(mut self, index: usize) -> Self {
        self.market_index = Some(index);
        self
    }

    /// Sets the order side.
    #[must_use]
    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Sets the limit price in native units.
    #[must_use]
    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the size in native units.
    #[must_use]
    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets order type, client order id, time-in-force and tag.
    #[must_use]
    pub fn options(mut self, options: OrderOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the margin account placing the order.
    #[must_use]
    pub fn margin_account(mut self, margin_account: Pubkey) -> Self {
        self.margin_account = Some(margin_account);
        self
    }

    /// Sets the signing authority.
    #[must_use]
    pub fn authority(mut self, authority: Pubkey) -> Self {
        self.authority = Some(authority);
        self
    }

    /// Sets the open orders account.
    #[must_use]
    pub fn open_orders(mut self, open_orders: Pubkey) -> Self {
        self.open_orders = Some(open_orders);
        self
    }

    /// Attaches a whitelisted trading fee account.
    #[must_use]
    pub fn whitelist_trading_fees(mut self, account: Pubkey) -> Self {
        self.whitelist_trading_fees = Some(account);
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidInput` for an oversized tag or a missing
    /// field, and the snapshot lookup errors for unknown assets, markets or a
    /// pricing layout against a pre-pricing snapshot.
    pub fn build(self) -> Result<Instruction, SdkError> {
        self.options.validate()?;

        let asset = self.asset.ok_or_else(|| SdkError::not_set("asset"))?;
        let side = self.side.ok_or_else(|| SdkError::not_set("side"))?;
        let price = self.price.ok_or_else(|| SdkError::not_set("price"))?;
        let size = self.size.ok_or_else(|| SdkError::not_set("size"))?;
        let margin_account = self
            .margin_account
            .ok_or_else(|| SdkError::not_set("margin account"))?;
        let authority = self.authority.ok_or_else(|| SdkError::not_set("authority"))?;
        let open_orders = self
            .open_orders
            .ok_or_else(|| SdkError::not_set("open orders"))?;

        let snapshot = self.snapshot;
        let sub = snapshot.resolve(asset)?;

        let variant = match (self.variant, self.market_index) {
            (Some(variant), _) => variant,
            (None, Some(index)) => {
                PlaceOrderVariant::for_schema(snapshot.schema, sub.market(index)?.kind)
            }
            (None, None) => PlaceOrderVariant::for_schema(snapshot.schema, Kind::Perp),
        };
        debug!(%asset, variant = variant.name(), %side, "building place order");

        let market = if variant.is_perp() {
            &sub.perp_market
        } else {
            let index = self
                .market_index
                .ok_or_else(|| SdkError::not_set("market index"))?;
            sub.market(index)?
        };

        let mut accounts = Vec::with_capacity(27);
        accounts.push(AccountMeta::new_readonly(snapshot.state, false));
        match variant {
            PlaceOrderVariant::PerpV3 => {
                let pricing = snapshot.pricing(variant.name())?;
                accounts.push(AccountMeta::new(pricing.address, false));
            }
            _ => accounts.push(AccountMeta::new_readonly(sub.zeta_group, false)),
        }
        accounts.extend([
            AccountMeta::new(margin_account, false),
            AccountMeta::new_readonly(authority, true),
            AccountMeta::new_readonly(snapshot.dex_program_id(), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(snapshot.serum_authority, false),
        ]);
        if variant != PlaceOrderVariant::PerpV3 {
            accounts.push(AccountMeta::new_readonly(sub.greeks, false));
        }
        accounts.extend([
            AccountMeta::new(open_orders, false),
            AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
        ]);
        MarketAccounts::for_order(market, side).append_to(&mut accounts);
        OracleAccounts::for_sub_exchange(snapshot, sub).append_to(&mut accounts);
        if !variant.is_perp() {
            accounts.push(AccountMeta::new(sub.market_node(market.index)?, false));
        }
        accounts.extend([
            AccountMeta::new(market.market_mint(side), false),
            AccountMeta::new_readonly(snapshot.mint_authority, false),
        ]);
        if variant.is_perp() {
            accounts.push(AccountMeta::new(sub.perp_sync_queue, false));
        }
        append_optional(&mut accounts, self.whitelist_trading_fees);

        let program_id = snapshot.program_id();
        let tag = Some(self.options.tag);
        // Zero ids and offsets go out as absent whichever way they were set.
        let client_order_id = self.options.client_order_id.filter(|id| *id != 0);
        let tif_offset = self.options.tif_offset.filter(|offset| *offset != 0);
        if variant.has_tif_offset() {
            let args = PlaceOrderTifArgs {
                price: price.value(),
                size: size.value(),
                side,
                order_type: self.options.order_type,
                client_order_id,
                tag,
                tif_offset,
            };
            new_instruction(program_id, variant.name(), accounts, &args)
        } else {
            let args = PlaceOrderArgs {
                price: price.value(),
                size: size.value(),
                side,
                order_type: self.options.order_type,
                client_order_id,
                tag,
            };
            new_instruction(program_id, variant.name(), accounts, &args)
        }
    }
}
