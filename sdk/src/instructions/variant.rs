//! Schema variants of multi-version instructions.
//!
//! Each action that the program exposes under more than one account layout is
//! a closed enum here. Callers pick a variant explicitly or ask for the one
//! matching a snapshot's schema; variants are never upgraded implicitly.

use sha2::{Digest, Sha256};

use crate::exchange::SchemaVersion;
use crate::types::Kind;

/// Computes the 8-byte instruction discriminator of a program method.
#[must_use]
pub fn discriminator(name: &str) -> [u8; 8] {
    let hash = Sha256::digest(format!("global:{name}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash[..8]);
    out
}

/// One schema version of a logical instruction.
pub trait InstructionVariant: Copy {
    /// Program method name.
    fn name(self) -> &'static str;

    /// Account-layout generation this variant targets.
    fn schema(self) -> SchemaVersion;

    /// 8-byte discriminator prefixed to the instruction data.
    fn discriminator(self) -> [u8; 8] {
        discriminator(self.name())
    }
}

macro_rules! variant_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => ($method:literal, $schema:ident)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every variant, oldest first.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
        }

        impl InstructionVariant for $name {
            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $method,)+
                }
            }

            fn schema(self) -> SchemaVersion {
                match self {
                    $(Self::$variant => SchemaVersion::$schema,)+
                }
            }
        }
    };
}

/// Picks the zeta-group or pricing member of a two-version action.
macro_rules! two_schema {
    ($name:ident, $zeta_group:ident, $pricing:ident) => {
        impl $name {
            /// Returns the variant matching a snapshot schema.
            #[must_use]
            pub const fn for_schema(schema: SchemaVersion) -> Self {
                match schema {
                    SchemaVersion::ZetaGroup => Self::$zeta_group,
                    SchemaVersion::Pricing => Self::$pricing,
                }
            }
        }
    };
}

variant_enum!(
    /// Place-order layouts.
    PlaceOrderVariant {
        /// Dated market, no time-in-force.
        V3 => ("place_order_v3", ZetaGroup),
        /// Dated market with time-in-force offset.
        V4 => ("place_order_v4", ZetaGroup),
        /// Perp market, no time-in-force.
        PerpV1 => ("place_perp_order", ZetaGroup),
        /// Perp market with time-in-force offset.
        PerpV2 => ("place_perp_order_v2", ZetaGroup),
        /// Perp market against the pricing account.
        PerpV3 => ("place_perp_order_v3", Pricing),
    }
);

impl PlaceOrderVariant {
    /// Newest variant for a market kind under a schema.
    ///
    /// Dated markets only exist under the zeta-group schema, so they always
    /// map to [`Self::V4`].
    #[must_use]
    pub const fn for_schema(schema: SchemaVersion, kind: Kind) -> Self {
        match (kind, schema) {
            (Kind::Perp, SchemaVersion::ZetaGroup) => Self::PerpV2,
            (Kind::Perp, SchemaVersion::Pricing) => Self::PerpV3,
            _ => Self::V4,
        }
    }

    /// Returns true for variants that trade the perpetual market.
    #[must_use]
    pub const fn is_perp(self) -> bool {
        matches!(self, Self::PerpV1 | Self::PerpV2 | Self::PerpV3)
    }

    /// Returns true for variants that encode a time-in-force offset.
    #[must_use]
    pub const fn has_tif_offset(self) -> bool {
        matches!(self, Self::V4 | Self::PerpV2 | Self::PerpV3)
    }
}

variant_enum!(
    /// Cancel-order layouts.
    CancelOrderVariant {
        /// Keyed by zeta group.
        V1 => ("cancel_order", ZetaGroup),
        /// Keyed by pricing account.
        V2 => ("cancel_order_v2", Pricing),
    }
);
two_schema!(CancelOrderVariant, V1, V2);

variant_enum!(
    /// Deposit layouts.
    DepositVariant {
        /// Keyed by zeta group, with greeks.
        V1 => ("deposit", ZetaGroup),
        /// Keyed by pricing account.
        V2 => ("deposit_v2", Pricing),
    }
);
two_schema!(DepositVariant, V1, V2);

variant_enum!(
    /// Withdraw layouts.
    WithdrawVariant {
        /// Keyed by zeta group, with greeks.
        V1 => ("withdraw", ZetaGroup),
        /// Keyed by pricing account.
        V2 => ("withdraw_v2", Pricing),
    }
);
two_schema!(WithdrawVariant, V1, V2);

variant_enum!(
    /// Liquidation layouts.
    LiquidateVariant {
        /// Keyed by zeta group, with greeks.
        V1 => ("liquidate", ZetaGroup),
        /// Keyed by pricing account.
        V2 => ("liquidate_v2", Pricing),
    }
);
two_schema!(LiquidateVariant, V1, V2);

variant_enum!(
    /// Pricing update layouts.
    UpdatePricingVariant {
        /// Per zeta group, optional expiry index.
        V1 => ("update_pricing", ZetaGroup),
        /// Per asset, against the pricing account.
        V2 => ("update_pricing_v2", Pricing),
    }
);
two_schema!(UpdatePricingVariant, V1, V2);

variant_enum!(
    /// Insurance vault rebalance layouts.
    RebalanceInsuranceVaultVariant {
        /// Keyed by zeta group.
        V1 => ("rebalance_insurance_vault", ZetaGroup),
        /// Keyed by pricing account.
        V2 => ("rebalance_insurance_vault_v2", Pricing),
    }
);
two_schema!(RebalanceInsuranceVaultVariant, V1, V2);

variant_enum!(
    /// Halted settlement layouts.
    SettlePositionsHaltedVariant {
        /// Keyed by zeta group, with greeks.
        V1 => ("settle_positions_halted", ZetaGroup),
        /// Keyed by pricing account.
        V2 => ("settle_positions_halted_v2", Pricing),
    }
);
two_schema!(SettlePositionsHaltedVariant, V1, V2);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_order_discriminators() {
        let expected: [(PlaceOrderVariant, [u8; 8]); 5] = [
            (PlaceOrderVariant::V3, [146, 93, 14, 167, 159, 20, 6, 58]),
            (PlaceOrderVariant::V4, [243, 248, 213, 143, 184, 79, 41, 73]),
            (PlaceOrderVariant::PerpV1, [69, 161, 93, 202, 120, 126, 76, 185]),
            (PlaceOrderVariant::PerpV2, [205, 84, 130, 180, 63, 118, 10, 207]),
            (PlaceOrderVariant::PerpV3, [91, 246, 96, 7, 53, 22, 234, 225]),
        ];
        for (variant, bytes) in expected {
            assert_eq!(variant.discriminator(), bytes, "{}", variant.name());
        }
    }

    #[test]
    fn test_two_version_discriminators() {
        assert_eq!(
            CancelOrderVariant::V1.discriminator(),
            [95, 129, 237, 240, 8, 49, 223, 132]
        );
        assert_eq!(
            CancelOrderVariant::V2.discriminator(),
            [110, 83, 130, 136, 146, 136, 66, 67]
        );
        assert_eq!(
            DepositVariant::V1.discriminator(),
            [242, 35, 198, 137, 82, 225, 242, 182]
        );
        assert_eq!(
            DepositVariant::V2.discriminator(),
            [109, 75, 69, 153, 172, 218, 146, 19]
        );
        assert_eq!(
            WithdrawVariant::V1.discriminator(),
            [183, 18, 70, 156, 148, 109, 161, 34]
        );
        assert_eq!(
            WithdrawVariant::V2.discriminator(),
            [242, 80, 163, 0, 196, 221, 194, 194]
        );
        assert_eq!(
            SettlePositionsHaltedVariant::V1.discriminator(),
            [170, 147, 139, 163, 19, 104, 167, 77]
        );
    }

    #[test]
    fn test_plain_discriminators() {
        assert_eq!(
            discriminator("crank_event_queue"),
            [67, 133, 97, 223, 178, 188, 235, 181]
        );
        assert_eq!(
            discriminator("settle_dex_funds"),
            [165, 103, 142, 38, 211, 166, 14, 226]
        );
    }

    #[test]
    fn test_place_order_for_schema() {
        assert_eq!(
            PlaceOrderVariant::for_schema(SchemaVersion::ZetaGroup, Kind::Perp),
            PlaceOrderVariant::PerpV2
        );
        assert_eq!(
            PlaceOrderVariant::for_schema(SchemaVersion::Pricing, Kind::Perp),
            PlaceOrderVariant::PerpV3
        );
        assert_eq!(
            PlaceOrderVariant::for_schema(SchemaVersion::ZetaGroup, Kind::Call),
            PlaceOrderVariant::V4
        );
    }

    #[test]
    fn test_for_schema_matches_schema() {
        for schema in [SchemaVersion::ZetaGroup, SchemaVersion::Pricing] {
            assert_eq!(CancelOrderVariant::for_schema(schema).schema(), schema);
            assert_eq!(DepositVariant::for_schema(schema).schema(), schema);
            assert_eq!(WithdrawVariant::for_schema(schema).schema(), schema);
            assert_eq!(LiquidateVariant::for_schema(schema).schema(), schema);
            assert_eq!(UpdatePricingVariant::for_schema(schema).schema(), schema);
            assert_eq!(
                RebalanceInsuranceVaultVariant::for_schema(schema).schema(),
                schema
            );
            assert_eq!(
                SettlePositionsHaltedVariant::for_schema(schema).schema(),
                schema
            );
        }
    }

    #[test]
    fn test_variant_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            PlaceOrderVariant::ALL.iter().map(|v| v.name()).collect();
        assert_eq!(names.len(), PlaceOrderVariant::ALL.len());
        assert!(PlaceOrderVariant::ALL
            .iter()
            .all(|v| v.is_perp() != v.name().starts_with("place_order")));
    }
}
