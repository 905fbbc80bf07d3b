//! Collateral and treasury movement types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::codec::program_enum;

/// Direction of a position movement between a margin and a spread account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Move positions from the margin account into the spread account.
    Lock,
    /// Move positions from the spread account back to the margin account.
    Unlock,
}

program_enum!(MovementType, "movement type", {
    Lock = 1,
    Unlock = 2,
});

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lock => write!(f, "lock"),
            Self::Unlock => write!(f, "unlock"),
        }
    }
}

/// Source and destination of an admin treasury transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreasuryMovementType {
    /// Insurance vault to treasury wallet.
    ToTreasuryFromInsurance,
    /// Treasury wallet to insurance vault.
    ToInsuranceFromTreasury,
    /// Referrals rewards wallet to treasury wallet.
    ToTreasuryFromReferralsRewards,
    /// Treasury wallet to referrals rewards wallet.
    ToReferralsRewardsFromTreasury,
}

program_enum!(TreasuryMovementType, "treasury movement type", {
    ToTreasuryFromInsurance = 1,
    ToInsuranceFromTreasury = 2,
    ToTreasuryFromReferralsRewards = 3,
    ToReferralsRewardsFromTreasury = 4,
});
