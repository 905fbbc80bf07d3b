//! SDK error types.
//!
//! Every error is raised at the point of detection, before any account list or
//! payload is assembled, so a failed call never leaves partial output behind.

use solana_sdk::pubkey::Pubkey;

use crate::exchange::SchemaVersion;
use crate::types::Asset;

/// SDK errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// Malformed argument (tag too long, missing required field, empty batch limit).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unrecognized wire tag for a program enum.
    #[error("invalid {kind} variant tag: {tag}")]
    InvalidVariant {
        /// Enum being decoded.
        kind: &'static str,
        /// Tag found on the wire.
        tag: u8,
    },

    /// Asset is not initialized in the snapshot.
    #[error("unknown asset: {0}")]
    UnknownAsset(Asset),

    /// Market address is not part of the asset's market list.
    #[error("unknown market: {0}")]
    UnknownMarket(Pubkey),

    /// Market index exceeds the asset's market count.
    #[error("market index {index} out of range for {asset} ({count} markets)")]
    MarketIndexOutOfRange {
        /// Asset whose markets were queried.
        asset: Asset,
        /// Requested index.
        index: usize,
        /// Number of markets available.
        count: usize,
    },

    /// Derivation seeds exceed protocol limits.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// Instruction variant needs snapshot fields that are absent.
    #[error("{instruction} requires the {required} schema")]
    SchemaVersionMismatch {
        /// Instruction name.
        instruction: &'static str,
        /// Schema the variant targets.
        required: SchemaVersion,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SdkError {
    /// Shorthand for a missing required builder field.
    pub(crate) fn not_set(field: &str) -> Self {
        Self::InvalidInput(format!("{field} not set"))
    }
}
