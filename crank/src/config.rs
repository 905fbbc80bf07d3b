//! Crank planner configuration.
//!
//! Selects the assets to maintain and the account limits used when
//! batching bulk maintenance instructions.

use serde::{Deserialize, Serialize};
use zeta_sdk::constants::{MAX_SETTLEMENT_ACCOUNTS, MAX_SETTLE_ACCOUNTS};
use zeta_sdk::Asset;

/// Configuration for the crank planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrankConfig {
    /// Assets to maintain, by name (`"SOL"`, `"BTC"`, ...).
    pub assets: Vec<String>,

    /// Margin accounts per `apply_perp_funding` instruction.
    pub funding_batch_size: usize,

    /// Open orders accounts per `settle_dex_funds` instruction.
    pub settle_batch_size: usize,

    /// Whether to prune expired time-in-force orders on every market.
    pub prune_expired_tif: bool,
}

impl Default for CrankConfig {
    fn default() -> Self {
        Self {
            assets: vec![Asset::Sol.to_string(), Asset::Btc.to_string()],
            funding_batch_size: MAX_SETTLEMENT_ACCOUNTS,
            settle_batch_size: MAX_SETTLE_ACCOUNTS,
            prune_expired_tif: true,
        }
    }
}

impl CrankConfig {
    /// Creates a new configuration for the given assets.
    #[must_use]
    pub fn with_assets(assets: Vec<String>) -> Self {
        Self {
            assets,
            ..Default::default()
        }
    }

    /// Sets the batch sizes.
    #[must_use]
    pub fn with_batch_sizes(mut self, funding: usize, settle: usize) -> Self {
        self.funding_batch_size = funding;
        self.settle_batch_size = settle;
        self
    }

    /// Enables or disables pruning of expired TIF orders.
    #[must_use]
    pub fn with_prune_expired_tif(mut self, enabled: bool) -> Self {
        self.prune_expired_tif = enabled;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SETTLEMENT_ACCOUNTS).contains(&self.funding_batch_size) {
            return Err(ConfigError::InvalidFundingBatch(self.funding_batch_size));
        }

        if !(1..=MAX_SETTLE_ACCOUNTS).contains(&self.settle_batch_size) {
            return Err(ConfigError::InvalidSettleBatch(self.settle_batch_size));
        }

        if self.assets.is_empty() {
            return Err(ConfigError::NoAssets);
        }

        self.parse_assets().map(|_| ())
    }

    /// Parses the asset names, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns an error if any name is not a known asset.
    pub fn parse_assets(&self) -> Result<Vec<Asset>, ConfigError> {
        self.assets
            .iter()
            .map(|name| {
                name.parse::<Asset>()
                    .map_err(|_| ConfigError::InvalidAsset(name.clone()))
            })
            .collect()
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Malformed` on invalid JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Funding batch size out of range.
    #[error("funding_batch_size must be in 1..={max}, got {0}", max = MAX_SETTLEMENT_ACCOUNTS)]
    InvalidFundingBatch(usize),

    /// Settle batch size out of range.
    #[error("settle_batch_size must be in 1..={max}, got {0}", max = MAX_SETTLE_ACCOUNTS)]
    InvalidSettleBatch(usize),

    /// No assets configured.
    #[error("at least one asset must be configured")]
    NoAssets,

    /// Unknown asset name.
    #[error("invalid asset: {0}")]
    InvalidAsset(String),

    /// The configuration could not be parsed.
    #[error("malformed config: {0}")]
    Malformed(String),
}
