//! Network configuration.
//!
//! Per-deployment program identifiers. Builders read these from the snapshot
//! instead of a process-wide table so that several deployments can be
//! targeted from one process.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::{
    CHAINLINK_PROGRAM_ID, DEX_PROGRAM_ID_DEVNET, DEX_PROGRAM_ID_MAINNET, ZETA_PROGRAM_ID_DEVNET,
    ZETA_PROGRAM_ID_MAINNET,
};
use crate::error::SdkError;
use crate::types::serde_pubkey;

/// Supported network environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Local validator.
    Localnet,
    /// Devnet.
    Devnet,
    /// Mainnet-beta.
    Mainnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Localnet => write!(f, "localnet"),
            Self::Devnet => write!(f, "devnet"),
            Self::Mainnet => write!(f, "mainnet"),
        }
    }
}

impl FromStr for Network {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "localnet" => Ok(Self::Localnet),
            "devnet" => Ok(Self::Devnet),
            "mainnet" | "mainnet-beta" => Ok(Self::Mainnet),
            other => Err(SdkError::InvalidInput(format!("unknown network: {other}"))),
        }
    }
}

/// Program identifiers of one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Network environment.
    pub network: Network,

    /// Zeta program id.
    #[serde(with = "serde_pubkey")]
    pub program_id: Pubkey,

    /// External order-book program id.
    #[serde(with = "serde_pubkey")]
    pub dex_program_id: Pubkey,

    /// Oracle backup program id.
    #[serde(with = "serde_pubkey")]
    pub oracle_backup_program_id: Pubkey,
}

impl NetworkConfig {
    /// Returns the published program ids for a network.
    #[must_use]
    pub const fn for_network(network: Network) -> Self {
        let (program_id, dex_program_id) = match network {
            Network::Localnet | Network::Devnet => (ZETA_PROGRAM_ID_DEVNET, DEX_PROGRAM_ID_DEVNET),
            Network::Mainnet => (ZETA_PROGRAM_ID_MAINNET, DEX_PROGRAM_ID_MAINNET),
        };
        Self {
            network,
            program_id,
            dex_program_id,
            oracle_backup_program_id: CHAINLINK_PROGRAM_ID,
        }
    }

    /// Overrides the Zeta program id (custom deployments).
    #[must_use]
    pub const fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    /// Overrides the order-book program id.
    #[must_use]
    pub const fn with_dex_program_id(mut self, dex_program_id: Pubkey) -> Self {
        self.dex_program_id = dex_program_id;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any program id is the default key.
    pub fn validate(&self) -> Result<(), SdkError> {
        let ids = [
            ("program_id", self.program_id),
            ("dex_program_id", self.dex_program_id),
            ("oracle_backup_program_id", self.oracle_backup_program_id),
        ];
        for (name, id) in ids {
            if id == Pubkey::default() {
                return Err(SdkError::InvalidInput(format!("{name} cannot be default")));
            }
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::for_network(Network::Devnet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_network_mainnet() {
        let config = NetworkConfig::for_network(Network::Mainnet);
        assert_eq!(config.program_id, ZETA_PROGRAM_ID_MAINNET);
        assert_eq!(config.dex_program_id, DEX_PROGRAM_ID_MAINNET);
        assert_eq!(config.oracle_backup_program_id, CHAINLINK_PROGRAM_ID);
    }

    #[test]
    fn test_localnet_shares_devnet_ids() {
        assert_eq!(
            NetworkConfig::for_network(Network::Localnet).program_id,
            NetworkConfig::for_network(Network::Devnet).program_id
        );
    }

    #[test]
    fn test_validate_rejects_default_key() {
        let config = NetworkConfig::default().with_dex_program_id(Pubkey::default());
        assert!(config.validate().is_err());
        assert!(NetworkConfig::default().validate().is_ok());
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("mainnet-beta".parse::<Network>(), Ok(Network::Mainnet));
        assert_eq!("Devnet".parse::<Network>(), Ok(Network::Devnet));
        assert!("testnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_config_json() {
        let config = NetworkConfig::for_network(Network::Mainnet);
        let json = serde_json::to_string(&config).expect("serialize");
        assert!(json.contains("\"network\":\"mainnet\""));
        assert!(json.contains("ZETAxsqBRek56DhiGXrn75yj2NHU3aYUnxvHXpkf3aD"));
        let back: NetworkConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}
