//! Maintenance planning.
//!
//! Turns a description of pending maintenance work into ordered,
//! transaction-sized instruction groups.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, info, warn};
use zeta_sdk::instructions::cancel_order::prune_expired_tif_orders;
use zeta_sdk::instructions::crank::{
    apply_perp_funding_txs, crank_event_queue, settle_dex_funds_batched,
};
use zeta_sdk::instructions::InstructionGroup;
use zeta_sdk::types::serde_pubkey;
use zeta_sdk::{Asset, ExchangeSnapshot, SdkError};

use super::config::{ConfigError, CrankConfig};
use super::metrics::CrankMetrics;

/// A market whose event queue needs cranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrankTarget {
    /// Asset of the market.
    pub asset: Asset,
    /// Dated market index, or `None` for the perpetual market.
    #[serde(default)]
    pub market_index: Option<usize>,
    /// Open orders accounts referenced by the queued events.
    #[serde(with = "serde_pubkey::vec")]
    pub open_orders: Vec<Pubkey>,
}

/// Order-book funds to settle on one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementWork {
    /// Asset of the market.
    pub asset: Asset,
    /// Zeta market address.
    #[serde(with = "serde_pubkey")]
    pub market: Pubkey,
    /// Open orders accounts holding unsettled funds.
    #[serde(with = "serde_pubkey::vec")]
    pub open_orders: Vec<Pubkey>,
}

/// Margin accounts due perp funding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingWork {
    /// Asset of the perpetual market.
    pub asset: Asset,
    /// Margin accounts to apply funding to.
    #[serde(with = "serde_pubkey::vec")]
    pub margin_accounts: Vec<Pubkey>,
}

/// Pending maintenance, as gathered by an external account scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceWork {
    /// Event queues to crank.
    #[serde(default)]
    pub event_queues: Vec<CrankTarget>,
    /// Order-book settlements.
    #[serde(default)]
    pub settlements: Vec<SettlementWork>,
    /// Perp funding.
    #[serde(default)]
    pub perp_funding: Vec<FundingWork>,
}

impl MaintenanceWork {
    /// Parses work from JSON.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::Serialization` on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        serde_json::from_str(json).map_err(|e| SdkError::Serialization(e.to_string()))
    }

    /// Assets named by the work items, in item order, with repeats.
    fn assets(&self) -> impl Iterator<Item = Asset> + '_ {
        self.event_queues
            .iter()
            .map(|t| t.asset)
            .chain(self.settlements.iter().map(|s| s.asset))
            .chain(self.perp_funding.iter().map(|f| f.asset))
    }
}

/// One transaction's worth of instructions.
#[derive(Debug, Clone)]
pub struct PlannedTransaction {
    /// Human-readable description.
    pub label: String,
    /// Instructions, in execution order.
    pub instructions: InstructionGroup,
    /// Remaining accounts carried by the instructions.
    pub remaining_accounts: usize,
}

impl PlannedTransaction {
    fn single(label: String, instruction: Instruction, remaining_accounts: usize) -> Self {
        Self {
            label,
            instructions: vec![instruction],
            remaining_accounts,
        }
    }
}

/// Plans maintenance transactions against an exchange snapshot.
pub struct MaintenancePlanner<'a> {
    /// Resolved exchange accounts.
    snapshot: &'a ExchangeSnapshot,

    /// Configuration.
    config: CrankConfig,

    /// Parsed configured assets, in configured order.
    assets: Vec<Asset>,

    /// Metrics.
    metrics: Arc<CrankMetrics>,
}

impl<'a> MaintenancePlanner<'a> {
    /// Creates a new planner.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(snapshot: &'a ExchangeSnapshot, config: CrankConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let assets = config.parse_assets()?;

        Ok(Self {
            snapshot,
            config,
            assets,
            metrics: Arc::new(CrankMetrics::new()),
        })
    }

    /// Returns the metrics.
    #[must_use]
    pub fn metrics(&self) -> Arc<CrankMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &CrankConfig {
        &self.config
    }

    /// Plans every configured asset's maintenance.
    ///
    /// Per asset, in configured order: event queue cranks, expired TIF
    /// pruning on every market, order-book settlement, then perp funding.
    /// Work for unconfigured assets is skipped.
    ///
    /// # Errors
    ///
    /// Returns the first instruction building error; nothing is returned
    /// for the run in that case.
    pub fn plan(&self, work: &MaintenanceWork) -> Result<Vec<PlannedTransaction>, SdkError> {
        self.metrics.record_run();

        for asset in work.assets().filter(|asset| !self.assets.contains(asset)) {
            self.metrics.record_skipped();
            warn!(%asset, "skipping work for unconfigured asset");
        }

        let mut planned = Vec::new();
        for &asset in &self.assets {
            self.plan_cranks(asset, work, &mut planned)?;
            if self.config.prune_expired_tif {
                self.plan_pruning(asset, &mut planned)?;
            }
            self.plan_settlements(asset, work, &mut planned)?;
            self.plan_funding(asset, work, &mut planned)?;
        }

        for tx in &planned {
            self.metrics
                .record_transaction(tx.instructions.len(), tx.remaining_accounts);
        }
        info!(
            transactions = planned.len(),
            assets = self.assets.len(),
            "planned maintenance"
        );
        Ok(planned)
    }

    fn plan_cranks(
        &self,
        asset: Asset,
        work: &MaintenanceWork,
        planned: &mut Vec<PlannedTransaction>,
    ) -> Result<(), SdkError> {
        for target in work.event_queues.iter().filter(|t| t.asset == asset) {
            let ix = crank_event_queue(
                self.snapshot,
                asset,
                target.market_index,
                &target.open_orders,
            )?;
            planned.push(PlannedTransaction::single(
                format!("crank_event_queue {asset} {}", market_label(target.market_index)),
                ix,
                target.open_orders.len(),
            ));
        }
        Ok(())
    }

    fn plan_pruning(
        &self,
        asset: Asset,
        planned: &mut Vec<PlannedTransaction>,
    ) -> Result<(), SdkError> {
        let markets = self.snapshot.resolve(asset)?.markets.len();
        for index in (0..markets).map(Some).chain(std::iter::once(None)) {
            let ix = prune_expired_tif_orders(self.snapshot, asset, index)?;
            planned.push(PlannedTransaction::single(
                format!("prune_expired_tif_orders {asset} {}", market_label(index)),
                ix,
                0,
            ));
        }
        debug!(%asset, markets = markets + 1, "planned tif pruning");
        Ok(())
    }

    fn plan_settlements(
        &self,
        asset: Asset,
        work: &MaintenanceWork,
        planned: &mut Vec<PlannedTransaction>,
    ) -> Result<(), SdkError> {
        let limit = self.config.settle_batch_size;
        for settlement in work.settlements.iter().filter(|s| s.asset == asset) {
            let instructions = settle_dex_funds_batched(
                self.snapshot,
                asset,
                &settlement.market,
                &settlement.open_orders,
                limit,
            )?;
            let chunks = settlement.open_orders.chunks(limit).map(<[Pubkey]>::len);
            for (i, (ix, remaining)) in instructions.into_iter().zip(chunks).enumerate() {
                planned.push(PlannedTransaction::single(
                    format!("settle_dex_funds {asset} {} #{i}", settlement.market),
                    ix,
                    remaining,
                ));
            }
        }
        Ok(())
    }

    fn plan_funding(
        &self,
        asset: Asset,
        work: &MaintenanceWork,
        planned: &mut Vec<PlannedTransaction>,
    ) -> Result<(), SdkError> {
        let limit = self.config.funding_batch_size;
        for funding in work.perp_funding.iter().filter(|f| f.asset == asset) {
            let instructions =
                apply_perp_funding_txs(self.snapshot, asset, &funding.margin_accounts, limit)?;
            let chunks = funding.margin_accounts.chunks(limit).map(<[Pubkey]>::len);
            for (i, (ix, remaining)) in instructions.into_iter().zip(chunks).enumerate() {
                planned.push(PlannedTransaction::single(
                    format!("apply_perp_funding {asset} #{i}"),
                    ix,
                    remaining,
                ));
            }
        }
        Ok(())
    }
}

fn market_label(index: Option<usize>) -> String {
    match index {
        Some(index) => format!("market {index}"),
        None => "perp".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_label() {
        assert_eq!(market_label(Some(3)), "market 3");
        assert_eq!(market_label(None), "perp");
    }

    #[test]
    fn test_work_from_json() {
        let market = Pubkey::new_unique();
        let open_orders = Pubkey::new_unique();
        let json = format!(
            r#"{{
                "eventQueues": [
                    {{"asset": "BTC", "marketIndex": 2, "openOrders": ["{open_orders}"]}}
                ],
                "settlements": [{{"asset": "SOL", "market": "{market}", "openOrders": []}}]
            }}"#
        );
        let work = MaintenanceWork::from_json(&json).expect("work");
        assert_eq!(work.event_queues.len(), 1);
        assert_eq!(work.event_queues[0].market_index, Some(2));
        assert_eq!(work.event_queues[0].open_orders, vec![open_orders]);
        assert_eq!(work.settlements[0].market, market);
        assert!(work.perp_funding.is_empty());
    }

    #[test]
    fn test_work_from_json_malformed() {
        assert!(matches!(
            MaintenanceWork::from_json(r#"{"eventQueues": [{"asset": "DOGE"}]}"#),
            Err(SdkError::Serialization(_))
        ));
    }

    #[test]
    fn test_work_assets_in_item_order() {
        let work = MaintenanceWork {
            event_queues: vec![CrankTarget {
                asset: Asset::Eth,
                market_index: None,
                open_orders: Vec::new(),
            }],
            settlements: Vec::new(),
            perp_funding: vec![FundingWork {
                asset: Asset::Sol,
                margin_accounts: Vec::new(),
            }],
        };
        let assets: Vec<Asset> = work.assets().collect();
        assert_eq!(assets, vec![Asset::Eth, Asset::Sol]);
    }
}
