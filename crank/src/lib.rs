//! Zeta Crank - maintenance planner for the Zeta derivatives program.
//!
//! This crate turns pending maintenance work (event queues to crank,
//! order-book funds to settle, margin accounts due perp funding) into
//! ordered, transaction-sized instruction groups. Submitting them is left
//! to the caller.
//!
//! # Components
//!
//! - [`config`]: Planner configuration
//! - [`planner`]: Work description and planning
//! - [`metrics`]: Planner metrics

pub mod config;
pub mod metrics;
pub mod planner;

pub use config::{ConfigError, CrankConfig};
pub use metrics::CrankMetrics;
pub use planner::{MaintenancePlanner, MaintenanceWork, PlannedTransaction};
