//! Crank planner metrics.
//!
//! Provides atomic counters for monitoring planning runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics for the crank planner.
#[derive(Debug)]
pub struct CrankMetrics {
    /// Total transactions planned.
    transactions_planned: AtomicU64,

    /// Total instructions planned.
    instructions_planned: AtomicU64,

    /// Total remaining accounts carried by planned instructions.
    remaining_accounts: AtomicU64,

    /// Work items skipped because their asset is not configured.
    work_skipped: AtomicU64,

    /// Total planning runs.
    plan_runs: AtomicU64,

    /// Start time for rate calculation.
    start_time: Instant,
}

impl Default for CrankMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl CrankMetrics {
    /// Creates a new metrics instance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transactions_planned: AtomicU64::new(0),
            instructions_planned: AtomicU64::new(0),
            remaining_accounts: AtomicU64::new(0),
            work_skipped: AtomicU64::new(0),
            plan_runs: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a planned transaction.
    pub fn record_transaction(&self, instructions: usize, remaining_accounts: usize) {
        self.transactions_planned.fetch_add(1, Ordering::Relaxed);
        self.instructions_planned
            .fetch_add(instructions as u64, Ordering::Relaxed);
        self.remaining_accounts
            .fetch_add(remaining_accounts as u64, Ordering::Relaxed);
    }

    /// Records a skipped work item.
    pub fn record_skipped(&self) {
        self.work_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a planning run.
    pub fn record_run(&self) {
        self.plan_runs.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns total transactions planned.
    #[must_use]
    pub fn transactions_planned(&self) -> u64 {
        self.transactions_planned.load(Ordering::Relaxed)
    }

    /// Returns total instructions planned.
    #[must_use]
    pub fn instructions_planned(&self) -> u64 {
        self.instructions_planned.load(Ordering::Relaxed)
    }

    /// Returns total remaining accounts.
    #[must_use]
    pub fn remaining_accounts(&self) -> u64 {
        self.remaining_accounts.load(Ordering::Relaxed)
    }

    /// Returns skipped work items.
    #[must_use]
    pub fn work_skipped(&self) -> u64 {
        self.work_skipped.load(Ordering::Relaxed)
    }

    /// Returns planning runs.
    #[must_use]
    pub fn plan_runs(&self) -> u64 {
        self.plan_runs.load(Ordering::Relaxed)
    }

    /// Returns the uptime.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the mean number of instructions per transaction.
    #[must_use]
    pub fn instructions_per_transaction(&self) -> f64 {
        let transactions = self.transactions_planned();
        if transactions > 0 {
            self.instructions_planned() as f64 / transactions as f64
        } else {
            0.0
        }
    }

    /// Returns a snapshot of all metrics.
    #[must_use]
    pub fn snapshot(&self) -> CrankMetricsSnapshot {
        CrankMetricsSnapshot {
            transactions_planned: self.transactions_planned(),
            instructions_planned: self.instructions_planned(),
            remaining_accounts: self.remaining_accounts(),
            work_skipped: self.work_skipped(),
            plan_runs: self.plan_runs(),
            uptime: self.uptime(),
            instructions_per_transaction: self.instructions_per_transaction(),
        }
    }

    /// Resets all counters.
    pub fn reset(&self) {
        self.transactions_planned.store(0, Ordering::Relaxed);
        self.instructions_planned.store(0, Ordering::Relaxed);
        self.remaining_accounts.store(0, Ordering::Relaxed);
        self.work_skipped.store(0, Ordering::Relaxed);
        self.plan_runs.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of crank metrics.
#[derive(Debug, Clone)]
pub struct CrankMetricsSnapshot {
    /// Total transactions planned.
    pub transactions_planned: u64,
    /// Total instructions planned.
    pub instructions_planned: u64,
    /// Total remaining accounts.
    pub remaining_accounts: u64,
    /// Skipped work items.
    pub work_skipped: u64,
    /// Planning runs.
    pub plan_runs: u64,
    /// Uptime.
    pub uptime: Duration,
    /// Mean instructions per transaction.
    pub instructions_per_transaction: f64,
}
