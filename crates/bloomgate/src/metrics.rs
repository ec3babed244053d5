//! Metrics for membership operations.
//!
//! Thread-safe counters for monitoring check traffic, mutation volume, and
//! the one divergence the design tolerates: a filter insert whose durable
//! append failed. A non-zero `append_failures` count is the operator signal
//! to trigger a rebuild.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for one membership store.
#[derive(Default)]
pub struct Metrics {
    /// Total membership checks performed.
    pub checks_performed: AtomicU64,
    /// Checks that answered "probably present".
    pub checks_positive: AtomicU64,
    /// Identifiers added (filter insert + durable append both succeeded).
    pub identifiers_added: AtomicU64,
    /// Removals that actually deleted a record.
    pub removals_performed: AtomicU64,
    /// Full filter reconstructions (explicit rebuilds and remove-triggered).
    pub rebuilds_performed: AtomicU64,
    /// Filter inserts whose durable append failed (filter ahead of the log).
    pub append_failures: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a membership check and its answer.
    pub fn record_check(&self, found: bool) {
        self.checks_performed.fetch_add(1, Ordering::Relaxed);
        if found {
            self.checks_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a fully successful add.
    pub fn record_add(&self) {
        self.identifiers_added.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a removal that deleted a record.
    pub fn record_removal(&self) {
        self.removals_performed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a full filter reconstruction.
    pub fn record_rebuild(&self) {
        self.rebuilds_performed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a filter insert whose durable append failed.
    pub fn record_append_failure(&self) {
        self.append_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Ratio of positive answers to total checks.
    ///
    /// Includes both true and false positives; a drift well above the
    /// configured rate suggests the filter is overfull for its (M, K).
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.checks_performed.load(Ordering::Relaxed);
        let positive = self.checks_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Get a point-in-time snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            checks_performed: self.checks_performed.load(Ordering::Relaxed),
            checks_positive: self.checks_positive.load(Ordering::Relaxed),
            identifiers_added: self.identifiers_added.load(Ordering::Relaxed),
            removals_performed: self.removals_performed.load(Ordering::Relaxed),
            rebuilds_performed: self.rebuilds_performed.load(Ordering::Relaxed),
            append_failures: self.append_failures.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.checks_performed.store(0, Ordering::Relaxed);
        self.checks_positive.store(0, Ordering::Relaxed);
        self.identifiers_added.store(0, Ordering::Relaxed);
        self.removals_performed.store(0, Ordering::Relaxed);
        self.rebuilds_performed.store(0, Ordering::Relaxed);
        self.append_failures.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub checks_performed: u64,
    pub checks_positive: u64,
    pub identifiers_added: u64,
    pub removals_performed: u64,
    pub rebuilds_performed: u64,
    pub append_failures: u64,
}
