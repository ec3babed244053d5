//! Synced membership store.
//!
//! Orchestrates one [`MembershipFilter`] and one authoritative
//! [`RecordStore`] so that the filter's positive answers always cover the
//! log's current contents.
//!
//! INVARIANTS:
//! - After a successful `add(x)`: the filter reports x present AND the log
//!   contains x.
//! - After a successful `remove(x)`: the log no longer contains x and the
//!   filter is a fresh reconstruction over the remaining records only.
//! - Mutations hold the write guard across both the filter change and the
//!   record I/O, so filter and log are never observed mismatched.
//!
//! The one tolerated divergence: `add` updates the filter before the durable
//! append, so a failed append leaves the filter ahead of the log. The filter
//! cannot un-insert, so the error is surfaced without rollback, logged, and
//! counted; `rebuild` resynchronizes.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::domain::{FilterConfig, MembershipFilter};
use crate::error::MembershipError;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::ports::{MembershipApi, RecordStore};

/// Probabilistic membership engine synchronized with an authoritative
/// record log.
///
/// Callers never touch the filter directly; every operation goes through
/// this store, which keeps the filter and the injected [`RecordStore`]
/// consistent under a single lock.
pub struct SyncedMembershipStore<S: RecordStore> {
    /// Authoritative record log (driven port).
    records: Arc<S>,
    /// Fixed (M, K) pair; changing it requires opening a new store.
    config: FilterConfig,
    /// The filter, mutated in place on `add` and replaced wholesale on
    /// `remove`/`rebuild` while the write guard is held.
    filter: RwLock<MembershipFilter>,
    /// Operation counters.
    metrics: Metrics,
}

/// Build a fresh filter over a record list.
fn build_filter(config: &FilterConfig, records: &[String]) -> MembershipFilter {
    let mut filter = MembershipFilter::from_config(config);
    for record in records {
        filter.insert(record);
    }
    filter
}

impl<S: RecordStore> SyncedMembershipStore<S> {
    /// Open a store over an existing record log.
    ///
    /// Performs the initial rebuild: reads the full log (absent or empty
    /// media yield an empty list, not an error) and constructs the filter
    /// over it. The returned store is ready for every operation.
    pub async fn open(records: Arc<S>, config: FilterConfig) -> Result<Self, MembershipError> {
        config.validate()?;

        let existing = records.read_all().await?;
        let filter = build_filter(&config, &existing);

        info!(
            records = existing.len(),
            size_bits = config.size_bits,
            hash_count = config.hash_count,
            estimated_fpr = filter.false_positive_rate(),
            "membership store ready"
        );

        Ok(Self {
            records,
            config,
            filter: RwLock::new(filter),
            metrics: Metrics::new(),
        })
    }

    /// The fixed configuration this store was opened with.
    pub fn config(&self) -> FilterConfig {
        self.config
    }

    /// Point-in-time operation counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Trim the identifier and reject blank input before any state change.
    fn normalize(identifier: &str) -> Result<&str, MembershipError> {
        let trimmed = identifier.trim();
        if trimmed.is_empty() {
            return Err(MembershipError::InvalidInput);
        }
        Ok(trimmed)
    }
}

#[async_trait]
impl<S: RecordStore + 'static> MembershipApi for SyncedMembershipStore<S> {
    async fn contains(&self, identifier: &str) -> Result<bool, MembershipError> {
        let identifier = Self::normalize(identifier)?;

        let filter = self.filter.read().await;
        let present = filter.may_contain(identifier);
        drop(filter);

        self.metrics.record_check(present);
        debug!(identifier, present, "membership check");
        Ok(present)
    }

    async fn add(&self, identifier: &str) -> Result<(), MembershipError> {
        let identifier = Self::normalize(identifier)?;

        let mut filter = self.filter.write().await;

        // Filter first: a check immediately after `add` returns must see the
        // identifier. The append below may still fail, leaving the filter
        // ahead of the log; that divergence is surfaced, not hidden.
        filter.insert(identifier);

        if let Err(e) = self.records.append_one(identifier).await {
            self.metrics.record_append_failure();
            error!(
                identifier,
                error = %e,
                "durable append failed after filter insert; filter retains the identifier until the next rebuild"
            );
            return Err(e.into());
        }

        self.metrics.record_add();
        debug!(identifier, "identifier recorded");
        Ok(())
    }

    async fn remove(&self, identifier: &str) -> Result<bool, MembershipError> {
        let identifier = Self::normalize(identifier)?;

        let mut filter = self.filter.write().await;

        let all = self.records.read_all().await?;
        let kept: Vec<String> = all
            .iter()
            .filter(|record| record.as_str() != identifier)
            .cloned()
            .collect();

        if kept.len() == all.len() {
            debug!(identifier, "remove requested for unknown identifier");
            return Ok(false);
        }

        // Commit the rewrite before touching the filter. If it fails, both
        // the medium and the filter are still in their pre-operation state,
        // and a rebuild here would only replay stale data.
        self.records.overwrite_all(&kept).await?;

        // Reconstruct rather than clear bits: a probed bit may be shared
        // with still-present identifiers, and clearing it would introduce
        // false negatives.
        *filter = build_filter(&self.config, &kept);

        self.metrics.record_removal();
        self.metrics.record_rebuild();
        info!(
            identifier,
            remaining = kept.len(),
            "identifier removed; filter reconstructed"
        );
        Ok(true)
    }

    async fn rebuild(&self) -> Result<(), MembershipError> {
        let mut filter = self.filter.write().await;

        let records = self.records.read_all().await?;
        *filter = build_filter(&self.config, &records);

        self.metrics.record_rebuild();
        info!(
            records = records.len(),
            estimated_fpr = filter.false_positive_rate(),
            "filter rebuilt from record log"
        );
        Ok(())
    }
}
