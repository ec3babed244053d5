//! Outbound Ports (Driven Ports)
//!
//! Dependencies the membership engine needs from external components: the
//! authoritative record medium backing the probabilistic filter.

use async_trait::async_trait;

use crate::error::RecordStoreError;

/// Append-only log of known identifiers (driven port).
///
/// The log is the exact, authoritative set behind the filter's probabilistic
/// answers. Duplicates may accumulate in the raw log; consumers treat its
/// contents as a set.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read every record in original order.
    ///
    /// An absent or empty medium is NOT a failure; it yields an empty list.
    async fn read_all(&self) -> Result<Vec<String>, RecordStoreError>;

    /// Durably append one identifier to the end of the log.
    async fn append_one(&self, identifier: &str) -> Result<(), RecordStoreError>;

    /// Durably replace the whole log with `records`, preserving their order.
    ///
    /// All-or-nothing from the caller's perspective: on failure the previous
    /// contents remain intact, never a partially written log.
    async fn overwrite_all(&self, records: &[String]) -> Result<(), RecordStoreError>;
}
