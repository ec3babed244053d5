//! Inbound Ports (Driving Ports)
//!
//! The API that external components (e.g. a network-facing registration
//! handler) use to interact with the membership engine.

use async_trait::async_trait;

use crate::error::MembershipError;

/// Primary membership API (driving port).
///
/// Every operation validates that the identifier is non-blank before
/// touching any state, and every mutation is serialized against reads so the
/// filter and the record log are never observed mismatched.
#[async_trait]
pub trait MembershipApi: Send + Sync {
    /// Probabilistic membership test.
    ///
    /// Returns `true` if the identifier has probably been seen (false
    /// positives possible), `false` if it definitely has not. Pure read.
    async fn contains(&self, identifier: &str) -> Result<bool, MembershipError>;

    /// Record an identifier as seen.
    ///
    /// The in-memory filter is updated first, so a check immediately after
    /// `add` returns sees the identifier; the durable append follows. If the
    /// append fails the error is surfaced but the filter mutation is NOT
    /// rolled back (filters cannot un-insert) - see
    /// [`SyncedMembershipStore`](crate::service::SyncedMembershipStore).
    async fn add(&self, identifier: &str) -> Result<(), MembershipError>;

    /// Remove an identifier from the authoritative log and reconstruct the
    /// filter over the remaining records.
    ///
    /// Returns whether a removal actually occurred, so callers can tell
    /// "deleted" from "was never there". Removing an absent identifier is a
    /// normal `false`, not an error.
    async fn remove(&self, identifier: &str) -> Result<bool, MembershipError>;

    /// Rebuild the filter from the full current record log.
    ///
    /// The only way to shed stale positive bits, e.g. after a failed durable
    /// append left the filter ahead of the log.
    async fn rebuild(&self) -> Result<(), MembershipError>;
}
