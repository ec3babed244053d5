//! # Bloomgate
//!
//! Probabilistic membership guard synchronized with an authoritative record
//! log.
//!
//! Answers "has this identifier been seen before?" in O(K) time, independent
//! of how many identifiers are stored, with a tunable one-sided error: false
//! positives are possible, false negatives are not. A typical deployment
//! puts it in front of an authoritative but slower check, e.g. rejecting
//! duplicate usernames during registration before the database is consulted.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `MembershipFilter`: fixed-size bit vector + deterministic multi-index
//!     hash scheme
//!   - `FilterConfig`: fixed (M, K) pair with validation and sizing-driven
//!     derivation
//!   - hash derivation and error-rate formulas
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipApi`: driving port (inbound API)
//!   - `RecordStore`: driven port (authoritative record medium)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `SyncedMembershipStore`: implements `MembershipApi`, keeps one filter
//!     consistent with one record log under a single lock
//!
//! - **Adapters Layer** (`adapters/`): Concrete record stores
//!   - `FlatFileRecordStore`: newline-delimited text file
//!   - `InMemoryRecordStore`: volatile store for tests/embedding
//!
//! ## Invariants
//!
//! - **No false negatives**: an inserted identifier is always reported
//!   present by the live filter.
//! - **Superset consistency**: after every completed operation the filter's
//!   positive answers cover the record log's current contents.
//! - **Deletion only by reconstruction**: a probed bit may be shared by
//!   several identifiers, so removal rebuilds the filter from the remaining
//!   records instead of clearing bits in place.
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bloomgate::{FilterConfig, FlatFileRecordStore, MembershipApi, SyncedMembershipStore};
//!
//! let records = Arc::new(FlatFileRecordStore::new("data/usernames.txt"));
//! let config = FilterConfig::for_capacity(100_000, 0.000_000_1)?;
//! let store = SyncedMembershipStore::open(records, config).await?;
//!
//! if store.contains("alice").await? {
//!     // probably taken - fall through to the exact check
//! } else {
//!     store.add("alice").await?;
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{FlatFileRecordStore, InMemoryRecordStore};
pub use domain::{FilterConfig, FilterParams, MembershipFilter};
pub use error::{MembershipError, RecordStoreError};
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::{MembershipApi, RecordStore};
pub use service::SyncedMembershipStore;
