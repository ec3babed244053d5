//! Service Layer - Orchestration
//!
//! `SyncedMembershipStore` implements the `MembershipApi` port over one
//! filter and one injected `RecordStore`.

pub mod membership_store;

pub use membership_store::SyncedMembershipStore;
