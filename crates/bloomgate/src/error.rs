//! Error types for the membership guard.

use thiserror::Error;

/// Errors surfaced by the driven record-store port.
///
/// An absent or empty backing medium is NOT an error; `read_all` reports it
/// as an empty record list.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("record medium could not be read: {0}")]
    ReadFailed(String),

    #[error("record medium could not be written: {0}")]
    WriteFailed(String),
}

/// Errors surfaced by the membership API.
///
/// There is no `NotFound` variant: removing an identifier that was never
/// added is a normal `false` result, not a failure.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// The identifier was empty or whitespace-only. Rejected before any
    /// state is touched.
    #[error("identifier must not be blank")]
    InvalidInput,

    /// The authoritative record medium could not be read or written.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] RecordStoreError),

    /// Filter parameters failed validation.
    #[error("invalid filter parameters: {0}")]
    InvalidParameters(String),
}
