//! Core membership filter.
//!
//! INVARIANTS:
//! - A bit set by `insert` is never cleared in place; forgetting an
//!   identifier happens only by constructing a fresh filter over the
//!   remaining records.
//! - No false negatives: once an identifier is inserted, `may_contain` MUST
//!   return true for it on the same instance.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::FilterConfig;
use super::hash_functions::probe_positions;
use super::parameters::calculate_fpr;

/// Fixed-size bit vector with a deterministic multi-index hash scheme.
///
/// Answers "has this identifier been seen?" with one-sided error: false
/// positives are possible, false negatives are not. The structure has no
/// knowledge of persistence; [`SyncedMembershipStore`] keeps it consistent
/// with the authoritative record log.
///
/// [`SyncedMembershipStore`]: crate::service::SyncedMembershipStore
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MembershipFilter {
    /// Bit array storing the filter state. Never resized after construction.
    #[serde(with = "bitvec_serde")]
    bits: BitVec<u8, Lsb0>,
    /// Size in bits (M).
    m: usize,
    /// Probes per operation (K).
    k: usize,
    /// Number of insert calls (diagnostics; repeat inserts count too).
    n: usize,
}

/// Serde support for BitVec
mod bitvec_serde {
    use bitvec::prelude::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bits: &BitVec<u8, Lsb0>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bytes: Vec<u8> = bits.as_raw_slice().to_vec();
        (bytes, bits.len()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BitVec<u8, Lsb0>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (bytes, len): (Vec<u8>, usize) = Deserialize::deserialize(deserializer)?;
        let mut bits = BitVec::<u8, Lsb0>::from_vec(bytes);
        bits.truncate(len);
        Ok(bits)
    }
}

impl MembershipFilter {
    /// Create an all-false filter with the given parameters.
    ///
    /// # Arguments
    /// * `m` - Size in bits
    /// * `k` - Probes per operation
    pub fn new(m: usize, k: usize) -> Self {
        Self {
            bits: bitvec![u8, Lsb0; 0; m],
            m,
            k,
            n: 0,
        }
    }

    /// Create an all-false filter from a validated configuration.
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.size_bits, config.hash_count)
    }

    /// Insert an identifier.
    ///
    /// Sets the K probed bits. Idempotent: inserting the same identifier
    /// again changes no bits. Always succeeds; after insertion,
    /// `may_contain` is guaranteed to return true.
    pub fn insert(&mut self, identifier: &str) {
        for pos in probe_positions(identifier, self.k, self.m) {
            self.bits.set(pos, true);
        }
        self.n += 1;
    }

    /// Test whether an identifier might have been inserted.
    ///
    /// Returns:
    /// - `true` if the identifier might be present (could be a false positive)
    /// - `false` if it is definitely absent (never a false negative)
    ///
    /// A pure conjunction over the K probed bits; `all` short-circuits on the
    /// first false bit, and the result is order-independent.
    pub fn may_contain(&self, identifier: &str) -> bool {
        probe_positions(identifier, self.k, self.m)
            .iter()
            .all(|&pos| self.bits[pos])
    }

    /// Estimate the current false positive rate from insert count.
    pub fn false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.n, self.k)
    }

    /// Number of bits currently set.
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Filter size in bits (M).
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Probes per operation (K).
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Number of insert calls so far.
    pub fn inserted_count(&self) -> usize {
        self.n
    }

    /// Serialize the filter to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).unwrap_or_default()
    }

    /// Deserialize a filter from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        bincode::deserialize(bytes).map_err(|e| e.to_string())
    }
}
