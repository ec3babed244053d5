//! Filter configuration.
//!
//! M (bit capacity) and K (probe count) are fixed for the life of a store
//! instance; changing them means rebuilding into a new instance. They are
//! either supplied directly or derived from an expected record count and a
//! target false positive rate.

use serde::{Deserialize, Serialize};

use super::parameters::calculate_optimal_parameters;
use crate::error::MembershipError;

/// Fixed (M, K) pair for one filter instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Total bit count (M).
    pub size_bits: usize,
    /// Probes per operation (K).
    pub hash_count: usize,
}

impl FilterConfig {
    /// Create a configuration with validation.
    pub fn new(size_bits: usize, hash_count: usize) -> Result<Self, MembershipError> {
        let config = Self {
            size_bits,
            hash_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Derive (M, K) from an expected record count and target false positive
    /// rate using the standard sizing formulas.
    pub fn for_capacity(
        expected_records: usize,
        target_fpr: f64,
    ) -> Result<Self, MembershipError> {
        if expected_records == 0 {
            return Err(MembershipError::InvalidParameters(
                "expected_records must be positive".to_string(),
            ));
        }
        if target_fpr <= 0.0 || target_fpr >= 1.0 {
            return Err(MembershipError::InvalidParameters(format!(
                "target_fpr must be in (0, 1), got {}",
                target_fpr
            )));
        }

        let params = calculate_optimal_parameters(expected_records, target_fpr);
        Self::new(params.size_bits, params.hash_count)
    }

    /// Validate the pair.
    pub fn validate(&self) -> Result<(), MembershipError> {
        if self.size_bits == 0 {
            return Err(MembershipError::InvalidParameters(
                "size_bits must be positive".to_string(),
            ));
        }
        if self.hash_count == 0 {
            return Err(MembershipError::InvalidParameters(
                "hash_count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
