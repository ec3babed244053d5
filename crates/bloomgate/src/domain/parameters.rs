//! Error-rate-driven filter sizing.
//!
//! Standard Bloom-filter formulas:
//! - m = -n*ln(fpr) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)           -- optimal probe count
//! - FPR = (1 - e^(-kn/m))^k     -- rate for given (m, n, k)

use std::f64::consts::LN_2;

/// A sized (M, K) pair with its expected error rate.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterParams {
    /// Number of bits in the filter (M).
    pub size_bits: usize,
    /// Number of probes per operation (K).
    pub hash_count: usize,
    /// Expected false positive rate with these parameters at capacity.
    pub expected_fpr: f64,
}

/// Calculate optimal filter parameters for an expected record count and a
/// target false positive rate.
pub fn calculate_optimal_parameters(expected_records: usize, target_fpr: f64) -> FilterParams {
    if expected_records == 0 {
        return FilterParams {
            size_bits: 1,
            hash_count: 1,
            expected_fpr: 1.0,
        };
    }

    let n = expected_records as f64;
    let ln2_squared = LN_2 * LN_2;

    let m = (-n * target_fpr.ln() / ln2_squared).ceil() as usize;

    let k = ((m as f64 / n) * LN_2).round() as usize;
    let k = k.clamp(1, 64);

    FilterParams {
        size_bits: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, expected_records, k),
    }
}

/// Calculate the false positive rate for given parameters.
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
