//! Hash derivation for the membership filter.
//!
//! Three independent 64-bit values are drawn from MurmurHash3 (x64_128, lower
//! half) with seeds 0, 1 and 2, then combined into K probe positions with an
//! enhanced double-hashing scheme:
//!
//! ```text
//! index(i) = (h1 + i*h2 + i*i*h3) mod M,   for i in 0..K
//! ```
//!
//! The quadratic term spreads probe sequences of different identifiers apart
//! when K is large relative to M, where plain double hashing `h1 + i*h2`
//! starts to cluster.
//!
//! CONTRACT: hash values are interpreted as unsigned 64-bit integers and the
//! polynomial is evaluated with wrapping (mod 2^64) arithmetic before the
//! final `mod M`, so every position lands in `[0, M)` on every platform.

use std::io::Cursor;

/// Hash an identifier with MurmurHash3 under the given seed.
pub fn murmur_hash(identifier: &str, seed: u32) -> u64 {
    let mut cursor = Cursor::new(identifier.as_bytes());

    // Use the murmur3 128-bit hash and take the lower 64 bits. Reading from
    // an in-memory cursor cannot fail.
    let hash = murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0);
    hash as u64
}

/// Derive the (h1, h2, h3) triple feeding the probe sequence.
pub fn derive_hash_triple(identifier: &str) -> (u64, u64, u64) {
    (
        murmur_hash(identifier, 0),
        murmur_hash(identifier, 1),
        murmur_hash(identifier, 2),
    )
}

/// Compute the K probe positions for an identifier in a filter of M bits.
pub fn probe_positions(identifier: &str, k: usize, m: usize) -> Vec<usize> {
    let (h1, h2, h3) = derive_hash_triple(identifier);

    (0..k as u64)
        .map(|i| {
            let mixed = h1
                .wrapping_add(i.wrapping_mul(h2))
                .wrapping_add(i.wrapping_mul(i).wrapping_mul(h3));
            (mixed % m as u64) as usize
        })
        .collect()
}
