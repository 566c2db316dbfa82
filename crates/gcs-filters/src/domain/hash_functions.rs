//! Hash functions for GCS filters
//!
//! Items are hashed with SipHash-2-4 keyed by the 16-byte filter key, then
//! mapped into `[0, modulus)` with a multiply-and-shift reduction.
//!
//! Both halves must stay bit-for-bit stable: filters are persisted and
//! transmitted, and any other implementation sharing the key must arrive at
//! the same values.

use siphasher::sip::SipHasher24;
use std::hash::Hasher;

/// Filter key size in bytes
pub const KEY_SIZE: usize = 16;

/// 16-byte SipHash key
pub type FilterKey = [u8; KEY_SIZE];

/// Hash an item with SipHash-2-4 under the given key
///
/// The key is split into two little-endian 64-bit words `(k0, k1)`.
pub fn sip_hash(key: &FilterKey, item: &[u8]) -> u64 {
    let mut k0 = [0u8; 8];
    let mut k1 = [0u8; 8];
    k0.copy_from_slice(&key[..8]);
    k1.copy_from_slice(&key[8..]);

    let mut hasher = SipHasher24::new_with_keys(u64::from_le_bytes(k0), u64::from_le_bytes(k1));
    hasher.write(item);
    hasher.finish()
}

/// Map a 64-bit hash uniformly into `[0, modulus)`
///
/// Takes the high 64 bits of the 128-bit product, which avoids both the
/// division and the bias of `hash % modulus`. The mapping is monotonic in
/// `hash`, so sorted hashes reduce to a non-decreasing sequence.
#[inline]
pub fn reduce(hash: u64, modulus: u64) -> u64 {
    ((hash as u128 * modulus as u128) >> 64) as u64
}

/// Hash an item and reduce it into `[0, modulus)`
#[inline]
pub fn hash_to_range(key: &FilterKey, item: &[u8], modulus: u64) -> u64 {
    reduce(sip_hash(key, item), modulus)
}
