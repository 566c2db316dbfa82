//! Filter hashes and header chain (BIP 157 style)
//!
//! A filter hash commits to the wire form of one filter. Headers chain those
//! commitments so a client can check a downloaded filter against a single
//! trusted header.
//!
//! - `filter_hash = SHA256d(n_bytes)`
//! - `header = SHA256d(filter_hash || prev_header)`

use sha2::{Digest, Sha256};

use super::entries::Hash;
use super::gcs_filter::GcsFilter;

/// Double SHA-256
pub fn double_sha256(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Hash of a filter's wire form
pub fn filter_hash(filter: &GcsFilter) -> Hash {
    double_sha256(&filter.n_bytes())
}

/// Header for `filter`, chained onto `prev_header`
pub fn make_header(filter: &GcsFilter, prev_header: &Hash) -> Hash {
    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(&filter_hash(filter));
    preimage[32..].copy_from_slice(prev_header);
    double_sha256(&preimage)
}
