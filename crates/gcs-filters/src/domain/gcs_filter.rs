//! # GCS Filters (Golomb-Coded Sets)
//!
//! Immutable, compact set-membership filters for light clients.
//!
//! ## Layout
//!
//! A filter stores `n` sorted values from `[0, n * 2^p)`, delta-encoded with
//! Golomb-Rice parameter `p`. Only the bitstream and `n` travel on the wire;
//! `p` is agreed out of band.
//!
//! ## Matching
//!
//! Because the encoded values are non-decreasing, a query decodes the stream
//! once, front to back, and stops as soon as it passes the target. Multi-item
//! queries sort their targets and merge against the stream in one pass.
//!
//! INVARIANTS:
//! - Decoded values never decrease
//! - No false negatives: every built entry matches under the build key
//! - Corrupt streams surface as `MalformedBitstream`, never as "no match"

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::config::validate_p;
use super::golomb::GolombDecoder;
use super::hash_functions::{hash_to_range, FilterKey};
use super::varint::{read_varint, write_varint};
use crate::error::{GcsError, Result};

/// Golomb-Coded Set filter
///
/// Read-only once constructed, so it can be shared across threads and
/// queried concurrently without locking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFilter", into = "RawFilter")]
pub struct GcsFilter {
    /// Number of encoded values
    n: u32,
    /// Rice parameter
    p: u8,
    /// Reduction range, `n << p`
    modulus: u64,
    /// Rice-coded bitstream, zero-padded to a byte boundary
    data: Vec<u8>,
}

/// Serialized form; `modulus` is recomputed on the way back in
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawFilter {
    n: u32,
    p: u8,
    data: Vec<u8>,
}

impl TryFrom<RawFilter> for GcsFilter {
    type Error = GcsError;

    fn try_from(raw: RawFilter) -> Result<Self> {
        GcsFilter::from_bytes(raw.n, raw.p, raw.data)
    }
}

impl From<GcsFilter> for RawFilter {
    fn from(filter: GcsFilter) -> Self {
        Self {
            n: filter.n,
            p: filter.p,
            data: filter.data,
        }
    }
}

impl GcsFilter {
    /// Construct from already validated parts
    pub(crate) fn from_parts(n: u32, p: u8, data: Vec<u8>) -> Self {
        Self {
            n,
            p,
            modulus: (n as u64) << p,
            data,
        }
    }

    /// Rebuild a filter from its item count, Rice parameter and bitstream
    ///
    /// Fails if `p` is outside `[1, 32]`. The bitstream itself is checked
    /// lazily when it is decoded.
    pub fn from_bytes(n: u32, p: u8, data: Vec<u8>) -> Result<Self> {
        validate_p(p)?;
        Ok(Self::from_parts(n, p, data))
    }

    /// Rebuild a filter from its wire form: CompactSize `n`, then the bitstream
    pub fn from_n_bytes(p: u8, bytes: &[u8]) -> Result<Self> {
        let (n, consumed) = read_varint(bytes)?;
        let n = u32::try_from(n)
            .map_err(|_| GcsError::InvalidVarInt(format!("item count {} exceeds u32", n)))?;
        Self::from_bytes(n, p, bytes[consumed..].to_vec())
    }

    /// Number of encoded values
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Rice parameter
    pub fn p(&self) -> u8 {
        self.p
    }

    /// Reduction range used for hashing queries
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Raw Rice-coded bitstream
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Wire form: CompactSize `n` followed by the bitstream
    pub fn n_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(9 + self.data.len());
        write_varint(&mut out, self.n as u64);
        out.extend_from_slice(&self.data);
        out
    }

    /// Size of the bitstream in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Expected false positive rate per probe (`2^-p`)
    pub fn false_positive_rate(&self) -> f64 {
        (-(self.p as f64)).exp2()
    }

    /// Iterate over the decoded values in ascending order
    ///
    /// A value outside `[0, modulus)` cannot come from a valid filter and is
    /// reported as `MalformedBitstream`.
    pub fn values(&self) -> GolombDecoder<'_> {
        GolombDecoder::new(&self.data, self.n, self.p).with_limit(self.modulus)
    }

    /// Decode every value in the filter
    pub fn decode_values(&self) -> Result<Vec<u64>> {
        self.values().collect()
    }

    /// Test whether `item` may be in the set
    ///
    /// Returns `Ok(false)` if the item is definitely absent and `Ok(true)` if
    /// it is present or is a false positive.
    pub fn matches(&self, key: &FilterKey, item: &[u8]) -> Result<bool> {
        if self.n == 0 {
            return Ok(false);
        }

        let target = hash_to_range(key, item, self.modulus);

        for value in self.values() {
            let value = value.map_err(|e| self.log_corruption(e))?;
            if value == target {
                trace!(target_value = target, "GCS match");
                return Ok(true);
            }
            if value > target {
                break;
            }
        }

        trace!(target_value = target, "GCS no match");
        Ok(false)
    }

    /// Test whether any of `items` may be in the set
    ///
    /// Equivalent to `matches` on each item, but decodes the stream once.
    pub fn match_any<T: AsRef<[u8]>>(&self, key: &FilterKey, items: &[T]) -> Result<bool> {
        if self.n == 0 || items.is_empty() {
            return Ok(false);
        }

        let mut targets: Vec<u64> = items
            .iter()
            .map(|item| hash_to_range(key, item.as_ref(), self.modulus))
            .collect();
        targets.sort_unstable();
        targets.dedup();

        let mut targets = targets.into_iter();
        let Some(mut target) = targets.next() else {
            return Ok(false);
        };

        for value in self.values() {
            let value = value.map_err(|e| self.log_corruption(e))?;
            while target < value {
                match targets.next() {
                    Some(next) => target = next,
                    None => return Ok(false),
                }
            }
            if target == value {
                trace!(queries = items.len(), "GCS match_any hit");
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn log_corruption(&self, err: GcsError) -> GcsError {
        warn!(n = self.n, p = self.p, bytes = self.data.len(), error = %err, "corrupt GCS filter");
        err
    }
}
