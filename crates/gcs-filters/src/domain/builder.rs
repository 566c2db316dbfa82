//! GCS filter builder
//!
//! Accumulates raw entries and a key, then produces an immutable
//! [`GcsFilter`].
//!
//! Setters return `&mut Self` and never fail on the spot. The first invalid
//! input (bad key length, out-of-range `p`) is recorded, later setters become
//! no-ops, and [`GcsBuilder::key`] and [`GcsBuilder::build`] return the
//! recorded error. A whole chain can therefore be checked once at the end.
//!
//! # Example
//!
//! ```
//! use gcs_filters::domain::GcsBuilder;
//!
//! let key = [0u8; 16];
//! let filter = GcsBuilder::with_key(key)
//!     .set_p(20)
//!     .add_entries([&b"Alex"[..], &b"Bob"[..], &b"Charlie"[..]])
//!     .build()
//!     .expect("valid builder");
//!
//! assert_eq!(filter.n(), 3);
//! assert!(filter.matches(&key, b"Alex").unwrap());
//! ```

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;

use super::config::{validate_p, GcsConfig, DEFAULT_P};
use super::entries::{Hash, OutPoint};
use super::gcs_filter::GcsFilter;
use super::golomb::GolombEncoder;
use super::hash_functions::{reduce, sip_hash, FilterKey, KEY_SIZE};
use crate::error::{GcsError, Result};

/// Builder for [`GcsFilter`]
///
/// Single owner; `build` borrows immutably and may be called repeatedly.
#[derive(Clone, Debug)]
pub struct GcsBuilder {
    p: u8,
    key: Option<FilterKey>,
    entries: Vec<Vec<u8>>,
    err: Option<GcsError>,
}

impl Default for GcsBuilder {
    fn default() -> Self {
        Self {
            p: DEFAULT_P,
            key: None,
            entries: Vec::new(),
            err: None,
        }
    }
}

impl GcsBuilder {
    /// Create a builder with the default `p` and no key
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder seeded from a configuration
    pub fn from_config(config: &GcsConfig) -> Self {
        let mut builder = Self::new();
        builder.set_p(config.p);
        builder
    }

    /// Create a builder with an explicit key
    pub fn with_key(key: FilterKey) -> Self {
        let mut builder = Self::new();
        builder.set_key(key);
        builder
    }

    /// Create a builder with an explicit key and Rice parameter
    pub fn with_key_p(key: FilterKey, p: u8) -> Self {
        let mut builder = Self::with_key(key);
        builder.set_p(p);
        builder
    }

    /// Create a builder from a key slice, which must be exactly 16 bytes
    pub fn with_key_slice(key: &[u8]) -> Self {
        let mut builder = Self::new();
        builder.set_key_slice(key);
        builder
    }

    /// Create a builder keyed by the first 16 bytes of a hash
    pub fn with_key_hash(hash: &Hash) -> Self {
        let mut builder = Self::new();
        builder.set_key_from_hash(hash);
        builder
    }

    /// Create a builder keyed by a hash, with an explicit Rice parameter
    pub fn with_key_hash_p(hash: &Hash, p: u8) -> Self {
        let mut builder = Self::with_key_hash(hash);
        builder.set_p(p);
        builder
    }

    /// Create a builder with a key drawn from the operating system RNG
    pub fn with_random_key() -> Self {
        Self::with_rng(&mut OsRng)
    }

    /// Create a builder with a random key and an explicit Rice parameter
    pub fn with_random_key_p(p: u8) -> Self {
        let mut builder = Self::with_random_key();
        builder.set_p(p);
        builder
    }

    /// Create a builder with a key drawn from the given RNG
    pub fn with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut builder = Self::new();
        builder.set_random_key(rng);
        builder
    }

    fn record(&mut self, err: GcsError) {
        if self.err.is_none() {
            self.err = Some(err);
        }
    }

    /// Set the Rice parameter
    pub fn set_p(&mut self, p: u8) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        match validate_p(p) {
            Ok(()) => self.p = p,
            Err(e) => self.record(e),
        }
        self
    }

    /// Use an explicit key
    pub fn set_key(&mut self, key: FilterKey) -> &mut Self {
        if self.err.is_none() {
            self.key = Some(key);
        }
        self
    }

    /// Use a key given as a slice; anything but 16 bytes is an error
    pub fn set_key_slice(&mut self, key: &[u8]) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        match FilterKey::try_from(key) {
            Ok(key) => self.key = Some(key),
            Err(_) => self.record(GcsError::InvalidKeyLength { len: key.len() }),
        }
        self
    }

    /// Use the first 16 bytes of a hash as the key
    ///
    /// The hash should come from a cryptographic hash function; a
    /// low-entropy value weakens the filter.
    pub fn set_key_from_hash(&mut self, hash: &Hash) -> &mut Self {
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&hash[..KEY_SIZE]);
        self.set_key(key)
    }

    /// Draw a fresh key from `rng`
    pub fn set_random_key<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> &mut Self {
        let mut key = [0u8; KEY_SIZE];
        rng.fill_bytes(&mut key);
        self.set_key(key)
    }

    /// Add one raw entry
    pub fn add_entry(&mut self, entry: &[u8]) -> &mut Self {
        if self.err.is_none() {
            self.entries.push(entry.to_vec());
        }
        self
    }

    /// Add many raw entries
    pub fn add_entries<I, T>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        if self.err.is_none() {
            self.entries
                .extend(entries.into_iter().map(|entry| entry.as_ref().to_vec()));
        }
        self
    }

    /// Add a 32-byte hash as an entry
    pub fn add_hash(&mut self, hash: &Hash) -> &mut Self {
        self.add_entry(hash)
    }

    /// Add an outpoint, encoded as `hash || index (LE)`
    pub fn add_outpoint(&mut self, outpoint: &OutPoint) -> &mut Self {
        self.add_entry(&outpoint.to_bytes())
    }

    /// The key the filter will be built with, or the recorded error
    pub fn key(&self) -> Result<FilterKey> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }
        self.key.ok_or(GcsError::MissingKey)
    }

    /// Current Rice parameter
    pub fn p(&self) -> u8 {
        self.p
    }

    /// Number of raw entries added, duplicates included
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Build the filter
    ///
    /// Entries are hashed, exact 64-bit duplicates dropped, and the sorted
    /// hashes reduced into `[0, n << p)`. Reduction is monotonic, so the
    /// reduced sequence stays non-decreasing; values that collide after
    /// reduction are kept and encode as zero deltas.
    pub fn build(&self) -> Result<GcsFilter> {
        let key = self.key()?;

        let mut hashes: Vec<u64> = self
            .entries
            .iter()
            .map(|entry| sip_hash(&key, entry))
            .collect();
        hashes.sort_unstable();
        hashes.dedup();

        let n = u32::try_from(hashes.len()).map_err(|_| GcsError::TooManyEntries {
            count: hashes.len(),
        })?;
        let modulus = (n as u64) << self.p;

        let mut encoder = GolombEncoder::new(self.p, hashes.len());
        for hash in hashes {
            encoder.push(reduce(hash, modulus));
        }
        let data = encoder.finish();

        debug!(
            n,
            p = self.p,
            entries = self.entries.len(),
            bytes = data.len(),
            "built GCS filter"
        );

        Ok(GcsFilter::from_parts(n, self.p, data))
    }
}
