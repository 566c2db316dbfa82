//! # GCS Filters
//!
//! Golomb-Coded Set filters for light-client block filtering.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `sip_hash` / `reduce`: keyed SipHash-2-4 and multiply-shift range reduction
//!   - `BitWriter` / `BitReader`: unaligned bit stream
//!   - `GolombEncoder` / `GolombDecoder`: Rice coding of sorted deltas
//!   - `GcsFilter`: immutable, queryable filter
//!   - `GcsBuilder`: accumulates entries and a key, produces filters
//!   - `GcsConfig`: Rice parameter configuration
//!   - `filter_hash` / `make_header`: filter commitments and header chain
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: Encoded values are non-decreasing, so matching is a
//!   single forward pass
//! - **INVARIANT-2**: No false negatives - every built entry matches
//! - **INVARIANT-3**: Building is deterministic - same key, entries and `p`
//!   give byte-identical filters
//! - False positive rate per probe is about `2^-p`
//!
//! ## Usage Example
//!
//! ```
//! use gcs_filters::{GcsBuilder, GcsFilter};
//!
//! let block_hash = [0x4c; 32];
//! let mut builder = GcsBuilder::with_key_hash(&block_hash);
//! builder.add_entry(b"Alex").add_entry(b"Bob");
//!
//! let key = builder.key()?;
//! let filter = builder.build()?;
//!
//! // Ship `n_bytes()` to a client, which knows `p` out of band
//! let wire = filter.n_bytes();
//! let received = GcsFilter::from_n_bytes(filter.p(), &wire)?;
//!
//! assert!(received.matches(&key, b"Alex")?);
//! assert!(received.match_any(&key, &[&b"Carol"[..], &b"Bob"[..]])?);
//! # Ok::<(), gcs_filters::GcsError>(())
//! ```

pub mod domain;
pub mod error;

// Re-exports for convenience
pub use domain::{
    filter_hash, make_header, FilterKey, GcsBuilder, GcsConfig, GcsFilter, Hash, OutPoint,
    DEFAULT_P, KEY_SIZE, MAX_P,
};
pub use error::{GcsError, Result};
