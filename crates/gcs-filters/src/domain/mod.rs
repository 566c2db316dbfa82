//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Keyed hashing and range reduction
//! - Bit-level stream reader/writer
//! - Golomb-Rice codec
//! - GCS filter and its builder
//! - Configuration
//! - Entry encodings, wire varints and filter headers
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bitstream;
pub mod builder;
pub mod config;
pub mod entries;
pub mod gcs_filter;
pub mod golomb;
pub mod hash_functions;
pub mod header;
pub mod varint;

pub use bitstream::{BitReader, BitWriter};
pub use builder::GcsBuilder;
pub use config::{validate_p, GcsConfig, DEFAULT_P, MAX_P, MIN_P};
pub use entries::{Hash, OutPoint, OUTPOINT_SIZE};
pub use gcs_filter::GcsFilter;
pub use golomb::{GolombDecoder, GolombEncoder};
pub use hash_functions::{hash_to_range, reduce, sip_hash, FilterKey, KEY_SIZE};
pub use header::{double_sha256, filter_hash, make_header};
pub use varint::{read_varint, write_varint};
