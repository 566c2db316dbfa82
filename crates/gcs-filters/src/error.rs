//! Error types for the GCS filter crate

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GcsError>;

/// Errors that can occur while building, decoding or matching a filter
///
/// `Clone` so that a builder can hand the same deferred error back from
/// every terminal call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GcsError {
    #[error("Rice parameter too large: {p} > 32")]
    ParameterTooLarge { p: u8 },

    #[error("Rice parameter too small: {p} < 1")]
    ParameterTooSmall { p: u8 },

    #[error("Invalid key length: {len} (must be 16 bytes)")]
    InvalidKeyLength { len: usize },

    #[error("No key set for filter")]
    MissingKey,

    #[error("Malformed bitstream: {0}")]
    MalformedBitstream(String),

    #[error("Too many distinct entries: {count} exceeds u32::MAX")]
    TooManyEntries { count: usize },

    #[error("Invalid varint: {0}")]
    InvalidVarInt(String),
}
