//! Byte encodings of common filter entries
//!
//! The filter itself treats every entry as an opaque byte string. These
//! helpers fix the encodings used by block filter assemblers so that
//! independently built filters agree.

use serde::{Deserialize, Serialize};

/// 32-byte hash (block hash, transaction hash)
pub type Hash = [u8; 32];

/// Serialized outpoint size: 32-byte hash plus 4-byte index
pub const OUTPOINT_SIZE: usize = 36;

/// Reference to a transaction output
#[derive(Clone, Copy, Debug, PartialEq, Eq, std::hash::Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Hash of the transaction holding the output
    pub hash: Hash,
    /// Output index within that transaction
    pub index: u32,
}

impl OutPoint {
    /// Outpoint for output `index` of transaction `hash`
    pub fn new(hash: Hash, index: u32) -> Self {
        Self { hash, index }
    }

    /// Entry bytes: `hash || index` with the index little-endian
    pub fn to_bytes(&self) -> [u8; OUTPOINT_SIZE] {
        let mut bytes = [0u8; OUTPOINT_SIZE];
        bytes[..32].copy_from_slice(&self.hash);
        bytes[32..].copy_from_slice(&self.index.to_le_bytes());
        bytes
    }
}
