//! CompactSize variable-length integers
//!
//! | Value range | Encoding |
//! |-------------|----------|
//! | `< 0xFD` | 1 byte |
//! | `<= 0xFFFF` | `0xFD` + u16 LE |
//! | `<= 0xFFFF_FFFF` | `0xFE` + u32 LE |
//! | larger | `0xFF` + u64 LE |
//!
//! Decoding rejects non-canonical forms, so every value has exactly one
//! encoding and serialized filters hash deterministically.

use crate::error::{GcsError, Result};

/// Append the CompactSize encoding of `value` to `out`
pub fn write_varint(out: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xFC => out.push(value as u8),
        0xFD..=0xFFFF => {
            out.push(0xFD);
            out.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xFFFF_FFFF => {
            out.push(0xFE);
            out.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            out.push(0xFF);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}

/// Decode a CompactSize integer from the front of `bytes`
///
/// Returns the value and the number of bytes consumed.
pub fn read_varint(bytes: &[u8]) -> Result<(u64, usize)> {
    let (&discriminant, rest) = bytes
        .split_first()
        .ok_or_else(|| GcsError::InvalidVarInt("empty input".to_string()))?;

    let (value, width, min) = match discriminant {
        0xFD => (read_le(rest, 2)?, 2, 0xFD),
        0xFE => (read_le(rest, 4)?, 4, 0x1_0000),
        0xFF => (read_le(rest, 8)?, 8, 0x1_0000_0000),
        small => return Ok((small as u64, 1)),
    };

    if value < min {
        return Err(GcsError::InvalidVarInt(format!(
            "non-canonical encoding of {}",
            value
        )));
    }

    Ok((value, 1 + width))
}

fn read_le(bytes: &[u8], width: usize) -> Result<u64> {
    let raw = bytes.get(..width).ok_or_else(|| {
        GcsError::InvalidVarInt(format!(
            "need {} bytes, only {} available",
            width,
            bytes.len()
        ))
    })?;

    let mut buf = [0u8; 8];
    buf[..width].copy_from_slice(raw);
    Ok(u64::from_le_bytes(buf))
}
