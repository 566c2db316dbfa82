//! Bit-level writer and reader
//!
//! Bits are packed most-significant first within each byte, so the
//! serialized stream reads left to right. The writer's output is padded with
//! zero bits up to the next byte boundary.

use bitvec::prelude::*;

use crate::error::{GcsError, Result};

/// Append-only bit writer backed by a `BitVec`
#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(bits),
        }
    }

    /// Append a single bit
    pub fn write_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append `count` one-bits
    pub fn write_ones(&mut self, count: usize) {
        let len = self.bits.len();
        self.bits.resize(len + count, true);
    }

    /// Append the low `width` bits of `value`, most significant first
    ///
    /// Widths above 64 are zero-extended.
    pub fn write_bits(&mut self, value: u64, width: u8) {
        if width == 0 {
            return;
        }
        if width > 64 {
            let len = self.bits.len();
            self.bits.resize(len + (width - 64) as usize, false);
            return self.write_bits(value, 64);
        }

        let masked = if width == 64 {
            value
        } else {
            value & ((1u64 << width) - 1)
        };

        let start = self.bits.len();
        self.bits.resize(start + width as usize, false);
        self.bits[start..].store_be(masked);
    }

    /// Number of bits written so far
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Finish writing, zero-padding to a byte boundary
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.bits.set_uninitialized(false);
        self.bits.into_vec()
    }
}

/// Sequential bit reader over a byte slice
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Start reading at the first bit of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            bits: data.view_bits::<Msb0>(),
            pos: 0,
        }
    }

    /// Read one bit
    pub fn read_bit(&mut self) -> Result<bool> {
        let bit = self.bits.get(self.pos).map(|bit| *bit).ok_or_else(|| {
            GcsError::MalformedBitstream(format!("read past end of stream at bit {}", self.pos))
        })?;
        self.pos += 1;
        Ok(bit)
    }

    /// Read a run of one-bits and its terminating zero, returning the run length
    pub fn read_unary(&mut self) -> Result<u64> {
        match self.bits[self.pos..].first_zero() {
            Some(ones) => {
                self.pos += ones + 1;
                Ok(ones as u64)
            }
            None => Err(GcsError::MalformedBitstream(format!(
                "unterminated unary run starting at bit {}",
                self.pos
            ))),
        }
    }

    /// Read `width` bits as a big-endian unsigned integer
    ///
    /// Fails if `width` exceeds 64 or runs past the end of the stream.
    pub fn read_bits(&mut self, width: u8) -> Result<u64> {
        if width == 0 {
            return Ok(0);
        }
        if width > 64 {
            return Err(GcsError::MalformedBitstream(format!(
                "cannot read {} bits into a u64",
                width
            )));
        }

        let end = self.pos + width as usize;
        if end > self.bits.len() {
            return Err(GcsError::MalformedBitstream(format!(
                "need {} bits at bit {}, only {} remain",
                width,
                self.pos,
                self.remaining()
            )));
        }

        let value = self.bits[self.pos..end].load_be::<u64>();
        self.pos = end;
        Ok(value)
    }

    /// Current bit offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bits left to read
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }
}
