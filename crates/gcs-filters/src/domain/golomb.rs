//! Golomb-Rice coding
//!
//! A delta `d` is written as `d >> p` in unary (that many one-bits and a
//! terminating zero) followed by the low `p` bits of `d` in binary.
//!
//! The encoder takes absolute, non-decreasing values and writes their
//! successive differences. The decoder reverses this and yields absolute
//! values again, stopping after exactly `n` of them so that zero padding at
//! the end of the stream is never misread as extra entries.

use super::bitstream::{BitReader, BitWriter};
use crate::error::{GcsError, Result};

/// Write one delta with Rice parameter `p`
pub fn write_delta(writer: &mut BitWriter, delta: u64, p: u8) {
    let quotient = delta >> p;
    let remainder = delta & low_mask(p);

    writer.write_ones(quotient as usize);
    writer.write_bit(false);
    writer.write_bits(remainder, p);
}

/// Read one delta with Rice parameter `p`
pub fn read_delta(reader: &mut BitReader<'_>, p: u8) -> Result<u64> {
    let quotient = reader.read_unary()?;
    if quotient > (u64::MAX >> p) {
        return Err(GcsError::MalformedBitstream(format!(
            "quotient {} overflows with p = {}",
            quotient, p
        )));
    }
    let remainder = reader.read_bits(p)?;
    Ok((quotient << p) | remainder)
}

#[inline]
fn low_mask(p: u8) -> u64 {
    if p >= 64 {
        u64::MAX
    } else {
        (1u64 << p) - 1
    }
}

/// Delta-encodes a non-decreasing sequence of values
#[derive(Debug)]
pub struct GolombEncoder {
    writer: BitWriter,
    p: u8,
    last: u64,
    count: usize,
}

impl GolombEncoder {
    /// Create an encoder sized for roughly `expected` values
    pub fn new(p: u8, expected: usize) -> Self {
        // Each value costs p + 1 bits plus about one bit of unary quotient
        Self {
            writer: BitWriter::with_capacity(expected * (p as usize + 2)),
            p,
            last: 0,
            count: 0,
        }
    }

    /// Append the next value
    ///
    /// Values must not decrease; ties encode a zero delta.
    pub fn push(&mut self, value: u64) {
        debug_assert!(value >= self.last, "values must be non-decreasing");
        write_delta(&mut self.writer, value - self.last, self.p);
        self.last = value;
        self.count += 1;
    }

    /// Number of values written
    pub fn count(&self) -> usize {
        self.count
    }

    /// Finish the stream, zero-padded to a byte boundary
    pub fn finish(self) -> Vec<u8> {
        self.writer.into_bytes()
    }
}

/// Iterator over the absolute values of an encoded stream
///
/// Yields at most `n` items. After the first error it yields nothing more.
#[derive(Clone, Debug)]
pub struct GolombDecoder<'a> {
    reader: BitReader<'a>,
    p: u8,
    remaining: u32,
    last: u64,
    /// Exclusive upper bound on decoded values, if any
    limit: Option<u64>,
}

impl<'a> GolombDecoder<'a> {
    /// Decode `n` values with Rice parameter `p` from `data`
    pub fn new(data: &'a [u8], n: u32, p: u8) -> Self {
        Self {
            reader: BitReader::new(data),
            p,
            remaining: n,
            last: 0,
            limit: None,
        }
    }

    /// Reject any value at or above `limit` as malformed
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Values not yet decoded
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn decode_next(&mut self) -> Result<u64> {
        let delta = read_delta(&mut self.reader, self.p)?;
        self.last = self.last.checked_add(delta).ok_or_else(|| {
            GcsError::MalformedBitstream("cumulative value overflows u64".to_string())
        })?;
        if let Some(limit) = self.limit {
            if self.last >= limit {
                return Err(GcsError::MalformedBitstream(format!(
                    "value {} outside range [0, {})",
                    self.last, limit
                )));
            }
        }
        Ok(self.last)
    }
}

impl Iterator for GolombDecoder<'_> {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        match self.decode_next() {
            Ok(value) => {
                self.remaining -= 1;
                Some(Ok(value))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}
