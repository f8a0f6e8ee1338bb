//! BitReader: reads a bitstring one bit or one fixed-width field at a time.
//!
//! The input is validated once on construction, so every read after that only has to care
//! about running out of bits.

use crate::error::HuffError;

/// Reads a '0'/'1' bitstring.
#[derive(Debug)]
pub struct BitReader<'a> {
    bits: &'a [u8],
    cursor: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader. Fails on the first character that is not '0' or '1'.
    pub fn new(bits: &'a str) -> Result<Self, HuffError> {
        if let Some((position, found)) = bits
            .chars()
            .enumerate()
            .find(|&(_, c)| c != '0' && c != '1')
        {
            return Err(HuffError::InvalidBit { position, found });
        }
        Ok(Self {
            bits: bits.as_bytes(),
            cursor: 0,
        })
    }

    /// Return bit as Option<u32> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<u32> {
        let bit = *self.bits.get(self.cursor)?;
        self.cursor += 1;
        Some((bit - b'0') as u32)
    }

    /// Return Option<u32> of the next n bits (n <= 32), or None if fewer than n bits remain.
    /// Nothing is consumed when the read fails.
    pub fn bint(&mut self, n: usize) -> Option<u32> {
        if self.remaining() < n {
            return None;
        }
        let result = self.bits[self.cursor..self.cursor + n]
            .iter()
            .fold(0_u32, |acc, &b| acc << 1 | (b - b'0') as u32);
        self.cursor += n;
        Some(result)
    }

    /// Number of bits consumed so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of bits not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.cursor
    }

    /// Debugging function. Report current position in the bitstring.
    pub fn loc(&self) -> String {
        format!("[{}]", self.cursor)
    }
}
