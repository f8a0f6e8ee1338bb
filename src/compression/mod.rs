//! The compression module runs the whole pipeline in both directions.
//!
//! Compression happens in the following steps:
//! - Frequency count: how often each symbol occurs.
//! - Tree build: merge the two lightest nodes until one remains, read off code lengths.
//! - Canonicalize: hand out code values from the lengths alone.
//! - Header: write the length histogram and symbol order.
//! - Payload: write the code of every input symbol in order.
//!
//! Decompression reads the header, rebuilds the same canonical table, and matches payload
//! bits against it one bit at a time. The tree is never transmitted.
//!

pub mod compress;
pub mod decompress;

use crate::error::HuffError;

/// Width of the optional format marker in front of the header.
pub const MARKER_BITS: u8 = 3;
/// Marker written unless the caller asks for something else.
pub const DEFAULT_MARKER: u8 = 0b110;

/// Settings shared by compression and decompression. Both sides must agree on the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    /// 3 bit value written before the header, or nothing at all.
    pub marker: Option<u8>,
    /// Report trailing bits that do not complete a code instead of dropping them.
    pub strict: bool,
}

impl CodecOptions {
    pub fn new() -> Self {
        Self {
            marker: Some(DEFAULT_MARKER),
            strict: false,
        }
    }

    /// The marker, checked to fit in its field.
    pub(crate) fn checked_marker(&self) -> Result<Option<u8>, HuffError> {
        match self.marker {
            Some(m) if m >> MARKER_BITS != 0 => Err(HuffError::FieldOverflow {
                field: "format marker",
                value: m as usize,
            }),
            other => Ok(other),
        }
    }
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self::new()
    }
}
