//! Error type shared by every stage of the codec.
//!
//! Every failure is local to a single compress or decompress call. Nothing is retried and
//! nothing partial is returned: a call either produces its whole result or one of these.

/// Errors raised while building, serializing or applying a canonical Huffman code.
#[derive(Debug, thiserror::Error)]
pub enum HuffError {
    /// Tree construction was requested for an empty frequency table.
    #[error("nothing to encode: the input sequence is empty")]
    EmptyInput,

    /// A header field does not fit in 7 bits.
    #[error("{field} value {value} does not fit in a 7 bit header field")]
    FieldOverflow { field: &'static str, value: usize },

    /// The header is truncated, inconsistent, or carries the wrong format marker.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// Encoding hit a symbol with no code in the table.
    #[error("symbol {0} has no code in the table")]
    UnknownSymbol(u8),

    /// Strict decoding ended with bits that do not complete a code.
    #[error("{bits} trailing bits do not complete a code")]
    IncompleteTrailingCode { bits: usize },

    /// A set of code lengths that cannot form a prefix code.
    #[error("code lengths are over-subscribed at length {length}")]
    Oversubscribed { length: u8 },

    /// Strict decoding accumulated more bits than the longest code without a match.
    #[error("no code matches the bits ending at position {position}")]
    UnmatchedCode { position: usize },

    /// A bitstring contained something other than '0' or '1'.
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
