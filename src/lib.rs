//! Canonical Huffman coding of 7 bit symbols into a self-describing bitstring.
//!
//! A compressed bitstring is a 3 bit format marker (optional), a header holding the code
//! length histogram and the symbol order, and then one canonical code per input symbol.
//! Codes are derived from their lengths alone, so the header is enough to rebuild the
//! table and the Huffman tree itself is never stored.
//!
//! Bitstrings are plain strings of '0' and '1' characters. Packing them into bytes, files
//! or network frames is up to the caller.
//!
//! Basic usage:
//!
//! ```
//! let bits = canhuff::compress(b"hello world.").unwrap();
//! assert_eq!(canhuff::decompress(&bits).unwrap(), b"hello world.");
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress, compress_with, Encoded};
pub use compression::decompress::{decompress, decompress_with, Decoded};
pub use compression::CodecOptions;
pub use error::HuffError;
pub use huffman_coding::header::{deserialize_header, serialize_header, Header};
pub use huffman_coding::huffman::{canonicalize, Code, CodeTable};
pub use huffman_coding::huffman_code_from_weights::{code_len_from_weights, CodeLengths};
pub use tools::freq_count::{freqs, FreqTable};
pub use tools::report::{entropy, weighted_path_length};
