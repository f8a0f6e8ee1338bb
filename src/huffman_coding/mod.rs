//! The huffman module builds canonical Huffman codes and the header that describes them.
//!
//! - huffman_code_from_weights: merges symbol weights into a tree and reads off code lengths.
//! - huffman: turns code lengths into canonical codes and encodes symbols with them.
//! - header: packs the canonical table into 7 bit fields and rebuilds it from them.
//!
//! Only code lengths and the symbol order ever leave this module. The tree is thrown away as
//! soon as the lengths are known, and the decoder never sees it.
//!

pub mod header;
pub mod huffman;
pub mod huffman_code_from_weights;
