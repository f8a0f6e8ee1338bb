//! The bitstream module forms the I/O subsystem of the codec.
//!
//! Compressed data is a logical bit sequence, not a byte stream. It is carried as a string of
//! '0' and '1' characters so that a caller decides how (and whether) to pack it into bytes.
//!
//! - bitwriter: appends fixed-width integer fields and codes to an output bitstring.
//! - bitreader: reads single bits and fixed-width integer fields back out of a bitstring.
//!
pub mod bitreader;
pub mod bitwriter;
