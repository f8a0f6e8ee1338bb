use crate::huffman_coding::huffman::Code;

/// Builds an output bitstring. Integer fields are written big-endian (most significant bit
/// first) and left padded with zeros to their width.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// Output buffer holding one '0' or '1' character per bit.
    output: String,
}

impl BitWriter {
    /// Create a new BitWriter with room for `size` bits.
    pub fn new(size: usize) -> Self {
        Self {
            output: String::with_capacity(size),
        }
    }

    /// Write the `depth` least significant bits of `data`, most significant first.
    /// Bits of `data` above `depth` are ignored.
    pub fn out_bits(&mut self, data: u128, depth: u8) {
        for shift in (0..depth).rev() {
            self.output.push(if (data >> shift) & 1 == 1 { '1' } else { '0' });
        }
    }

    /// Write a 7 bit header field.
    pub fn out7(&mut self, data: u8) {
        self.out_bits(data as u128, 7);
    }

    /// Write a canonical code.
    pub fn out_code(&mut self, code: &Code) {
        self.out_bits(code.bits, code.len);
    }

    /// Number of bits written so far.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Debugging function to return the current bit position.
    pub fn loc(&self) -> String {
        format!("[{}]", self.output.len())
    }

    /// Borrow the bits written so far.
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Consume the writer and return the bitstring.
    pub fn into_string(self) -> String {
        self.output
    }
}
