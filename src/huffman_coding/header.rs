//! The header describes a canonical code table without storing a single code.
//!
//! Layout, every field 7 bits wide, big-endian and left padded with zeros:
//!
//! ```text
//! L                     longest code length
//! counts[1..=L]         how many symbols have each length (zeros allowed)
//! S                     number of symbols
//! symbols[0..S]         symbols in ascending (length, symbol) order
//! ```
//!
//! Reading it back pairs the listed symbols with lengths expanded from the histogram and
//! runs the same code assignment that built the table, so the codes come out identical.

use log::{debug, trace};

use super::huffman::{CodeTable, MAX_CODE_LEN};
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::HuffError;

/// Width of every header field.
pub const FIELD_BITS: usize = 7;
/// Largest value a header field can hold.
pub const FIELD_MAX: usize = (1 << FIELD_BITS) - 1;

/// Code length histogram plus symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// `counts[i]` is the number of symbols whose code is `i + 1` bits long.
    pub counts: Vec<usize>,
    /// Symbols in canonical order.
    pub symbols: Vec<u8>,
}

impl Header {
    /// Describe `table`. Table entries are already in canonical order.
    pub fn from_table(table: &CodeTable) -> Self {
        let mut counts = vec![0_usize; table.max_len() as usize];
        for (_, code) in table.entries() {
            counts[code.len as usize - 1] += 1;
        }
        Self {
            counts,
            symbols: table.entries().iter().map(|(sym, _)| *sym).collect(),
        }
    }

    /// Number of bits `write` produces.
    pub fn bit_len(&self) -> usize {
        FIELD_BITS * (2 + self.counts.len() + self.symbols.len())
    }

    /// Append the header to `bw`. Fails before writing anything if a field would overflow.
    pub fn write(&self, bw: &mut BitWriter) -> Result<(), HuffError> {
        check_field("code length count", self.counts.len())?;
        for &count in &self.counts {
            check_field("code length bin", count)?;
        }
        check_field("symbol count", self.symbols.len())?;
        for &sym in &self.symbols {
            check_field("symbol", sym as usize)?;
        }

        trace!("Header written at {}.", bw.loc());
        bw.out7(self.counts.len() as u8);
        self.counts.iter().for_each(|&count| bw.out7(count as u8));
        trace!("Symbol list written at {}.", bw.loc());
        bw.out7(self.symbols.len() as u8);
        self.symbols.iter().for_each(|&sym| bw.out7(sym));
        Ok(())
    }

    /// Read a header from `br`, checking that every declared field is actually present and
    /// that the histogram and symbol list agree.
    pub fn read(br: &mut BitReader<'_>) -> Result<Self, HuffError> {
        let bins = read_field(br, "code length count")?;
        if bins == 0 {
            return Err(HuffError::MalformedHeader("no code lengths declared".into()));
        }
        let counts = (0..bins)
            .map(|_| read_field(br, "code length bin"))
            .collect::<Result<Vec<usize>, HuffError>>()?;

        trace!("Symbol list found at {}.", br.loc());
        let symbol_count = read_field(br, "symbol count")?;
        let declared: usize = counts.iter().sum();
        if declared != symbol_count {
            return Err(HuffError::MalformedHeader(format!(
                "histogram declares {} symbols but the list holds {}",
                declared, symbol_count
            )));
        }
        let symbols = (0..symbol_count)
            .map(|_| read_field(br, "symbol").map(|sym| sym as u8))
            .collect::<Result<Vec<u8>, HuffError>>()?;

        debug!(
            "Read header: {} length bins, {} symbols, payload starts at {}.",
            bins,
            symbol_count,
            br.loc()
        );
        Ok(Self { counts, symbols })
    }

    /// Rebuild the canonical table this header describes.
    pub fn to_table(&self) -> Result<CodeTable, HuffError> {
        if self.counts.len() > MAX_CODE_LEN as usize {
            return Err(HuffError::FieldOverflow {
                field: "code length count",
                value: self.counts.len(),
            });
        }
        let lengths = self
            .counts
            .iter()
            .enumerate()
            .flat_map(|(i, &count)| std::iter::repeat(i as u8 + 1).take(count));
        let pairs: Vec<(u8, u8)> = self.symbols.iter().copied().zip(lengths).collect();
        if pairs.len() != self.symbols.len() || pairs.len() != self.counts.iter().sum::<usize>()
        {
            return Err(HuffError::MalformedHeader(
                "histogram and symbol list disagree".into(),
            ));
        }
        CodeTable::from_ordered(&pairs)
    }
}

fn check_field(field: &'static str, value: usize) -> Result<(), HuffError> {
    if value > FIELD_MAX {
        return Err(HuffError::FieldOverflow { field, value });
    }
    Ok(())
}

fn read_field(br: &mut BitReader<'_>, field: &str) -> Result<usize, HuffError> {
    br.bint(FIELD_BITS).map(|v| v as usize).ok_or_else(|| {
        HuffError::MalformedHeader(format!(
            "ran out of bits reading {} at {}",
            field,
            br.loc()
        ))
    })
}

/// Serialize the header for `table` on its own.
pub fn serialize_header(table: &CodeTable) -> Result<String, HuffError> {
    let header = Header::from_table(table);
    let mut bw = BitWriter::new(header.bit_len());
    header.write(&mut bw)?;
    Ok(bw.into_string())
}

/// Rebuild a canonical table from a header bitstring. Bits after the header are ignored.
pub fn deserialize_header(bits: &str) -> Result<CodeTable, HuffError> {
    let mut br = BitReader::new(bits)?;
    Header::read(&mut br)?.to_table()
}
