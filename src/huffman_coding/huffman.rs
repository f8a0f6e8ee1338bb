use std::fmt::{Display, Formatter};

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::huffman_code_from_weights::CodeLengths;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::HuffError;

/// Longest code the 7 bit header can describe.
pub const MAX_CODE_LEN: u8 = 127;

/// A canonical code: the low `len` bits of `bits`, most significant first.
///
/// Ordering is by length first and then by value, which is the order canonical codes are
/// handed out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    pub len: u8,
    pub bits: u128,
}

impl Code {
    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0width$b}", self.bits, width = self.len as usize)
    }
}

/// Canonical code table. Entries are kept in canonical order, ascending (length, symbol)
/// for anything built by [`canonicalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    entries: Vec<(u8, Code)>,
    lookup: FxHashMap<u8, Code>,
}

impl CodeTable {
    /// Assign canonical codes to (symbol, length) pairs that are already in canonical order.
    ///
    /// The first code is all zeros. Every following code is the previous code plus one,
    /// shifted left by however much longer the new length is. Lengths must not decrease.
    pub fn from_ordered(pairs: &[(u8, u8)]) -> Result<Self, HuffError> {
        let mut entries = Vec::with_capacity(pairs.len());
        let mut lookup = FxHashMap::default();
        let mut prev: Option<Code> = None;

        for &(sym, len) in pairs {
            if !(1..=MAX_CODE_LEN).contains(&len) {
                return Err(HuffError::FieldOverflow {
                    field: "code length",
                    value: len as usize,
                });
            }
            let bits = match prev {
                None => 0,
                Some(p) if len >= p.len => (p.bits + 1) << (len - p.len),
                Some(p) => {
                    return Err(HuffError::MalformedHeader(format!(
                        "code length {} follows longer length {}",
                        len, p.len
                    )))
                }
            };
            // A carry out of the top bit means the lengths cannot all fit.
            if bits >> len != 0 {
                return Err(HuffError::Oversubscribed { length: len });
            }
            let code = Code { len, bits };
            if lookup.insert(sym, code).is_some() {
                return Err(HuffError::MalformedHeader(format!(
                    "symbol {} is listed twice",
                    sym
                )));
            }
            trace!("{:>3} -> {}", sym, code);
            entries.push((sym, code));
            prev = Some(code);
        }
        Ok(Self { entries, lookup })
    }

    /// Code for `sym`, if it has one.
    pub fn get(&self, sym: u8) -> Option<&Code> {
        self.lookup.get(&sym)
    }

    /// (symbol, code) pairs in canonical order.
    pub fn entries(&self) -> &[(u8, Code)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_len(&self) -> u8 {
        self.entries.last().map_or(0, |(_, code)| code.len)
    }

    /// Codes as '0'/'1' strings, keyed by symbol.
    pub fn to_bit_strings(&self) -> std::collections::BTreeMap<u8, String> {
        self.entries
            .iter()
            .map(|(sym, code)| (*sym, code.to_string()))
            .collect()
    }
}

/// Turn code lengths into a canonical code table. Only the lengths matter; the shape of the
/// tree they came from is irrelevant.
pub fn canonicalize(lengths: &CodeLengths) -> Result<CodeTable, HuffError> {
    if lengths.is_empty() {
        return Err(HuffError::EmptyInput);
    }
    let mut len_sym: Vec<(u8, u8)> = lengths.iter().map(|(&sym, &len)| (len, sym)).collect();
    len_sym.sort_unstable();
    let pairs: Vec<(u8, u8)> = len_sym.into_iter().map(|(len, sym)| (sym, len)).collect();

    let table = CodeTable::from_ordered(&pairs)?;
    debug!(
        "Canonical table: {} symbols, longest code {} bits.",
        table.len(),
        table.max_len()
    );
    Ok(table)
}

/// Write the code of every symbol in `data`, in order.
pub fn huf_encode(bw: &mut BitWriter, table: &CodeTable, data: &[u8]) -> Result<(), HuffError> {
    trace!("Payload written at {}.", bw.loc());
    for &sym in data {
        let code = table.get(sym).ok_or(HuffError::UnknownSymbol(sym))?;
        bw.out_code(code);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{canonicalize, huf_encode, Code, CodeTable};
    use crate::bitstream::bitwriter::BitWriter;
    use crate::error::HuffError;
    use crate::huffman_coding::huffman_code_from_weights::{code_len_from_weights, CodeLengths};
    use crate::tools::freq_count::freqs;

    fn table_for(data: &[u8]) -> CodeTable {
        canonicalize(&code_len_from_weights(&freqs(data)).unwrap()).unwrap()
    }

    fn assert_prefix_free(table: &CodeTable) {
        for (i, (a, ca)) in table.entries().iter().enumerate() {
            for (b, cb) in table.entries().iter().skip(i + 1) {
                assert!(!ca.is_prefix_of(cb), "{} ({}) prefixes {} ({})", a, ca, b, cb);
                assert!(!cb.is_prefix_of(ca), "{} ({}) prefixes {} ({})", b, cb, a, ca);
            }
        }
    }

    fn assert_canonical_order(table: &CodeTable) {
        for pair in table.entries().windows(2) {
            let ((sa, ca), (sb, cb)) = (pair[0], pair[1]);
            assert!((ca.len, sa) < (cb.len, sb));
            assert!(ca < cb, "{} !< {}", ca, cb);
        }
    }

    #[test]
    fn code_display_test() {
        assert_eq!(Code { len: 4, bits: 0b0010 }.to_string(), "0010");
        assert_eq!(Code { len: 1, bits: 0 }.to_string(), "0");
    }

    #[test]
    fn hello_world_codes_test() {
        let table = table_for(b"hello world.");
        let codes = table.to_bit_strings();
        assert_eq!(codes[&b'l'], "00");
        assert_eq!(codes[&b'o'], "01");
        assert_eq!(codes[&b'w'], "100");
        assert_eq!(codes[&b' '], "1010");
        assert_eq!(codes[&b'.'], "1011");
        assert_eq!(codes[&b'd'], "1100");
        assert_eq!(codes[&b'e'], "1101");
        assert_eq!(codes[&b'h'], "1110");
        assert_eq!(codes[&b'r'], "1111");
        assert_prefix_free(&table);
        assert_canonical_order(&table);
    }

    #[test]
    fn single_symbol_test() {
        let table = table_for(b"aaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'a'), Some(&Code { len: 1, bits: 0 }));
    }

    #[test]
    fn length_jump_test() {
        // f:1 e:2 d:3 c:4 a,b:5
        let lengths =
            CodeLengths::from([(b'a', 5), (b'b', 5), (b'c', 4), (b'd', 3), (b'e', 2), (b'f', 1)]);
        let codes = canonicalize(&lengths).unwrap().to_bit_strings();
        assert_eq!(codes[&b'f'], "0");
        assert_eq!(codes[&b'e'], "10");
        assert_eq!(codes[&b'd'], "110");
        assert_eq!(codes[&b'c'], "1110");
        assert_eq!(codes[&b'a'], "11110");
        assert_eq!(codes[&b'b'], "11111");
    }

    #[test]
    fn increment_carries_into_longer_code_test() {
        // "01" + 1 = "10", and "011" + 1 = "100" must keep their width.
        let codes = CodeTable::from_ordered(&[(1, 2), (2, 2), (3, 3), (4, 3), (5, 3), (6, 3)])
            .unwrap()
            .to_bit_strings();
        assert_eq!(codes[&1], "00");
        assert_eq!(codes[&2], "01");
        assert_eq!(codes[&3], "100");
        assert_eq!(codes[&4], "101");
        assert_eq!(codes[&5], "110");
        assert_eq!(codes[&6], "111");
    }

    #[test]
    fn oversubscribed_lengths_test() {
        assert!(matches!(
            CodeTable::from_ordered(&[(1, 1), (2, 1), (3, 2)]),
            Err(HuffError::Oversubscribed { length: 2 })
        ));
        assert!(matches!(
            CodeTable::from_ordered(&[(1, 1), (2, 1), (3, 1)]),
            Err(HuffError::Oversubscribed { length: 1 })
        ));
    }

    #[test]
    fn longest_codes_test() {
        // A 127 bit code stays exact: the last one is all ones.
        let mut pairs: Vec<(u8, u8)> = (1..=127).map(|l| (l, l)).collect();
        pairs.push((0, 127));
        let table = CodeTable::from_ordered(&pairs).unwrap();
        let last = table.get(0).unwrap();
        assert_eq!(last.len, 127);
        assert_eq!(last.bits, (1_u128 << 127) - 1);
        assert_prefix_free(&table);
    }

    #[test]
    fn code_length_overflow_test() {
        assert!(matches!(
            CodeTable::from_ordered(&[(1, 128)]),
            Err(HuffError::FieldOverflow { .. })
        ));
    }

    #[test]
    fn duplicate_symbol_test() {
        assert!(matches!(
            CodeTable::from_ordered(&[(7, 1), (7, 1)]),
            Err(HuffError::MalformedHeader(_))
        ));
    }

    #[test]
    fn empty_lengths_test() {
        assert!(matches!(
            canonicalize(&CodeLengths::new()),
            Err(HuffError::EmptyInput)
        ));
    }

    #[test]
    fn prefix_free_on_text_test() {
        let text = b"Curabitur finibus nisl nec auctor dignissim. Maecenas iaculis nisl felis, \
            nec laoreet tellus consectetur sit amet. Donec eu euismod dolor.";
        let table = table_for(text);
        assert_prefix_free(&table);
        assert_canonical_order(&table);
    }

    #[test]
    fn encode_test() {
        let table = table_for(b"hello world.");
        let mut bw = BitWriter::new(64);
        huf_encode(&mut bw, &table, b"lol").unwrap();
        assert_eq!(bw.as_str(), "000100");
    }

    #[test]
    fn encode_unknown_symbol_test() {
        let table = table_for(b"abc");
        let mut bw = BitWriter::new(8);
        assert!(matches!(
            huf_encode(&mut bw, &table, b"abz"),
            Err(HuffError::UnknownSymbol(b'z'))
        ));
    }
}
