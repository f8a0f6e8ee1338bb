use log::{debug, info, trace, warn};

use super::{CodecOptions, MARKER_BITS};
use crate::bitstream::bitreader::BitReader;
use crate::error::HuffError;
use crate::huffman_coding::header::Header;
use crate::huffman_coding::huffman::CodeTable;

/// Everything a decompression run produced.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub data: Vec<u8>,
    /// The table rebuilt from the header.
    pub table: CodeTable,
}

/// Decompress a bitstring made by [`compress`](super::compress::compress) with default options.
pub fn decompress(bits: &str) -> Result<Vec<u8>, HuffError> {
    decompress_with(bits, &CodecOptions::default()).map(|decoded| decoded.data)
}

/// Decompress a self-describing bitstring.
pub fn decompress_with(bits: &str, opts: &CodecOptions) -> Result<Decoded, HuffError> {
    let marker = opts.checked_marker()?;
    let mut br = BitReader::new(bits)?;

    // Look for a valid marker.
    if let Some(expected) = marker {
        match br.bint(MARKER_BITS as usize) {
            Some(found) if found == expected as u32 => {
                trace!("Found format marker {:03b}.", found)
            }
            Some(found) => {
                return Err(HuffError::MalformedHeader(format!(
                    "format marker {:03b} does not match {:03b}",
                    found, expected
                )))
            }
            None => {
                return Err(HuffError::MalformedHeader(
                    "too short to hold a format marker".into(),
                ))
            }
        }
    }

    let table = Header::read(&mut br)?.to_table()?;
    info!(
        "Rebuilt a table of {} symbols, decoding {} payload bits.",
        table.len(),
        br.remaining()
    );
    let data = huf_decode(&mut br, &table, opts.strict)?;
    info!("Decoded {} symbols.", data.len());
    Ok(Decoded { data, table })
}

/// Where the codes of one length sit in the canonical order.
#[derive(Debug, Clone, Default)]
struct Level {
    /// First code of this length.
    start_code: u128,
    /// How many codes have this length.
    count: usize,
    /// Index of the first symbol of this length in the canonical symbol list.
    offset: usize,
}

/// Build one decode level per code length, 1 through the longest.
fn huf_decode_map(table: &CodeTable) -> Vec<Level> {
    let mut levels = vec![Level::default(); table.max_len() as usize];
    for (i, (_, code)) in table.entries().iter().enumerate() {
        let level = &mut levels[code.len as usize - 1];
        if level.count == 0 {
            level.start_code = code.bits;
            level.offset = i;
        }
        level.count += 1;
    }
    levels
}

/// Decode the rest of `br` with `table`.
///
/// Bits are taken one at a time and the accumulated code is checked against the codes of
/// its length after every bit. A match emits a symbol and starts a fresh code. Since the
/// code is prefix-free the first match is the only one possible.
///
/// Leftover bits that never complete a code are dropped (with a warning), unless `strict`
/// is set, in which case they are an error. That includes a run longer than the longest
/// code: leniently everything from there on is dropped, strictly it is `UnmatchedCode`.
pub fn huf_decode(
    br: &mut BitReader<'_>,
    table: &CodeTable,
    strict: bool,
) -> Result<Vec<u8>, HuffError> {
    let levels = huf_decode_map(table);
    let symbols: Vec<u8> = table.entries().iter().map(|(sym, _)| *sym).collect();
    let mut out = Vec::with_capacity(br.remaining());

    let mut code = 0_u128;
    let mut depth = 0_usize;
    while let Some(bit) = br.bit() {
        code = code << 1 | bit as u128;
        depth += 1;

        // Past the longest code nothing can match, so the rest of the input is tail.
        let Some(level) = levels.get(depth - 1) else {
            if strict {
                return Err(HuffError::UnmatchedCode {
                    position: br.position(),
                });
            }
            warn!(
                "Dropped {} trailing bits that do not complete a code.",
                depth + br.remaining()
            );
            debug!("Payload abandoned at {}.", br.loc());
            return Ok(out);
        };
        if level.count > 0
            && code >= level.start_code
            && code - level.start_code < level.count as u128
        {
            out.push(symbols[level.offset + (code - level.start_code) as usize]);
            code = 0;
            depth = 0;
        }
    }

    if depth > 0 {
        if strict {
            return Err(HuffError::IncompleteTrailingCode { bits: depth });
        }
        warn!("Dropped {} trailing bits that do not complete a code.", depth);
    }
    debug!("Payload ended at {}.", br.loc());
    Ok(out)
}
