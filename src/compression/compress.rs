use log::{debug, info};

use super::{CodecOptions, MARKER_BITS};
use crate::bitstream::bitwriter::BitWriter;
use crate::error::HuffError;
use crate::huffman_coding::header::Header;
use crate::huffman_coding::huffman::{canonicalize, huf_encode, CodeTable};
use crate::huffman_coding::huffman_code_from_weights::code_len_from_weights;
use crate::tools::freq_count::{freqs, FreqTable};

/// Everything a compression run produced. The tables are kept for diagnostics.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// Marker, header and payload.
    pub bits: String,
    pub freqs: FreqTable,
    pub table: CodeTable,
}

/// Compress `data` with default options and return the bitstring.
pub fn compress(data: &[u8]) -> Result<String, HuffError> {
    compress_with(data, &CodecOptions::default()).map(|encoded| encoded.bits)
}

/// Compress `data` into a self-describing bitstring.
pub fn compress_with(data: &[u8], opts: &CodecOptions) -> Result<Encoded, HuffError> {
    let marker = opts.checked_marker()?;
    if data.is_empty() {
        return Err(HuffError::EmptyInput);
    }
    info!("Compressing {} symbols.", data.len());

    let freqs = freqs(data);
    let lengths = code_len_from_weights(&freqs)?;
    let table = canonicalize(&lengths)?;
    let header = Header::from_table(&table);

    // Size the output once: marker, header, then every code.
    let payload: usize = freqs
        .iter()
        .map(|(&sym, &f)| f as usize * lengths[&sym] as usize)
        .sum();
    let marker_bits = marker.map_or(0, |_| MARKER_BITS as usize);
    let mut bw = BitWriter::new(marker_bits + header.bit_len() + payload);

    if let Some(m) = marker {
        bw.out_bits(m as u128, MARKER_BITS);
    }
    header.write(&mut bw)?;
    debug!(
        "Header is {} bits for {} symbols, payload is {} bits.",
        header.bit_len(),
        table.len(),
        payload
    );
    huf_encode(&mut bw, &table, data)?;

    info!(
        "Compressed {} symbols ({} bits as 7 bit text) to {} bits.",
        data.len(),
        data.len() * 7,
        bw.len()
    );
    Ok(Encoded {
        bits: bw.into_string(),
        freqs,
        table,
    })
}
