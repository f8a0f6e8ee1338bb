//! Diagnostics over an already built code. Nothing here feeds back into the codec.

use crate::huffman_coding::huffman::CodeTable;
use crate::tools::freq_count::FreqTable;

/// Average code length in bits per symbol, weighted by how often each symbol occurs.
pub fn weighted_path_length(freqs: &FreqTable, table: &CodeTable) -> f64 {
    let total: u64 = freqs.values().map(|&f| f as u64).sum();
    if total == 0 {
        return 0.0;
    }
    freqs
        .iter()
        .filter_map(|(sym, &f)| table.get(*sym).map(|code| code.len as f64 * f as f64))
        .sum::<f64>()
        / total as f64
}

/// Empirical Shannon entropy of the symbol distribution, in bits per symbol.
pub fn entropy(freqs: &FreqTable) -> f64 {
    let total: u64 = freqs.values().map(|&f| f as u64).sum();
    if total == 0 {
        return 0.0;
    }
    freqs
        .values()
        .map(|&f| {
            let p = f as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}
