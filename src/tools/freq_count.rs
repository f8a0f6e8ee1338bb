use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Symbol -> occurrence count.
pub type FreqTable = FxHashMap<u8, u32>;

/// Returns a frequency count of the input data. Uses parallelism when data set is over 64k.
/// Symbols that never occur have no entry, so an empty input gives an empty table.
pub fn freqs(data: &[u8]) -> FreqTable {
    let counts = if data.len() > 64_000 {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(16_000)
            .fold(
                || vec![0_u32; 256],
                |mut freqs, chunk| {
                    chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                    freqs
                },
            )
            .reduce(
                || vec![0_u32; 256],
                |s, f| s.iter().zip(&f).map(|(a, b)| a + b).collect::<Vec<u32>>(),
            )
    } else {
        let mut freqs = vec![0_u32; 256];
        data.iter().for_each(|&el| freqs[el as usize] += 1);
        freqs
    };

    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(sym, &count)| (sym as u8, count))
        .collect()
}
