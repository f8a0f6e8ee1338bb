//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::io::Read;
use std::process::exit;

use canhuff::tools::cli::{huffopts_init, HuffOpts, Mode};
use canhuff::{compress_with, decompress_with, entropy, weighted_path_length, HuffError};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

fn main() -> Result<(), HuffError> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    // Log to stderr so stdout carries nothing but the result.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Unable to start logging: {}", e);
    }

    let mut options = huffopts_init();
    let input = match options.input.take() {
        Some(input) => input,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    // Dispatch on the requested mode.
    let result = match options.op_mode {
        Mode::Compress => run_compress(&options, &input),
        Mode::Decompress => run_decompress(&options, &input),
        Mode::Test => run_test(&options, &input),
    };

    if let Err(e) = &result {
        error!("{}", e);
    }
    info!("Done.\n");
    result
}

fn run_compress(opts: &HuffOpts, text: &str) -> Result<(), HuffError> {
    let encoded = compress_with(text.as_bytes(), &opts.codec)?;
    println!("{}", encoded.bits);
    if opts.stats {
        println!("longest code length: {}", encoded.table.max_len());
        println!(
            "weighted path length: {:.4}",
            weighted_path_length(&encoded.freqs, &encoded.table)
        );
        println!("shannon entropy: {:.4}", entropy(&encoded.freqs));
    }
    Ok(())
}

fn run_decompress(opts: &HuffOpts, bits: &str) -> Result<(), HuffError> {
    let decoded = decompress_with(bits.trim_end(), &opts.codec)?;
    println!("{}", String::from_utf8_lossy(&decoded.data));
    Ok(())
}

/// Compress, decompress, and compare.
fn run_test(opts: &HuffOpts, text: &str) -> Result<(), HuffError> {
    let encoded = compress_with(text.as_bytes(), &opts.codec)?;
    let decoded = decompress_with(&encoded.bits, &opts.codec)?;
    if decoded.data != text.as_bytes() || decoded.table != encoded.table {
        error!("Round trip failed for {} symbols.", text.len());
        exit(1);
    }
    println!(
        "ok: {} symbols -> {} bits ({} bits as 7 bit text)",
        text.len(),
        encoded.bits.len(),
        text.len() * 7
    );
    if opts.stats {
        println!(
            "weighted path length: {:.4}",
            weighted_path_length(&encoded.freqs, &encoded.table)
        );
        println!("shannon entropy: {:.4}", entropy(&encoded.freqs));
    }
    Ok(())
}
