use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, warn};

use crate::compression::CodecOptions;

/// Compress, Decompress, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define all user settable options to control program behavior
#[derive(Debug)]
pub struct HuffOpts {
    /// Text (or bitstring) to process. Read from stdin when missing.
    pub input: Option<String>,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Report weighted path length and entropy after compressing
    pub stats: bool,
    /// Marker and trailing bit handling passed to the codec
    pub codec: CodecOptions,
}

impl HuffOpts {
    /// Set default parameters on program start
    pub fn new() -> Self {
        Self {
            input: None,
            op_mode: Mode::Compress,
            stats: false,
            codec: CodecOptions::default(),
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Canonical Huffman coding of 7 bit text into a self-describing bitstring",
    long_about = "
    Text is compressed with a Huffman code rebuilt in canonical form. The output is a string
    of 0s and 1s: a 3 bit marker, a header holding the code length histogram and symbol
    order, then the codes themselves. Decompression needs nothing but that string."
)]
pub struct Args {
    /// Text to compress, or bitstring to decompress. Read from stdin when missing.
    #[clap()]
    input: Option<String>,

    /// Compress the input text (the default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input bitstring
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Compress, decompress and check that the text survived
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Print weighted path length and entropy after compressing
    #[clap(short = 's', long = "stats")]
    stats: bool,

    /// Fail on trailing bits that do not complete a code
    #[clap(long = "strict")]
    strict: bool,

    /// Neither write nor expect the 3 bit format marker
    #[clap(long = "no-marker")]
    no_marker: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 2)]
    v: u8,
}

/// Put command line information from CLAP into our internal structure and set the log level.
pub fn huffopts_init() -> HuffOpts {
    huffopts_from(Args::parse())
}

fn huffopts_from(args: Args) -> HuffOpts {
    let mut opts = HuffOpts::new();

    // Set the log level
    match args.v {
        0 => log::set_max_level(log::LevelFilter::Off),
        1 => log::set_max_level(log::LevelFilter::Error),
        2 => log::set_max_level(log::LevelFilter::Warn),
        3 => log::set_max_level(log::LevelFilter::Info),
        4 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    opts.input = args.input;
    if args.decompress {
        opts.op_mode = Mode::Decompress
    };
    if args.test {
        opts.op_mode = Mode::Test
    };
    if args.compress && opts.op_mode != Mode::Compress {
        warn!("Conflicting modes requested, using {}", opts.op_mode)
    };
    opts.stats = args.stats;
    opts.codec.strict = args.strict;
    if args.no_marker {
        opts.codec.marker = None
    };

    // Below we report initialization status to the user
    info!("---- canhuff Initialization Start ----",);
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match &opts.input {
        Some(s) => info!("Taking {} characters of input from the command line", s.len()),
        None => info!("Reading input from stdin"),
    }
    if opts.codec.strict {
        info!("Strict decoding of trailing bits")
    };
    if opts.codec.marker.is_none() {
        info!("Format marker disabled")
    };
    info!("---- canhuff Initialization End ----\n");
    opts
}
