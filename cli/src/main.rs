use clap::{ArgGroup, Parser, ValueEnum};
use log::{error, info};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use xoshiro_rng_core::{GeneratorConfig, RngError, Xoshiro128};

/// Output encoding for generated words
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One zero-padded hex word per line
    Hex,
    /// One decimal word per line
    Dec,
    /// Little-endian 32-bit words, for piping into a test battery
    Raw,
}

/// Dump words from a seeded xoshiro128 stream
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["seed", "state", "config"])))]
struct Args {
    /// 64-bit seed expanded with SplitMix64
    #[arg(short, long)]
    seed: Option<u64>,

    /// Explicit state as four comma-separated words (hex with 0x, or decimal)
    #[arg(long, value_parser = parse_state)]
    state: Option<[u32; 4]>,

    /// Path to a JSON generator config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of words to emit; 0 streams until the reader closes the pipe
    #[arg(short = 'n', long, default_value_t = 16)]
    count: u64,

    /// High-order bits kept from each word
    #[arg(short, long, default_value_t = 32, value_parser = clap::value_parser!(u32).range(1..=32))]
    bits: u32,

    /// Output encoding
    #[arg(short, long, value_enum, default_value_t = Format::Hex)]
    format: Format,

    /// Apply this many 2^64-step jumps before emitting
    #[arg(short, long, default_value_t = 0)]
    jump: u32,

    /// Index of the jump-separated stream to emit from a config's `streams`
    #[arg(long, default_value_t = 0)]
    stream: usize,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Rng(#[from] RngError),

    #[error("Failed to read config {}: {source}", .path.display())]
    ReadConfig { path: PathBuf, source: io::Error },

    #[error("No generator source given: pass --seed, --state or --config")]
    MissingSource,

    #[error("Stream {index} out of range: config defines {count} stream(s)")]
    StreamOutOfRange { index: usize, count: usize },

    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

fn parse_word(text: &str) -> Result<u32, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid state word '{}': {}", text, e))
}

fn parse_state(text: &str) -> Result<[u32; 4], String> {
    let words = text
        .split(',')
        .map(parse_word)
        .collect::<Result<Vec<_>, _>>()?;
    <[u32; 4]>::try_from(words)
        .map_err(|words| format!("expected 4 state words, got {}", words.len()))
}

fn load_config(args: &Args) -> Result<GeneratorConfig, CliError> {
    if let Some(path) = &args.config {
        let json = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
            path: path.clone(),
            source,
        })?;
        return Ok(GeneratorConfig::from_json(&json)?);
    }

    let mut config = match (args.state, args.seed) {
        (Some(state), _) => GeneratorConfig::from_state(state),
        (None, Some(seed)) => GeneratorConfig::from_seed(seed),
        (None, None) => return Err(CliError::MissingSource),
    };
    config.streams = args.stream + 1;
    Ok(config)
}

fn build_generator(args: &Args) -> Result<Xoshiro128, CliError> {
    let config = load_config(args)?;
    if config.streams > 1 {
        info!("selecting stream {} of {}", args.stream, config.streams);
    }

    let count = config.streams;
    let mut rng = config
        .build_streams()?
        .into_iter()
        .nth(args.stream)
        .ok_or(CliError::StreamOutOfRange {
            index: args.stream,
            count,
        })?;
    for _ in 0..args.jump {
        rng.jump();
    }
    Ok(rng)
}

fn emit<W: Write>(rng: &mut Xoshiro128, args: &Args, out: &mut W) -> io::Result<()> {
    let width = ((args.bits + 3) / 4) as usize;
    let mut remaining = args.count;
    loop {
        if args.count != 0 {
            if remaining == 0 {
                break;
            }
            remaining -= 1;
        }

        let word = rng.next_bits(args.bits);
        match args.format {
            Format::Hex => writeln!(out, "0x{:0width$x}", word, width = width)?,
            Format::Dec => writeln!(out, "{}", word)?,
            Format::Raw => out.write_all(&word.to_le_bytes())?,
        }
    }
    out.flush()
}

/// Emit words, treating a closed reader as a normal end of output
fn stream_to<W: Write>(rng: &mut Xoshiro128, args: &Args, out: &mut W) -> Result<(), CliError> {
    match emit(rng, args, out) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            info!("reader closed the pipe");
            Ok(())
        }
        other => other.map_err(CliError::from),
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut rng = build_generator(args)?;
    info!("starting state {:08x?}", rng.state());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    stream_to(&mut rng, args, &mut out)
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize the logger
    colog::init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
