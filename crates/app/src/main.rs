//! huffpack: command-line front end for the huffpack codec.
//!
//! Reads raw bytes (or generates a grayscale sample), compresses them into a
//! self-describing artifact, and reverses the process.

mod config;
mod input_gen;

use config::{Command, Config};
use huffpack_core::{artifact, decode_with_stats, encode_with_stats, Error, InternalError, Result};
use std::path::Path;
use std::process::ExitCode;

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    ExitCode::from(execute(&args))
}

/// Parse `args`, run the command and return the process exit status.
fn execute(args: &[String]) -> u8 {
    let config = match Config::from_args(args) {
        Ok(Some(config)) => config,
        Ok(None) => return 0,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("run with --help for usage");
            return EXIT_USAGE;
        }
    };

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {}", e);
            EXIT_FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    match config.command {
        Command::Compress => compress(config),
        Command::Decompress => decompress(config),
        Command::Inspect => inspect(config),
        Command::Demo => demo(config),
    }
}

/// Paths are validated by `Config::from_args`; this only guards the Option.
fn required<'a>(path: &'a Option<std::path::PathBuf>, flag: &str) -> Result<&'a Path> {
    path.as_deref().ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("missing {}", flag),
        ))
    })
}

fn compress(config: &Config) -> Result<()> {
    let input = std::fs::read(required(&config.input_file, "--in")?)?;
    let (artifact, stats) = encode_with_stats(&input)?;
    std::fs::write(required(&config.output_file, "--out")?, artifact.as_bytes())?;

    if config.print_stats {
        stats.print_summary();
    }
    println!(
        "compressed {} bytes into {} bytes",
        stats.input_bytes, stats.artifact_bytes
    );
    Ok(())
}

fn decompress(config: &Config) -> Result<()> {
    let bytes = std::fs::read(required(&config.input_file, "--in")?)?;
    let (output, stats) = decode_with_stats(&bytes)?;
    std::fs::write(required(&config.output_file, "--out")?, &output)?;

    if config.print_stats {
        stats.print_summary();
    }
    println!(
        "decompressed {} bytes into {} bytes",
        stats.artifact_bytes, stats.input_bytes
    );
    Ok(())
}

fn inspect(config: &Config) -> Result<()> {
    let bytes = std::fs::read(required(&config.input_file, "--in")?)?;
    let parsed = artifact::parse(&bytes)?;
    let header = &parsed.header;

    println!("=== Artifact ===");
    println!("Version:          {}", header.version);
    println!("Symbols:          {}", header.symbol_count);
    println!("Distinct symbols: {}", header.table.len());
    println!("Payload:          {} bits ({} bytes)", header.bit_count, header.payload_len());
    println!("Header:           {} bytes", header.header_len());
    println!("Checksum:         {:#010x}", header.checksum);
    println!("Entropy:          {:.3} bits/symbol", header.table.entropy());

    if config.print_stats && !header.table.is_empty() {
        println!();
        println!("=== Frequency Table ===");
        for (symbol, count) in header.table.iter() {
            println!("{:>3}: {}", symbol, count);
        }
    }
    Ok(())
}

fn demo(config: &Config) -> Result<()> {
    let sample = match &config.input_file {
        Some(path) => std::fs::read(path)?,
        None => {
            println!(
                "generating {} x {} grayscale sample (seed {})",
                config.sample_width, config.sample_height, config.seed
            );
            let sample =
                input_gen::generate_grayscale(config.seed, config.sample_width, config.sample_height);
            if let Some(path) = &config.output_file {
                input_gen::write_sample_file(path, &sample)?;
                println!("sample written to {}", path.display());
            }
            sample
        }
    };

    let (artifact, mut stats) = encode_with_stats(&sample)?;
    let (restored, decode_stats) = decode_with_stats(artifact.as_bytes())?;
    stats.record_decode(&decode_stats);

    if config.print_stats {
        stats.print_summary();
    }

    match first_difference(&sample, &restored) {
        None => {
            println!("✓ Round trip verified ({} bytes)", sample.len());
            Ok(())
        }
        Some(position) => {
            println!("✗ Round trip mismatch");
            Err(InternalError::RoundTripMismatch { position }.into())
        }
    }
}

/// Index of the first differing byte, or the shorter length if one is a prefix.
fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    match a.iter().zip(b).position(|(x, y)| x != y) {
        Some(i) => Some(i),
        None if a.len() != b.len() => Some(a.len().min(b.len())),
        None => None,
    }
}
