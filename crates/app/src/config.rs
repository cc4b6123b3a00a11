//! Configuration for the huffpack application.
//!
//! Handles parsing command-line arguments and generating sensible defaults
//! (including randomized defaults that are reproducible with a seed).
//!
//! # Philosophy
//!
//! The tool works with ZERO arguments: it runs the in-memory demo on a
//! generated sample. The seed is always printed so runs are reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// Largest generated sample, in pixels (64 MiB of grayscale bytes).
pub const MAX_SAMPLE_PIXELS: usize = 64 * 1024 * 1024;

/// What the tool should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Encode `input_file` into an artifact at `output_file`
    Compress,
    /// Decode the artifact at `input_file` into `output_file`
    Decompress,
    /// Print an artifact's header without decoding it
    Inspect,
    /// Generate a sample, round-trip it in memory and report
    Demo,
}

impl Command {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "compress" => Some(Command::Compress),
            "decompress" => Some(Command::Decompress),
            "inspect" => Some(Command::Inspect),
            "demo" => Some(Command::Demo),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Command::Compress => "compress",
            Command::Decompress => "decompress",
            Command::Inspect => "inspect",
            Command::Demo => "demo",
        }
    }
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,

    // === Files ===
    /// Input file path (None = generate sample, demo only)
    pub input_file: Option<PathBuf>,

    /// Output file path
    pub output_file: Option<PathBuf>,

    // === Sample generation ===
    /// Seed for generated samples
    pub seed: u64,

    /// Generated sample width in pixels
    pub sample_width: usize,

    /// Generated sample height in pixels
    pub sample_height: usize,

    // === Behavior ===
    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the statistics summary
    pub print_stats: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (without the program name).
    ///
    /// If no seed is given, a time-based seed is used for the sample size.
    /// `Ok(None)` means help was requested and printed.
    pub fn from_args(args: &[String]) -> Result<Option<Self>, String> {
        let mut command: Option<Command> = None;
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut width: Option<usize> = None;
        let mut height: Option<usize> = None;
        let mut print_config = false;
        let mut print_stats = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--width" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--width requires a number".to_string());
                    }
                    width = Some(args[i].parse().map_err(|_| "invalid width")?);
                }
                "--height" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--height requires a number".to_string());
                    }
                    height = Some(args[i].parse().map_err(|_| "invalid height")?);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--quiet" | "-q" => {
                    print_stats = false;
                }
                "--help" | "-h" => {
                    print_help();
                    return Ok(None);
                }
                other => match Command::parse(other) {
                    Some(parsed) if command.is_none() => command = Some(parsed),
                    Some(_) => return Err(format!("more than one command given: {}", other)),
                    None => return Err(format!("unknown argument: {}", other)),
                },
            }
            i += 1;
        }

        let command = command.unwrap_or(Command::Demo);
        match command {
            Command::Compress | Command::Decompress => {
                if input_file.is_none() || output_file.is_none() {
                    return Err(format!("{} requires --in and --out", command.name()));
                }
            }
            Command::Inspect => {
                if input_file.is_none() {
                    return Err("inspect requires --in".to_string());
                }
            }
            Command::Demo => {}
        }

        let seed = seed.unwrap_or_else(time_seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sample_width = width.unwrap_or_else(|| rng.gen_range(64..=512));
        let sample_height = height.unwrap_or_else(|| rng.gen_range(64..=512));

        if sample_width == 0 || sample_height == 0 {
            return Err("--width and --height must be at least 1".to_string());
        }
        match sample_width.checked_mul(sample_height) {
            Some(pixels) if pixels <= MAX_SAMPLE_PIXELS => {}
            _ => {
                return Err(format!(
                    "sample of {} x {} pixels exceeds the limit of {} pixels",
                    sample_width, sample_height, MAX_SAMPLE_PIXELS
                ))
            }
        }

        Ok(Some(Config {
            command,
            input_file,
            output_file,
            seed,
            sample_width,
            sample_height,
            print_config,
            print_stats,
        }))
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        let path = |p: &Option<PathBuf>| p.as_ref().map_or("(none)".to_string(), |p| p.display().to_string());

        println!("=== Configuration ===");
        println!("Command:     {}", self.command.name());
        println!("Input file:  {}", path(&self.input_file));
        println!("Output file: {}", path(&self.output_file));
        println!();
        if self.command == Command::Demo {
            println!("=== Sample ===");
            println!("Seed: {}", self.seed);
            println!("Size: {} x {} pixels", self.sample_width, self.sample_height);
            println!();
        }
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn print_help() {
    println!("huffpack: lossless Huffman compression for byte streams");
    println!();
    println!("USAGE:");
    println!("    huffpack [COMMAND] [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    compress      Encode --in into an artifact at --out");
    println!("    decompress    Decode the artifact at --in into --out");
    println!("    inspect       Print the header of the artifact at --in");
    println!("    demo          Round-trip a generated grayscale sample (default)");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>         Input file (demo: use this file instead of a sample)");
    println!("    --out <PATH>        Output file (demo: also save the generated sample)");
    println!("    --seed <N>          Random seed for the demo sample");
    println!("    --width <N>         Demo sample width (default: random 64-512)");
    println!("    --height <N>        Demo sample height (default: random 64-512)");
    println!();
    println!("    --print-config      Print resolved configuration");
    println!("    --quiet, -q         Don't print the statistics summary");
    println!("    --help, -h          Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffpack                                          # Demo with a random sample");
    println!("    huffpack demo --seed 42                           # Deterministic demo");
    println!("    huffpack compress --in gray.raw --out gray.hfpk   # Compress a file");
    println!("    huffpack decompress --in gray.hfpk --out back.raw");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_to_demo() {
        let config = Config::from_args(&[]).unwrap().unwrap();
        assert_eq!(config.command, Command::Demo);
        assert!(config.print_stats);
        assert!((64..=512).contains(&config.sample_width));
    }

    #[test]
    fn test_seed_makes_sample_size_reproducible() {
        let a = Config::from_args(&args(&["--seed", "42"])).unwrap().unwrap();
        let b = Config::from_args(&args(&["demo", "--seed", "42"])).unwrap().unwrap();
        assert_eq!(a.seed, 42);
        assert_eq!((a.sample_width, a.sample_height), (b.sample_width, b.sample_height));
    }

    #[test]
    fn test_compress_requires_paths() {
        assert!(Config::from_args(&args(&["compress", "--in", "a"])).is_err());

        let config = Config::from_args(&args(&["compress", "--in", "a", "--out", "b", "-q"]))
            .unwrap()
            .unwrap();
        assert_eq!(config.command, Command::Compress);
        assert_eq!(config.input_file, Some(PathBuf::from("a")));
        assert!(!config.print_stats);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Config::from_args(&args(&["--bogus"])).is_err());
        assert!(Config::from_args(&args(&["--seed", "x"])).is_err());
        assert!(Config::from_args(&args(&["--width"])).is_err());
        assert!(Config::from_args(&args(&["demo", "inspect"])).is_err());
    }

    #[test]
    fn test_explicit_dimensions() {
        let config = Config::from_args(&args(&["--width", "10", "--height", "20"]))
            .unwrap()
            .unwrap();
        assert_eq!((config.sample_width, config.sample_height), (10, 20));
    }

    #[test]
    fn test_rejects_oversized_dimensions() {
        let huge = usize::MAX.to_string();
        assert!(Config::from_args(&args(&["--width", huge.as_str(), "--height", "2"])).is_err());
        assert!(Config::from_args(&args(&["--width", "100000", "--height", "100000"])).is_err());
        assert!(Config::from_args(&args(&["--width", "0", "--height", "5"])).is_err());
        assert!(Config::from_args(&args(&["--width", "8192", "--height", "8192"])).is_ok());
    }
}
