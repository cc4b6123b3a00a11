//! Size and timing statistics for encode/decode runs.
//!
//! Statistics are plain data filled in by [`crate::encoder::encode_with_stats`]
//! and [`crate::decoder::decode_with_stats`]. Callers print them as a
//! human-readable summary or export them as `key=value` lines.

use std::time::Duration;

/// Statistics for one codec run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodecStats {
    // === Sizes ===
    /// Uncompressed length (input to encode, output of decode)
    pub input_bytes: u64,

    /// Total artifact length including header and checksum
    pub artifact_bytes: u64,

    /// Exact number of packed code bits
    pub payload_bits: u64,

    // === Code shape ===
    /// Number of distinct symbols in the input
    pub distinct_symbols: usize,

    /// Longest code length (0 when unknown or empty)
    pub max_code_len: usize,

    /// Shannon entropy of the input in bits per symbol
    pub entropy_bits: f64,

    // === Timing ===
    pub encode_time: Option<Duration>,
    pub decode_time: Option<Duration>,
}

impl CodecStats {
    /// Bytes occupied by the packed payload.
    pub fn payload_bytes(&self) -> u64 {
        self.payload_bits.div_ceil(8)
    }

    /// Bytes spent on everything but the payload.
    pub fn overhead_bytes(&self) -> u64 {
        self.artifact_bytes.saturating_sub(self.payload_bytes())
    }

    /// Compression ratio (artifact / input).
    ///
    /// Returns 0.0 for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.artifact_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average code length in bits per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.input_bytes as f64
        }
    }

    /// Average code length minus entropy; never negative for a prefix code.
    pub fn redundancy(&self) -> f64 {
        (self.bits_per_symbol() - self.entropy_bits).max(0.0)
    }

    /// Copy the decode timing of another run into this one.
    pub fn record_decode(&mut self, decoded: &CodecStats) {
        self.decode_time = decoded.decode_time;
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Codec Summary ===");
        println!("Input:    {} bytes", self.input_bytes);
        println!(
            "Artifact: {} bytes ({} header/checksum + {} payload)",
            self.artifact_bytes,
            self.overhead_bytes(),
            self.payload_bytes()
        );
        println!("Ratio:    {:.1}%", self.compression_ratio() * 100.0);
        println!();

        println!("=== Code ===");
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Max code length:  {} bits", self.max_code_len);
        println!("Bits per symbol:  {:.3}", self.bits_per_symbol());
        println!("Entropy:          {:.3} bits/symbol", self.entropy_bits);
        println!("Redundancy:       {:.3} bits/symbol", self.redundancy());
        println!();

        if self.encode_time.is_some() || self.decode_time.is_some() {
            println!("=== Timing ===");
            if let Some(t) = self.encode_time {
                println!("Encode: {:.3} ms", t.as_secs_f64() * 1000.0);
            }
            if let Some(t) = self.decode_time {
                println!("Decode: {:.3} ms", t.as_secs_f64() * 1000.0);
            }
            println!();
        }
    }

    /// Export stats as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "input_bytes={}\n\
             artifact_bytes={}\n\
             payload_bits={}\n\
             distinct_symbols={}\n\
             max_code_len={}\n\
             compression_ratio={:.4}\n\
             bits_per_symbol={:.4}\n\
             entropy_bits={:.4}\n",
            self.input_bytes,
            self.artifact_bytes,
            self.payload_bits,
            self.distinct_symbols,
            self.max_code_len,
            self.compression_ratio(),
            self.bits_per_symbol(),
            self.entropy_bits,
        )
    }
}
