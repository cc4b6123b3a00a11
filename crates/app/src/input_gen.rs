//! Synthetic grayscale sample generation.
//!
//! When no input file is given, the demo compresses a generated image whose
//! pixels look like a real grayscale photo reduced to one byte per pixel.
//!
//! # Design
//!
//! The image is split into 32x32 tiles, each filled with one of:
//! - a flat region (one value, highly compressible)
//! - a smooth gradient (narrow band of values)
//! - a gradient with sensor-like noise
//! - uniform noise (incompressible)
//!
//! This makes the compression behavior visible in the stats.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;

const TILE: usize = 32;

/// Generate `width * height` grayscale samples in row-major order.
pub fn generate_grayscale(seed: u64, width: usize, height: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pixels = vec![0u8; width * height];

    for tile_y in (0..height).step_by(TILE) {
        for tile_x in (0..width).step_by(TILE) {
            let kind: u8 = rng.gen_range(0..10);
            let base: i32 = rng.gen_range(0..=255);
            let slope: i32 = rng.gen_range(-3..=3);
            let noise: i32 = if kind < 7 { 0 } else { rng.gen_range(2..=12) };

            for y in tile_y..(tile_y + TILE).min(height) {
                for x in tile_x..(tile_x + TILE).min(width) {
                    let dx = (x - tile_x) as i32;
                    let dy = (y - tile_y) as i32;
                    let value = match kind {
                        // 40% flat
                        0..=3 => base,
                        // 30% smooth gradient
                        4..=6 => base + slope * (dx + dy) / 2,
                        // 20% noisy gradient
                        7..=8 => base + slope * dx + rng.gen_range(-noise..=noise),
                        // 10% noise
                        _ => rng.gen_range(0..=255),
                    };
                    pixels[y * width + x] = value.clamp(0, 255) as u8;
                }
            }
        }
    }

    pixels
}

/// Write generated samples to a file as raw bytes.
pub fn write_sample_file(path: &std::path::Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        assert_eq!(generate_grayscale(42, 100, 30).len(), 3000);
        assert_eq!(generate_grayscale(42, 0, 30).len(), 0);
        assert_eq!(generate_grayscale(42, 1, 1).len(), 1);
    }

    #[test]
    fn test_determinism() {
        assert_eq!(generate_grayscale(12345, 64, 64), generate_grayscale(12345, 64, 64));
    }

    #[test]
    fn test_different_seeds() {
        assert_ne!(generate_grayscale(1, 64, 64), generate_grayscale(2, 64, 64));
    }

    #[test]
    fn test_sample_compresses() {
        let data = generate_grayscale(7, 256, 256);
        let artifact = huffpack_core::encode(&data).unwrap();
        assert!(artifact.len() < data.len());
    }

    #[test]
    fn test_write_sample_file() {
        let path = std::env::temp_dir().join(format!("huffpack-sample-{}.raw", std::process::id()));
        let data = generate_grayscale(3, 40, 20);
        write_sample_file(&path, &data).unwrap();
        let written = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written, data);
    }
}
