//! Noise texture generation demo.
//!
//! Generates a texture using layered gradient noise (fractal noise)
//! and exports it as a PNG.
//!
//! Run with: `cargo run --example noise_texture [seed]`

use anyhow::Context;
use image::{GrayImage, Luma, Rgb, RgbImage};
use rhizome_resin::noise::{FractalNoise, GradientNoise, Noise};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u32>().context("seed must be a u32")?,
        None => 42,
    };
    info!(seed, "generating noise texture");

    let base = GradientNoise::with_seed(seed);
    let noise = FractalNoise::new(&base, 6, 0.5, 2.0);

    let width = 512u32;
    let height = 512u32;

    let image = GrayImage::from_fn(width, height, |x, y| {
        // Scale UV to get nice detail
        let u = x as f64 / width as f64 * 8.0;
        let v = y as f64 / height as f64 * 8.0;
        Luma([to_byte(noise.noise_2d(u, v))])
    });

    let output_path = "noise_texture_output.png";
    image
        .save(output_path)
        .with_context(|| format!("failed to write {}", output_path))?;
    info!(path = output_path, "wrote greyscale texture");

    // Domain warping: offset UV by noise, then sample a second field.
    info!("generating warped color texture");
    let second = GradientNoise::with_seed(seed.wrapping_add(81));
    let colors = RgbImage::from_fn(width, height, |x, y| {
        let u = x as f64 / width as f64 * 4.0;
        let v = y as f64 / height as f64 * 4.0;

        let warp_x = noise.noise_2d(u, v) * 0.5;
        let warp_y = noise.noise_2d(u + 5.2, v + 1.3) * 0.5;

        let n1 = noise.noise_2d(u + warp_x, v + warp_y);
        let n2 = second.noise_3d(u + warp_x, v + warp_y, 0.5);

        Rgb([to_byte(n1), to_byte((n1 + n2) * 0.5), to_byte(n2)])
    });

    let output_path = "noise_texture_warped.png";
    colors
        .save(output_path)
        .with_context(|| format!("failed to write {}", output_path))?;
    info!(path = output_path, "wrote warped texture");

    Ok(())
}

/// Maps noise in roughly [-1, 1] to a byte.
fn to_byte(value: f64) -> u8 {
    ((value * 0.5 + 0.5).clamp(0.0, 1.0) * 255.0).round() as u8
}
