//! L-system procedural generation demo.
//!
//! Generates a fractal plant using an L-system and prints an ASCII preview.
//! Step lengths are jittered with gradient noise sampled at the turtle's
//! position.
//!
//! Run with: `cargo run --example procgen_lsystem [definition.json]`
//!
//! A definition file looks like:
//!
//! ```json
//! { "axiom": "X", "rules": { "X": "F[+X][-X]FX", "F": "FF" },
//!   "angle": 25.0, "step": 5.0, "generations": 4 }
//! ```

use std::f64::consts::FRAC_PI_2;

use anyhow::Context;
use rhizome_resin::lsystem::{
    InterpreterConfig, LSystem, LSystemDefinition, LSystemInterpreter, Turtle, path_to_polylines,
    presets,
};
use rhizome_resin::noise::{GradientNoise, Noise};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Refuse expansions larger than this many symbols.
const MAX_SYMBOLS: usize = 2_000_000;

#[derive(Debug, Deserialize)]
struct PlantFile {
    #[serde(flatten)]
    grammar: LSystemDefinition,
    #[serde(flatten)]
    turtle: InterpreterConfig,
    generations: usize,
}

fn load(path: Option<String>) -> anyhow::Result<(LSystem, InterpreterConfig, usize)> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path))?;
            let file: PlantFile = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse {}", path))?;
            info!(path = %path, axiom = %file.grammar.axiom, "loaded l-system definition");
            Ok((file.grammar.into(), file.turtle, file.generations))
        }
        None => Ok((
            presets::fractal_plant(),
            InterpreterConfig::default().with_angle(25.0).with_step(5.0),
            4,
        )),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let (mut lsystem, config, generations) = load(std::env::args().nth(1))?;

    let expected = lsystem.length_after(generations);
    if expected > MAX_SYMBOLS {
        anyhow::bail!(
            "{} generations would expand to {} symbols (limit {})",
            generations,
            expected,
            MAX_SYMBOLS
        );
    }

    // Show growth per generation
    for i in 1..=generations {
        info!(generation = i, symbols = lsystem.length_after(i), "expansion size");
    }

    let mut interpreter = LSystemInterpreter::from_config(&config);
    let noise = GradientNoise::with_seed(7);
    let step = config.step;
    interpreter.add_action('F', move |turtle| {
        let jitter = noise.noise_2d_vec(turtle.position() * 0.05);
        turtle.forward(step * (1.0 + 0.3 * jitter));
    });

    // Grow upwards on a y-down canvas.
    let mut turtle = Turtle::new(0.0, 0.0, -FRAC_PI_2);
    let path = interpreter.draw(&mut lsystem, generations, &mut turtle);

    if path.is_empty() {
        warn!("l-system produced no segments");
        return Ok(());
    }

    let polylines = path_to_polylines(path);
    info!(
        segments = path.len() / 2,
        polylines = polylines.len(),
        "interpreted l-system"
    );

    // Find bounding box
    let (min, max) = path.iter().fold(
        (path[0], path[0]),
        |(min, max), p| (min.min(*p), max.max(*p)),
    );
    println!(
        "Bounding box: ({:.1}, {:.1}) to ({:.1}, {:.1})",
        min.x, min.y, max.x, max.y
    );
    println!("Size: {:.1} x {:.1}", max.x - min.x, max.y - min.y);

    println!("\n=== ASCII Preview (60x30) ===\n");

    let width = 60;
    let height = 30;
    let mut canvas = vec![vec![' '; width]; height];

    let scale_x = (width - 1) as f64 / (max.x - min.x).max(0.001);
    let scale_y = (height - 1) as f64 / (max.y - min.y).max(0.001);

    for segment in path.chunks_exact(2) {
        let (start, end) = (segment[0], segment[1]);
        let x1 = (start.x - min.x) * scale_x;
        let y1 = (start.y - min.y) * scale_y;
        let x2 = (end.x - min.x) * scale_x;
        let y2 = (end.y - min.y) * scale_y;

        // Simple line drawing
        let steps = (x2 - x1).abs().max((y2 - y1).abs()).ceil() as usize + 1;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = (x1 + (x2 - x1) * t) as usize;
            let y = (y1 + (y2 - y1) * t) as usize;
            if x < width && y < height {
                canvas[y][x] = '*';
            }
        }
    }

    for row in &canvas {
        println!("{}", row.iter().collect::<String>());
    }

    Ok(())
}
