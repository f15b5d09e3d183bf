//! Generative building blocks: seeded randomness, gradient noise and L-systems.
//!
//! Re-exports the individual crates under short module names:
//!
//! ```
//! use rhizome_resin::noise::{GradientNoise, Noise};
//! use rhizome_resin::random::SeededRandom;
//!
//! let mut rng = SeededRandom::new(7);
//! let noise = GradientNoise::from_random(&mut rng);
//! let _ = noise.noise_2d(0.5, 0.5);
//! ```

pub use rhizome_resin_lsystem as lsystem;
pub use rhizome_resin_noise as noise;
pub use rhizome_resin_random as random;
