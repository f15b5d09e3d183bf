//! Deterministic seeded random numbers for procedural generation.
//!
//! [`SeededRandom`] is a 32-bit linear congruential generator. It is not
//! suitable for cryptography, but it is tiny, fast and bit-reproducible:
//! the same seed fed the same sequence of calls always yields the same values.
//!
//! # Example
//!
//! ```
//! use rhizome_resin_random::SeededRandom;
//!
//! let mut rng = SeededRandom::new(42);
//! let roll = rng.int_range(1, 6);
//! assert!((1..=6).contains(&roll));
//!
//! let point = rng.in_circle();
//! assert!(point.length() <= 1.0);
//! ```
//!
//! Generators are plain values. Give each caller (or worker thread) its own
//! instance instead of sharing one behind a lock.

use std::f64::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::DVec2;

mod error;

pub use error::RandomError;

/// LCG multiplier (Numerical Recipes).
const MULTIPLIER: u32 = 1_664_525;
/// LCG increment (Numerical Recipes).
const INCREMENT: u32 = 1_013_904_223;
/// 2^32, used to map the state into [0, 1).
const STATE_RANGE: f64 = 4_294_967_296.0;

/// Seeded pseudo-random number generator.
///
/// Every draw advances `seed = seed * 1664525 + 1013904223 (mod 2^32)`.
/// Gaussian draws produce deviates in pairs and cache the second one.
#[derive(Debug, Clone, PartialEq)]
pub struct SeededRandom {
    seed: u32,
    spare_normal: Option<f64>,
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl SeededRandom {
    /// Creates a generator with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            spare_normal: None,
        }
    }

    /// Creates a generator seeded from the system clock.
    pub fn from_entropy() -> Self {
        let seed = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_millis() as u32,
            Err(_) => 0,
        };
        tracing::debug!(seed, "seeded random generator from clock");
        Self::new(seed)
    }

    /// Returns the current internal state.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Replaces the internal state.
    ///
    /// Any cached Gaussian deviate is discarded, so a generator reseeded with
    /// `s` behaves exactly like `SeededRandom::new(s)`.
    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
        self.spare_normal = None;
    }

    /// Returns the next value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.seed as f64 / STATE_RANGE
    }

    /// Returns an integer in `[min, max]` (inclusive).
    ///
    /// Requires `min <= max`; other inputs give unspecified results. The span
    /// is taken in `i128`, so the full `i64` range is accepted.
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        let span = (max as i128 - min as i128 + 1) as f64;
        let offset = (self.next_f64() * span).floor() as i128;
        (min as i128 + offset).min(max as i128) as i64
    }

    /// Returns a float in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64() * (max - min) + min
    }

    /// Returns `true` roughly half of the time.
    pub fn next_bool(&mut self) -> bool {
        self.next_f64() > 0.5
    }

    /// Returns `-1.0` or `1.0` with equal probability.
    pub fn sign(&mut self) -> f64 {
        if self.next_bool() { 1.0 } else { -1.0 }
    }

    /// Returns an angle in radians in `[0, 2π)`.
    pub fn angle(&mut self) -> f64 {
        self.range(0.0, TAU)
    }

    /// Returns a uniformly distributed point inside the unit disk.
    ///
    /// The radius is `sqrt(u)`; a linear radius would cluster samples
    /// around the centre.
    pub fn in_circle(&mut self) -> DVec2 {
        let angle = self.angle();
        let radius = self.next_f64().sqrt();
        DVec2::new(angle.cos() * radius, angle.sin() * radius)
    }

    /// Returns a uniformly distributed point on the unit circle.
    pub fn on_circle(&mut self) -> DVec2 {
        let angle = self.angle();
        DVec2::new(angle.cos(), angle.sin())
    }

    /// Returns a standard normal deviate (mean 0, standard deviation 1).
    ///
    /// Uses the Box-Muller transform. Each pair of uniform draws yields two
    /// deviates; the second is returned by the following call.
    pub fn standard_normal(&mut self) -> f64 {
        if let Some(spare) = self.spare_normal.take() {
            return spare;
        }

        // ln(0) is -inf
        let mut u1 = self.next_f64();
        while u1 == 0.0 {
            u1 = self.next_f64();
        }
        let u2 = self.next_f64();

        let radius = (-2.0 * u1.ln()).sqrt();
        let theta = TAU * u2;
        self.spare_normal = Some(radius * theta.sin());
        radius * theta.cos()
    }

    /// Returns a normally distributed value with the given mean and standard deviation.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }

    /// Returns a uniformly chosen element.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RandomError> {
        if items.is_empty() {
            return Err(RandomError::EmptyInput);
        }
        let index = self.int_range(0, items.len() as i64 - 1) as usize;
        Ok(&items[index])
    }

    /// Returns an element chosen with probability proportional to its weight.
    ///
    /// Weights need not sum to one. If every weight is zero the last item is
    /// returned.
    pub fn weighted_choice<'a, T>(
        &mut self,
        items: &'a [T],
        weights: &[f64],
    ) -> Result<&'a T, RandomError> {
        if items.is_empty() {
            return Err(RandomError::EmptyInput);
        }
        if items.len() != weights.len() {
            return Err(RandomError::WeightMismatch {
                items: items.len(),
                weights: weights.len(),
            });
        }

        let total: f64 = weights.iter().sum();
        let target = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (item, weight) in items.iter().zip(weights) {
            cumulative += weight;
            if target < cumulative {
                return Ok(item);
            }
        }
        Ok(&items[items.len() - 1])
    }

    /// Shuffles a slice in place (Fisher-Yates).
    ///
    /// Walks `i` from the last index down to 1 and swaps with
    /// `j = int_range(0, i)`, so the permutation depends only on the seed.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.int_range(0, i as i64) as usize;
            items.swap(i, j);
        }
    }
}
