//! Gradient noise for procedural generation.
//!
//! Provides seeded Perlin-style gradient noise and multi-octave fractal
//! composition over any generator implementing [`Noise`].
//!
//! # Example
//!
//! ```
//! use rhizome_resin_noise::{FractalNoise, GradientNoise, Noise};
//!
//! let noise = GradientNoise::with_seed(42);
//! let value = noise.noise_2d(1.5, 2.5);
//! assert!(value.abs() <= 1.2);
//!
//! let terrain = FractalNoise::new(&noise, 6, 0.5, 2.0);
//! let height = terrain.noise_2d(0.25, 0.75);
//! # let _ = height;
//! ```
//!
//! Values are nominally in `[-1, 1]` but are not clamped; gradient noise can
//! overshoot slightly.

use glam::{DVec2, DVec3};
use rhizome_resin_random::SeededRandom;

mod error;

pub use error::NoiseError;

// =============================================================================
// Noise Trait
// =============================================================================

/// A continuous noise function of up to three dimensions.
///
/// Only [`noise_3d`](Noise::noise_3d) is required. The lower-dimensional
/// variants default to sampling the 3D function with the missing axes at 0.
pub trait Noise {
    /// Samples the noise at `(x, y, z)`.
    fn noise_3d(&self, x: f64, y: f64, z: f64) -> f64;

    /// Samples the noise at `x`.
    fn noise_1d(&self, x: f64) -> f64 {
        self.noise_3d(x, 0.0, 0.0)
    }

    /// Samples the noise at `(x, y)`.
    fn noise_2d(&self, x: f64, y: f64) -> f64 {
        self.noise_3d(x, y, 0.0)
    }

    /// Samples the noise at `p`.
    fn noise_2d_vec(&self, p: DVec2) -> f64 {
        self.noise_2d(p.x, p.y)
    }

    /// Samples the noise at `p`.
    fn noise_3d_vec(&self, p: DVec3) -> f64 {
        self.noise_3d(p.x, p.y, p.z)
    }
}

impl<N: Noise + ?Sized> Noise for &N {
    fn noise_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).noise_3d(x, y, z)
    }

    fn noise_1d(&self, x: f64) -> f64 {
        (**self).noise_1d(x)
    }

    fn noise_2d(&self, x: f64, y: f64) -> f64 {
        (**self).noise_2d(x, y)
    }
}

impl<N: Noise + ?Sized> Noise for Box<N> {
    fn noise_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).noise_3d(x, y, z)
    }

    fn noise_1d(&self, x: f64) -> f64 {
        (**self).noise_1d(x)
    }

    fn noise_2d(&self, x: f64, y: f64) -> f64 {
        (**self).noise_2d(x, y)
    }
}

// =============================================================================
// Internal: gradient helpers
// =============================================================================

const TABLE_SIZE: usize = 256;

/// Permutation from Ken Perlin's reference implementation.
const REFERENCE_PERM: [u8; TABLE_SIZE] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Dot product of one of 12 edge gradients (4 duplicated to fill 16) with the offset.
#[inline]
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 != 0 { -u } else { u }) + (if h & 2 != 0 { -v } else { v })
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Lattice cell index in `0..256`.
#[inline]
fn cell(floor: f64) -> usize {
    (floor as i64 & 255) as usize
}

// =============================================================================
// Gradient Noise
// =============================================================================

/// Perlin-style gradient noise over a shuffled permutation table.
///
/// The table is a permutation of `0..=255` stored twice so lattice hashes
/// never need a modulo. It is built once and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u8>", into = "Vec<u8>"))]
pub struct GradientNoise {
    perm: [u8; TABLE_SIZE * 2],
}

impl Default for GradientNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl GradientNoise {
    /// Creates noise with a clock-seeded table. Output differs between runs.
    pub fn new() -> Self {
        Self::from_random(&mut SeededRandom::from_entropy())
    }

    /// Creates noise whose table is shuffled by `SeededRandom::new(seed)`.
    pub fn with_seed(seed: u32) -> Self {
        Self::from_random(&mut SeededRandom::new(seed))
    }

    /// Creates noise by shuffling the identity table with `rng`.
    pub fn from_random(rng: &mut SeededRandom) -> Self {
        let mut table: [u8; TABLE_SIZE] = std::array::from_fn(|i| i as u8);
        rng.shuffle(&mut table);
        Self::from_table(&table)
    }

    /// Creates noise from Ken Perlin's reference permutation.
    pub fn reference() -> Self {
        Self::from_table(&REFERENCE_PERM)
    }

    /// Creates noise from an explicit permutation of `0..=255`.
    pub fn from_permutation(table: &[u8]) -> Result<Self, NoiseError> {
        if table.len() != TABLE_SIZE {
            return Err(NoiseError::TableLength(table.len()));
        }
        let mut seen = [false; TABLE_SIZE];
        for &value in table {
            if std::mem::replace(&mut seen[value as usize], true) {
                return Err(NoiseError::DuplicateEntry(value));
            }
        }
        let mut fixed = [0u8; TABLE_SIZE];
        fixed.copy_from_slice(table);
        Ok(Self::from_table(&fixed))
    }

    fn from_table(table: &[u8; TABLE_SIZE]) -> Self {
        tracing::debug!(first = table[0], "built gradient noise table");
        let mut perm = [0u8; TABLE_SIZE * 2];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    /// Returns the 256-entry permutation.
    pub fn permutation(&self) -> &[u8] {
        &self.perm[..TABLE_SIZE]
    }
}

impl Noise for GradientNoise {
    fn noise_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
        let (xi, yi, zi) = (cell(fx), cell(fy), cell(fz));

        let x = x - fx;
        let y = y - fy;
        let z = z - fz;

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        let x1 = lerp(grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z), u);
        let x2 = lerp(
            grad(p[ab], x, y - 1.0, z),
            grad(p[bb], x - 1.0, y - 1.0, z),
            u,
        );
        let y1 = lerp(x1, x2, v);

        let x1 = lerp(
            grad(p[aa + 1], x, y, z - 1.0),
            grad(p[ba + 1], x - 1.0, y, z - 1.0),
            u,
        );
        let x2 = lerp(
            grad(p[ab + 1], x, y - 1.0, z - 1.0),
            grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
            u,
        );
        let y2 = lerp(x1, x2, v);

        lerp(y1, y2, w)
    }
}

impl TryFrom<Vec<u8>> for GradientNoise {
    type Error = NoiseError;

    fn try_from(table: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_permutation(&table)
    }
}

impl From<GradientNoise> for Vec<u8> {
    fn from(noise: GradientNoise) -> Self {
        noise.permutation().to_vec()
    }
}

// =============================================================================
// Fractal Noise
// =============================================================================

/// Multi-octave composition of another noise function.
///
/// Each octave samples the base noise at `lacunarity` times the previous
/// frequency and `persistence` times the previous amplitude. The sum is
/// divided by the total amplitude, so the output stays in the base noise's
/// range whatever the octave count.
///
/// `octaves` must be at least 1: with zero octaves the result is `0 / 0`,
/// i.e. NaN.
///
/// ```
/// use rhizome_resin_noise::{FractalNoise, GradientNoise, Noise};
///
/// let fbm = FractalNoise::with_defaults(GradientNoise::with_seed(7))
///     .octaves(5)
///     .persistence(0.6);
///
/// let value = fbm.noise_3d(1.0, 2.0, 3.0);
/// # let _ = value;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FractalNoise<N> {
    /// Base noise function.
    pub noise: N,
    /// Number of noise layers.
    pub octaves: u32,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
}

impl<N> FractalNoise<N> {
    /// Creates fractal noise with explicit parameters.
    pub fn new(noise: N, octaves: u32, persistence: f64, lacunarity: f64) -> Self {
        Self {
            noise,
            octaves,
            persistence,
            lacunarity,
        }
    }

    /// Creates fractal noise with 4 octaves, 0.5 persistence and 2.0 lacunarity.
    pub fn with_defaults(noise: N) -> Self {
        Self::new(noise, 4, 0.5, 2.0)
    }

    /// Sets the number of octaves.
    pub fn octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Sets the persistence (amplitude multiplier per octave).
    pub fn persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Sets the lacunarity (frequency multiplier per octave).
    pub fn lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Sums `octaves` layers of `sample(frequency)`, normalized by total amplitude.
    #[inline]
    fn accumulate(&self, mut sample: impl FnMut(f64) -> f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..self.octaves {
            value += amplitude * sample(frequency);
            max_value += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        value / max_value
    }
}

impl<N: Noise> Noise for FractalNoise<N> {
    fn noise_1d(&self, x: f64) -> f64 {
        self.accumulate(|f| self.noise.noise_1d(x * f))
    }

    fn noise_2d(&self, x: f64, y: f64) -> f64 {
        self.accumulate(|f| self.noise.noise_2d(x * f, y * f))
    }

    fn noise_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.accumulate(|f| self.noise.noise_3d(x * f, y * f, z * f))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_reference_table_matches_perlin() {
        // Published value for Ken Perlin's improved noise.
        let noise = GradientNoise::reference();
        let v = noise.noise_3d(3.14, 42.0, 7.0);
        assert!((v - 0.136_919_958_784).abs() < 1e-9, "got {}", v);
    }

    #[test]
    fn test_seeded_table_is_reproducible() {
        let noise = GradientNoise::with_seed(42);
        assert_eq!(&noise.permutation()[..8], &[54, 66, 134, 9, 51, 186, 175, 112]);

        let v = noise.noise_3d(1.5, 2.25, -3.75);
        assert!((v - 0.131_163_597_106_933_6).abs() < EPSILON, "got {}", v);
        let v = noise.noise_1d(0.3);
        assert!((v - -0.251_076).abs() < EPSILON, "got {}", v);
        let v = noise.noise_2d(10.7, -4.2);
        assert!((v - 0.235_092_949_760_000_7).abs() < EPSILON, "got {}", v);

        assert_eq!(noise, GradientNoise::with_seed(42));
    }

    #[test]
    fn test_every_constructor_logs_table_build() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        struct TableBuilds(Arc<AtomicUsize>);

        impl<S: tracing::Subscriber> Layer<S> for TableBuilds {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                if event.metadata().level() == &tracing::Level::DEBUG
                    && event.metadata().target() == env!("CARGO_CRATE_NAME")
                {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        let builds = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(TableBuilds(builds.clone()));
        tracing::subscriber::with_default(subscriber, || {
            GradientNoise::new();
            GradientNoise::with_seed(3);
            GradientNoise::reference();
            GradientNoise::from_permutation(&REFERENCE_PERM).unwrap();
        });
        assert_eq!(builds.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_table_is_permutation() {
        for seed in [0, 1, 42, u32::MAX] {
            let noise = GradientNoise::with_seed(seed);
            let mut sorted = noise.permutation().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..=255).collect::<Vec<u8>>());
            assert_eq!(&noise.perm[..TABLE_SIZE], &noise.perm[TABLE_SIZE..]);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = GradientNoise::with_seed(1);
        let b = GradientNoise::with_seed(2);
        assert_ne!(a.permutation(), b.permutation());
    }

    #[test]
    fn test_from_permutation_validates() {
        let identity: Vec<u8> = (0..=255).collect();
        assert!(GradientNoise::from_permutation(&identity).is_ok());

        assert_eq!(
            GradientNoise::from_permutation(&identity[..10]),
            Err(NoiseError::TableLength(10))
        );

        let mut repeated = identity.clone();
        repeated[200] = 7;
        assert_eq!(
            GradientNoise::from_permutation(&repeated),
            Err(NoiseError::DuplicateEntry(7))
        );

        let reference = GradientNoise::reference();
        let rebuilt = GradientNoise::try_from(Vec::from(reference.clone()));
        assert_eq!(rebuilt, Ok(reference));
    }

    #[test]
    fn test_lower_dimensions_fix_missing_axes() {
        let noise = GradientNoise::with_seed(9);
        for i in 0..200 {
            let x = i as f64 * 0.173 - 17.0;
            let y = i as f64 * 0.291 + 3.0;
            assert_eq!(noise.noise_1d(x), noise.noise_3d(x, 0.0, 0.0));
            assert_eq!(noise.noise_2d(x, y), noise.noise_3d(x, y, 0.0));
            assert_eq!(noise.noise_2d_vec(DVec2::new(x, y)), noise.noise_2d(x, y));
        }
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let noise = GradientNoise::with_seed(5);
        for x in -5..5 {
            for y in -5..5 {
                assert_eq!(noise.noise_3d(x as f64, y as f64, 2.0), 0.0);
            }
        }
    }

    #[test]
    fn test_continuity() {
        let noise = GradientNoise::with_seed(42);
        for i in -10_000..10_000 {
            let x = i as f64 * 0.01;
            let delta = (noise.noise_1d(x) - noise.noise_1d(x + 0.001)).abs();
            assert!(delta < 0.05, "jump of {} at x = {}", delta, x);
        }
    }

    #[test]
    fn test_boundedness() {
        let noise = GradientNoise::with_seed(42);
        let mut rng = SeededRandom::new(1);
        for _ in 0..100_000 {
            let x = rng.range(-100.0, 100.0);
            let y = rng.range(-100.0, 100.0);
            let z = rng.range(-100.0, 100.0);
            let v = noise.noise_3d(x, y, z);
            assert!(
                (-1.2..=1.2).contains(&v),
                "noise_3d({}, {}, {}) = {} out of range",
                x,
                y,
                z,
                v
            );
        }
    }

    #[test]
    fn test_non_finite_input_propagates() {
        let noise = GradientNoise::with_seed(1);
        assert!(noise.noise_3d(f64::NAN, 0.5, 0.5).is_nan());
    }

    #[test]
    fn test_fractal_single_octave_matches_base() {
        let base = GradientNoise::with_seed(3);
        let fbm = FractalNoise::new(&base, 1, 0.5, 2.0);
        for i in 0..100 {
            let x = i as f64 * 0.37;
            assert_eq!(fbm.noise_2d(x, -x), base.noise_2d(x, -x));
        }
    }

    #[test]
    fn test_fractal_zero_octaves_is_nan() {
        let fbm = FractalNoise::new(GradientNoise::with_seed(3), 0, 0.5, 2.0);
        assert!(fbm.noise_1d(0.5).is_nan());
    }

    #[test]
    fn test_fractal_normalization() {
        let base = GradientNoise::with_seed(42);
        let mut maxima = Vec::new();

        for octaves in 1..=8 {
            let fbm = FractalNoise::new(&base, octaves, 0.5, 2.0);
            let mut rng = SeededRandom::new(100);
            let mut max_abs: f64 = 0.0;
            for _ in 0..10_000 {
                let v = fbm.noise_3d(
                    rng.range(-50.0, 50.0),
                    rng.range(-50.0, 50.0),
                    rng.range(-50.0, 50.0),
                );
                max_abs = max_abs.max(v.abs());
            }
            assert!(max_abs <= 1.2, "octaves {}: max {}", octaves, max_abs);
            maxima.push(max_abs);
        }

        assert!(maxima[7] <= maxima[0] * 1.25, "maxima = {:?}", maxima);
    }

    #[test]
    fn test_fractal_over_custom_noise() {
        struct Constant(f64);

        impl Noise for Constant {
            fn noise_3d(&self, _x: f64, _y: f64, _z: f64) -> f64 {
                self.0
            }
        }

        let fbm = FractalNoise::with_defaults(Constant(0.25)).octaves(6);
        assert!((fbm.noise_1d(3.0) - 0.25).abs() < EPSILON);
        assert!((fbm.noise_3d(1.0, 2.0, 3.0) - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_fractal_boxed_dynamic_noise() {
        let boxed: Box<dyn Noise> = Box::new(GradientNoise::with_seed(11));
        let fbm = FractalNoise::with_defaults(boxed);
        let direct = FractalNoise::with_defaults(GradientNoise::with_seed(11));
        assert_eq!(fbm.noise_2d(0.3, 0.7), direct.noise_2d(0.3, 0.7));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let fbm = FractalNoise::new(GradientNoise::with_seed(21), 5, 0.45, 2.1);
        let json = serde_json::to_string(&fbm).unwrap();
        let restored: FractalNoise<GradientNoise> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, fbm);

        let bad = r#"{"noise":[1,2,3],"octaves":1,"persistence":0.5,"lacunarity":2.0}"#;
        assert!(serde_json::from_str::<FractalNoise<GradientNoise>>(bad).is_err());
    }
}
