//! Error types for resin-noise.

use thiserror::Error;

/// Errors raised when building a [`GradientNoise`](crate::GradientNoise) from an explicit table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoiseError {
    /// The table does not have exactly 256 entries.
    #[error("permutation table must have 256 entries, got {0}")]
    TableLength(usize),

    /// A value appears more than once, so the table is not a permutation of 0..=255.
    #[error("permutation table repeats value {0}")]
    DuplicateEntry(u8),
}
