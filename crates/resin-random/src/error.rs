//! Error types for resin-random.

use thiserror::Error;

/// Errors returned by selection helpers on [`SeededRandom`](crate::SeededRandom).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomError {
    /// A selection was requested from an empty collection.
    #[error("cannot choose from an empty collection")]
    EmptyInput,

    /// Item and weight slices have different lengths.
    #[error("weight count mismatch: {items} items, {weights} weights")]
    WeightMismatch {
        /// Number of items supplied.
        items: usize,
        /// Number of weights supplied.
        weights: usize,
    },
}
