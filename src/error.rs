//! Structured error types for the cutpoint engine.

use thiserror::Error;

/// Unified error type for all cutpoint operations.
///
/// Per the engine's contract, absent data (an empty population, a class with
/// no samples) and degenerate fits (zero variance) are *not* errors — they
/// propagate as `Option::None` or NaN in the result data. The only failures
/// are boundary contract violations on malformed input.
#[derive(Debug, Error)]
pub enum CutpointError {
    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Values and ground-truth label columns have different lengths
    #[error("length mismatch: {values} values but {labels} ground-truth labels")]
    LengthMismatch { values: usize, labels: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CutpointError>;
