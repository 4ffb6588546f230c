//! Fail-fast validation errors for the optimization engine.
//!
//! The engine never errors on account of unplaceable pieces or exhausted
//! stock — those are reported inside a successful [`crate::Result1D`] /
//! [`crate::Result2D`] (see `unplaced_pieces`). `EngineError` only covers
//! malformed input that must be rejected before placement starts.

use thiserror::Error;

/// Errors raised before optimization begins. See spec taxonomy `InvalidInput`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A piece or stock dimension was zero or negative.
    #[error("invalid dimension for {field}: {value} (must be > 0)")]
    InvalidDimension {
        /// Name of the offending field, e.g. `"piece.length"`.
        field: &'static str,
        /// The offending value, rendered for display.
        value: i64,
    },

    /// An unrecognized `algorithm` option string.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// An unrecognized `heuristic` option string.
    #[error("unknown heuristic: {0}")]
    UnknownHeuristic(String),

    /// An unrecognized `sortStrategy` option string.
    #[error("unknown sort strategy: {0}")]
    UnknownSortStrategy(String),
}

/// Result type used throughout the engine's validation paths.
pub type EngineResult<T> = Result<T, EngineError>;
