use thiserror::Error;

/// Errors returned by indexing and clustering in this crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Neighborhood radius is not a positive, finite number.
    #[error("invalid radius: eps must be positive and finite, got {eps}")]
    InvalidRadius {
        /// The rejected radius.
        eps: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameters {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A point has a NaN or infinite coordinate.
    #[error("invalid input: point {index} has a non-finite coordinate")]
    InvalidInput {
        /// Index of the first offending point.
        index: usize,
    },

    /// A neighbor query referenced a point that does not exist.
    #[error("point index {index} out of range for {len} points")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of indexed points.
        len: usize,
    },

    /// The point set is too large for 32-bit cluster labels.
    #[error("too many points: {len} exceeds the 32-bit label range")]
    TooManyPoints {
        /// Number of points supplied.
        len: usize,
    },

    /// Two labelings being compared have different lengths.
    #[error("label length mismatch: predicted {predicted}, truth {truth}")]
    LengthMismatch {
        /// Length of the predicted labeling.
        predicted: usize,
        /// Length of the reference labeling.
        truth: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
