//! Error types for gridnear.

use thiserror::Error;

/// Errors raised while validating inputs to a nearest-neighbor query.
///
/// Every variant is a deterministic input-validation failure. Nothing is
/// computed or partially returned once one of these is raised.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NearestError {
    /// Grid or query configuration cannot describe a usable grid.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What was wrong with it.
        reason: String,
    },

    /// A point has a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
    },

    /// A flat coordinate buffer does not hold whole `(x, y)` pairs.
    #[error("flat coordinate buffer has odd length {len}")]
    OddCoordinateCount {
        /// Length of the buffer.
        len: usize,
    },

    /// The radius band is inverted or negative.
    #[error("invalid radius band: min {min}, max {max}")]
    InvalidRadiusBand {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A grid index was used with a point set it was not built from.
    #[error("grid indexes {grid} points but the point set has {points}")]
    PointCountMismatch {
        /// Number of points held by the grid.
        grid: usize,
        /// Number of points in the point set.
        points: usize,
    },

    /// Two neighbor results of different length were compared.
    #[error("cannot compare results of length {left} and {right}")]
    LengthMismatch {
        /// Length of the first result.
        left: usize,
        /// Length of the second result.
        right: usize,
    },
}

impl NearestError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NearestError>;
