//! Error types for grid descriptor operations.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised while building or combining grid descriptors.
///
/// All of these are data or programming errors: the computations are
/// deterministic, so retrying a failed call reproduces the same failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// Unknown reconciliation mode, non-positive resolution, or a malformed
    /// input mapping (missing or non-numeric fields).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Bounds, resolution and dimensions do not agree within tolerance.
    #[error("inconsistent grid: {0}")]
    InconsistentGrid(String),

    /// The grids do not overlap, or their overlap is smaller than two cells
    /// along an axis.
    #[error("no intersection: {0}")]
    NoIntersection(String),
}

impl GridError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an InconsistentGrid error.
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        Self::InconsistentGrid(msg.into())
    }

    /// Create a NoIntersection error.
    pub fn no_intersection(msg: impl Into<String>) -> Self {
        Self::NoIntersection(msg.into())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::InvalidArgument(format!("malformed grid mapping: {}", err))
    }
}
