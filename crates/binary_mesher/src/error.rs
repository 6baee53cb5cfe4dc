//! Error types for the mesher.

use thiserror::Error;

/// Errors raised when a meshing call is given input it cannot accept.
///
/// The meshing pipeline itself never fails; every variant here is a
/// violation of the caller's input contract, reported before any work starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Diameter is zero, not a power of two, or wider than a sequence word.
    #[error("invalid chunk diameter {diameter}: must be a power of two in 1..={max}")]
    InvalidDimension {
        /// The rejected diameter.
        diameter: usize,
        /// Largest supported diameter.
        max: usize,
    },

    /// Occupancy slice length does not match `diameter³`.
    #[error("occupancy has {actual} cells, expected {expected}")]
    GridSizeMismatch {
        /// `diameter³`.
        expected: usize,
        /// Length of the slice that was passed in.
        actual: usize,
    },

    /// Cell coordinate outside `0..diameter` on some axis.
    #[error("cell {cell:?} is outside a {diameter}-wide chunk")]
    CellOutOfBounds {
        /// The rejected `[x, y, z]`.
        cell: [usize; 3],
        /// Chunk side length.
        diameter: usize,
    },

    /// Flat position array is not made of whole (x, y, z) triples.
    #[error("position array length {len} is not a multiple of 3")]
    RaggedPositions {
        /// Length of the slice that was passed in.
        len: usize,
    },

    /// Mesh settings failed validation.
    #[error("invalid mesh settings: {0}")]
    InvalidSettings(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MeshError>;
