//! Structural error type for the topology crate.

use thiserror::Error;

/// Errors indicating malformed mesh data.
///
/// These are fatal to the operation that detected them; recoverable
/// per-element conditions live in the crates that own those passes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A cell record with an unsupported vertex count.
    #[error("a cell must have 4 (tetrahedron) or 6 (octahedron) vertices, got {0}")]
    InvalidCellArity(usize),

    /// Two local vertex indices that are not joined by an edge of the cell.
    #[error("local vertices {0} and {1} do not form an edge of this cell")]
    NotAnEdge(u8, u8),

    /// A replacement point array whose length differs from the current one.
    #[error("replacement geometry has {got} points, expected {expected}")]
    GeometryLengthMismatch {
        /// Number of points in the current geometry.
        expected: usize,
        /// Number of points supplied.
        got: usize,
    },
}
