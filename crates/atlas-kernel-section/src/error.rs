//! Error type for cross-section computation.

use atlas_kernel_topo::TopologyError;
use thiserror::Error;

/// Per-cell failures of the cross-section engine.
///
/// These are recoverable: a batch pass skips the offending cell and reports
/// it, rather than discarding the sections of every other cell.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SectionError {
    /// The traversal entered a face with no other intersecting edge, which
    /// means the plane-vertex sign classification is inconsistent.
    #[error("face {face} of the cell has no further intersecting edge")]
    NoIntersectingEdge {
        /// Local face index the traversal was on.
        face: u8,
    },

    /// A structural inconsistency in the cell's tables.
    #[error(transparent)]
    Topology(#[from] TopologyError),
}
