//! Facade-level error type.

use atlas_kernel_refine::RefineError;
use atlas_kernel_topo::TopologyError;
use thiserror::Error;

/// Errors raised while assembling or editing a [`crate::Mesh`].
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    /// A cell record or geometry edit was structurally invalid.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// Crease detection rejected the cell complex.
    #[error(transparent)]
    Refine(#[from] RefineError),
}
