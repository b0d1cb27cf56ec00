//! Error type for the refinement passes.

use atlas_kernel_topo::FaceKey;
use thiserror::Error;

/// Fatal structural errors raised by crease detection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefineError {
    /// A face shared by more than two cells.
    #[error("face {0:?} is shared by more than two cells; the mesh is non-manifold")]
    NonManifoldFace(FaceKey),
}
