#![warn(missing_docs)]

//! Crease detection and crease-aware subdivision.
//!
//! [`detect_creases`] runs once over raw cells to derive the crease faces,
//! edges, and points of a mesh. [`subdivide`] performs one refinement pass:
//! a linear split of every cell, face, and edge, followed by a smoothing
//! step that repositions every vertex with degree-dependent stencils.

mod creases;
mod error;
mod smooth;
mod subdivide;

pub use creases::detect_creases;
pub use error::RefineError;
pub use subdivide::subdivide;
