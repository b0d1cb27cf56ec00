#![warn(missing_docs)]

//! Cutting plane and cross-section computation.
//!
//! A [`CuttingPlane`] slides along a rotatable axis sized to the mesh. The
//! [`IntersectionIndex`] is the broad phase: it lazily tracks which cells
//! straddle the plane. For each straddling cell, [`cross_section`] walks the
//! cell surface and returns the exact intersection polygon(s) with per-edge
//! crease tags; [`section_mesh`] runs that over the whole index, collecting
//! per-cell failures as diagnostics instead of aborting the pass.

mod cross_section;
mod engine;
mod error;
mod index;
mod plane;

pub use cross_section::{Contour, CrossSection};
pub use engine::{cross_section, nudged_plane_point, section_mesh, MeshSection};
pub use error::SectionError;
pub use index::IntersectionIndex;
pub use plane::CuttingPlane;
