#![warn(missing_docs)]

//! Topological data model for the atlas volumetric mesh kernel.
//!
//! A mesh is an indexed [`Geometry`] (flat point store) plus a [`Topology`]
//! holding the tetrahedral/octahedral cells and the derived crease
//! structures: crease faces (two differing materials), crease edges (three
//! or more materials), and crease points (more than two crease edges).
//!
//! All topological elements reference vertices by index into one `Geometry`;
//! nothing in this crate copies coordinates.

mod cell;
mod edge;
mod error;
mod face;
mod geometry;
mod topology;

pub use cell::{FaceSet, Polyhedron, Shape, OCT_FACES, TET_FACES};
pub use edge::{Edge, EdgeKey};
pub use error::TopologyError;
pub use face::{Face, FaceKey};
pub use geometry::{Geometry, GeometryMap};
pub use topology::Topology;

/// Sentinel material id for "outside the mesh".
///
/// A face seen by only one cell during crease detection gets this as its
/// back material, which makes every outer-surface face a crease face.
pub const NULL_BOUNDARY: i32 = -99;
