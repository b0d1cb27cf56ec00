#![warn(missing_docs)]

//! High-level volumetric mesh kernel facade for atlas.
//!
//! Provides the [`Mesh`] type — a crease-aware tetrahedral/octahedral mesh
//! supporting smoothing subdivision and exact planar cross-sections — and
//! the [`Regions`] table mapping material ids to names and colors.
//!
//! # Example
//!
//! ```
//! use atlas_kernel::{CellRecord, Mesh, Point3};
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//! let cells = vec![CellRecord { vertices: vec![0, 1, 2, 3], material: 0 }];
//!
//! let mut mesh = Mesh::from_records(points, &cells).unwrap();
//! mesh.subdivide();
//! // One tetrahedron splits into four tetrahedra and one octahedron.
//! assert_eq!(mesh.topology().cell_count(), 5);
//! ```

pub use atlas_kernel_math;
pub use atlas_kernel_refine;
pub use atlas_kernel_section;
pub use atlas_kernel_topo;

mod error;
mod mesh;
mod regions;

pub use error::MeshError;
pub use mesh::{CellRecord, Mesh};
pub use regions::{Region, Regions};

pub use atlas_kernel_math::{midpoint, Point3, Transform, Vec3};
pub use atlas_kernel_section::{
    Contour, CrossSection, CuttingPlane, IntersectionIndex, MeshSection, SectionError,
};
pub use atlas_kernel_topo::{Geometry, Polyhedron, Shape, Topology, NULL_BOUNDARY};
