//! The volumetric mesh and its editing operations.

use atlas_kernel_math::{Point3, Transform};
use atlas_kernel_refine::detect_creases;
use atlas_kernel_section::{section_mesh, CuttingPlane, IntersectionIndex, MeshSection};
use atlas_kernel_topo::{Geometry, Polyhedron, Topology, TopologyError};
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// Raw cell as read from an input file: vertex indices plus a material id.
///
/// Four vertices make a tetrahedron, six an octahedron; any other arity is
/// rejected when the mesh is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Indices into the point list.
    pub vertices: Vec<u32>,
    /// Material (partition) id of the cell.
    pub material: i32,
}

/// A crease-aware tetrahedral/octahedral mesh.
///
/// Owns one [`Geometry`] and one [`Topology`]; the topology's crease
/// structure is derived once at assembly and propagated combinatorially
/// through subdivision, never re-detected.
///
/// Every edit bumps a revision counter so that plane-intersection caches
/// (see [`IntersectionIndex`]) can refresh lazily.
#[derive(Debug, Clone)]
pub struct Mesh {
    topology: Topology,
    geometry: Geometry,
    subdivision_level: u32,
    revision: u64,
}

impl Mesh {
    /// Assemble a mesh from raw points and cell records.
    ///
    /// Validates cell arity, then runs crease detection over the whole cell
    /// complex. Fails if any face is shared by more than two cells.
    pub fn from_records(points: Vec<Point3>, cells: &[CellRecord]) -> Result<Self, MeshError> {
        let polyhedra = cells
            .iter()
            .map(|c| Polyhedron::from_record(&c.vertices, c.material))
            .collect::<Result<Vec<_>, _>>()?;
        let topology = detect_creases(polyhedra)?;
        Ok(Self {
            topology,
            geometry: Geometry::new(points),
            subdivision_level: 0,
            revision: 0,
        })
    }

    /// Assemble a mesh from already-detected topology and points.
    pub fn new(topology: Topology, geometry: Geometry) -> Self {
        Self {
            topology,
            geometry,
            subdivision_level: 0,
            revision: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The cell complex and its crease structure.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The point store.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// How many subdivision passes have run.
    pub fn subdivision_level(&self) -> u32 {
        self.subdivision_level
    }

    /// Revision counter, bumped by every edit.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Arithmetic mean of all vertices.
    pub fn centroid(&self) -> Point3 {
        self.geometry.centroid()
    }

    /// Largest distance from the origin to any vertex.
    pub fn bounding_radius(&self) -> f64 {
        self.geometry.bounding_radius()
    }

    /// Distinct material ids present in the mesh, sorted ascending.
    pub fn partition_ids(&self) -> Vec<i32> {
        self.topology.partition_ids()
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Run one crease-aware subdivision pass (split then smooth).
    pub fn subdivide(&mut self) {
        self.topology = atlas_kernel_refine::subdivide(&self.topology, &mut self.geometry);
        self.subdivision_level += 1;
        self.revision += 1;
    }

    /// Replace every vertex position, keeping the topology.
    ///
    /// The entry point for externally fitted geometry; the replacement must
    /// have exactly as many points as the current geometry.
    pub fn set_geometry(&mut self, points: Vec<Point3>) -> Result<(), TopologyError> {
        if points.len() != self.geometry.len() {
            return Err(TopologyError::GeometryLengthMismatch {
                expected: self.geometry.len(),
                got: points.len(),
            });
        }
        self.geometry = Geometry::new(points);
        self.revision += 1;
        Ok(())
    }

    /// Apply an affine transform to every vertex, in place.
    pub fn transform(&mut self, t: &Transform) {
        self.geometry.transform(t);
        self.revision += 1;
    }

    // =========================================================================
    // Sectioning
    // =========================================================================

    /// Cross-section the mesh with a cutting plane.
    ///
    /// The index narrows the cut to cells straddling the plane and is
    /// refreshed here against the current mesh revision, so the same index
    /// can be reused across plane moves and mesh edits.
    pub fn section(&self, plane: &CuttingPlane, index: &mut IntersectionIndex) -> MeshSection {
        let cells = index
            .refresh(&self.topology, &self.geometry, plane, self.revision)
            .to_vec();
        section_mesh(&self.topology, &self.geometry, plane, &cells)
    }
}
