//! Broad-phase index of cells straddling the cutting plane.

use atlas_kernel_math::{Point3, Vec3};
use atlas_kernel_topo::{Geometry, Polyhedron, Topology};

use crate::plane::CuttingPlane;

/// Lazily maintained set of cell indices whose vertices straddle the plane.
///
/// The full scan is O(cells x vertices-per-cell), so it only reruns when
/// the plane revision or the caller-supplied mesh revision moved since the
/// last refresh.
#[derive(Debug, Clone, Default)]
pub struct IntersectionIndex {
    cells: Vec<u32>,
    plane_revision: Option<u64>,
    mesh_revision: u64,
}

impl IntersectionIndex {
    /// An index that has never been refreshed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Straddling cell indices as of the last refresh.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Force the next refresh to rescan.
    pub fn invalidate(&mut self) {
        self.plane_revision = None;
    }

    /// Rescan if the plane or mesh changed, then return the cell indices.
    pub fn refresh(
        &mut self,
        topology: &Topology,
        geometry: &Geometry,
        plane: &CuttingPlane,
        mesh_revision: u64,
    ) -> &[u32] {
        let stale = self.plane_revision != Some(plane.revision())
            || self.mesh_revision != mesh_revision;
        if stale {
            let point = plane.point();
            let normal = plane.normal();
            self.cells = topology
                .polyhedra
                .iter()
                .enumerate()
                .filter(|(_, cell)| straddles(cell, geometry, &point, &normal))
                .map(|(i, _)| i as u32)
                .collect();
            self.plane_revision = Some(plane.revision());
            self.mesh_revision = mesh_revision;
        }
        &self.cells
    }
}

/// Whether the cell has vertices on both sides of the plane. A vertex
/// exactly on the plane counts for both sides.
fn straddles(cell: &Polyhedron, geometry: &Geometry, point: &Point3, normal: &Vec3) -> bool {
    let mut ahead = false;
    let mut behind = false;
    for &v in cell.vertices() {
        let d = (geometry.get(v) - point).dot(normal);
        if d > 0.0 {
            ahead = true;
        } else if d < 0.0 {
            behind = true;
        } else {
            ahead = true;
            behind = true;
        }
    }
    ahead && behind
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked_tets() -> (Topology, Geometry) {
        // One tet below z = 1, one above, sharing no vertices.
        let geometry = Geometry::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.5),
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(0.0, 1.0, 2.0),
            Point3::new(0.0, 0.0, 3.0),
        ]);
        let topology = Topology::from_cells(vec![
            Polyhedron::tetrahedron([0, 1, 2, 3], 1),
            Polyhedron::tetrahedron([4, 5, 6, 7], 1),
        ]);
        (topology, geometry)
    }

    #[test]
    fn test_straddle_classification() {
        let (topo, g) = stacked_tets();
        let mut plane = CuttingPlane::from_geometry(&g);
        plane.set_offset(0.25 / plane.radius()); // z = 0.25

        let mut index = IntersectionIndex::new();
        assert_eq!(index.refresh(&topo, &g, &plane, 0), &[0]);

        plane.set_offset(2.5 / plane.radius()); // z = 2.5
        assert_eq!(index.refresh(&topo, &g, &plane, 0), &[1]);
    }

    #[test]
    fn test_vertex_on_plane_counts_for_both_sides() {
        let g = Geometry::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ]);
        let cell = Polyhedron::tetrahedron([0, 1, 2, 3], 1);
        // Plane through z = 0 touches the base triangle.
        let plane = CuttingPlane::new(1.0);
        assert!(straddles(&cell, &g, &plane.point(), &plane.normal()));
    }

    #[test]
    fn test_refresh_is_lazy_until_a_revision_moves() {
        let (topo, g) = stacked_tets();
        let mut plane = CuttingPlane::from_geometry(&g);
        plane.set_offset(0.25 / plane.radius());

        let mut index = IntersectionIndex::new();
        index.refresh(&topo, &g, &plane, 0);
        assert_eq!(index.cells(), &[0]);

        // Same revisions: a mesh edit alone is not observed.
        let mut moved = g.clone();
        moved.set(7, Point3::new(0.0, 0.0, 0.2));
        index.refresh(&topo, &moved, &plane, 0);
        assert_eq!(index.cells(), &[0]);

        // Bumping the mesh revision forces the rescan.
        index.refresh(&topo, &moved, &plane, 1);
        assert_eq!(index.cells(), &[0, 1]);
    }

    #[test]
    fn test_invalidate_forces_rescan() {
        let (topo, g) = stacked_tets();
        let mut plane = CuttingPlane::from_geometry(&g);
        plane.set_offset(0.25 / plane.radius());

        let mut index = IntersectionIndex::new();
        index.refresh(&topo, &g, &plane, 0);

        let mut moved = g.clone();
        moved.set(7, Point3::new(0.0, 0.0, 0.2));
        index.invalidate();
        index.refresh(&topo, &moved, &plane, 0);
        assert_eq!(index.cells(), &[0, 1]);
    }
}
