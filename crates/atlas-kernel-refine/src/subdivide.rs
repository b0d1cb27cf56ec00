//! Linear split of cells, faces, and edges, plus the smoothing pass.
//!
//! The crease propagation tables below map a parent's local crease-face
//! index to (child, local face) pairs. They are hand-derived from the
//! canonical vertex orderings and must not be edited independently of the
//! face tables in `atlas-kernel-topo`.

use atlas_kernel_math::midpoint;
use atlas_kernel_topo::{Edge, Face, FaceSet, Geometry, GeometryMap, Polyhedron, Shape, Topology};

use crate::smooth::smooth;

// =============================================================================
// Split tables
// =============================================================================
//
// Pool layout for a tetrahedron: slots 0..4 are the corners, slots 4..10 are
// the edge midpoints of (0,1) (0,2) (0,3) (1,2) (1,3) (2,3).

const TET_MIDPOINTS: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

const TET_CHILD_TETS: [([usize; 4], [(u8, u8); 3]); 4] = [
    ([0, 4, 5, 6], [(0, 0), (1, 1), (2, 2)]),
    ([1, 7, 4, 8], [(0, 0), (2, 1), (3, 2)]),
    ([2, 5, 7, 9], [(0, 0), (1, 2), (3, 1)]),
    ([3, 6, 9, 8], [(1, 0), (2, 2), (3, 1)]),
];

const TET_CHILD_OCT: ([usize; 6], [(u8, u8); 4]) =
    ([4, 5, 6, 7, 8, 9], [(0, 1), (1, 2), (2, 3), (3, 4)]);

// Pool layout for an octahedron: slots 0..6 are the corners, slots 6..18 are
// the edge midpoints below, slot 18 is the centroid.

const OCT_MIDPOINTS: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [0, 2],
    [3, 4],
    [4, 5],
    [3, 5],
    [0, 3],
    [1, 3],
    [1, 5],
    [2, 5],
    [2, 4],
    [0, 4],
];

const OCT_CHILD_OCTS: [([usize; 6], [(u8, u8); 4]); 6] = [
    ([0, 6, 8, 12, 17, 18], [(0, 0), (1, 1), (3, 3), (5, 5)]),
    ([1, 7, 6, 14, 13, 18], [(0, 0), (1, 3), (2, 1), (7, 5)]),
    ([2, 8, 7, 16, 15, 18], [(0, 0), (2, 3), (3, 1), (6, 5)]),
    ([3, 9, 11, 12, 13, 18], [(1, 5), (4, 0), (5, 1), (7, 3)]),
    ([4, 10, 9, 16, 17, 18], [(3, 5), (4, 0), (5, 3), (6, 1)]),
    ([5, 11, 10, 14, 15, 18], [(2, 5), (4, 0), (6, 3), (7, 1)]),
];

const OCT_CHILD_TETS: [([usize; 4], (u8, u8)); 8] = [
    ([6, 7, 8, 18], (0, 0)),
    ([6, 12, 13, 18], (1, 0)),
    ([7, 14, 15, 18], (2, 0)),
    ([8, 16, 17, 18], (3, 0)),
    ([9, 10, 11, 18], (4, 0)),
    ([9, 12, 17, 18], (5, 0)),
    ([10, 16, 15, 18], (6, 0)),
    ([11, 14, 13, 18], (7, 0)),
];

// =============================================================================
// Pass
// =============================================================================

/// One refinement pass: split every cell, crease face, and crease edge, then
/// smooth the extended geometry in place.
///
/// Each tetrahedron becomes 4 tetrahedra and 1 octahedron; each octahedron
/// becomes 6 octahedra and 8 tetrahedra. Edge midpoints are deduplicated
/// through a [`GeometryMap`], so a pass over a mesh with `E` unique edges
/// appends exactly `E` midpoints (plus one centroid per octahedron). Crease
/// points carry over unchanged.
pub fn subdivide(topology: &Topology, geometry: &mut Geometry) -> Topology {
    let mut map = GeometryMap::new(geometry);

    let mut polyhedra = Vec::with_capacity(topology.polyhedra.len() * 5);
    for cell in &topology.polyhedra {
        split_cell(cell, &mut map, &mut polyhedra);
    }

    let mut faces = Vec::with_capacity(topology.faces.len() * 4);
    for face in &topology.faces {
        split_face(face, &mut map, &mut faces);
    }

    let mut edges = Vec::with_capacity(topology.edges.len() * 2);
    for edge in &topology.edges {
        split_edge(edge, &mut map, &mut edges);
    }

    let next = Topology {
        polyhedra,
        faces,
        edges,
        points: topology.points.clone(),
    };
    smooth(&next, geometry);
    next
}

fn intern_midpoint(map: &mut GeometryMap, a: u32, b: u32) -> u32 {
    let p = midpoint(&map.geometry().get(a), &map.geometry().get(b));
    map.intern(p)
}

fn propagate(parent: &Polyhedron, pairs: &[(u8, u8)]) -> FaceSet {
    let mut set = FaceSet::EMPTY;
    for &(parent_face, child_face) in pairs {
        if parent.crease_faces.contains(parent_face) {
            set.insert(child_face);
        }
    }
    set
}

fn split_cell(cell: &Polyhedron, map: &mut GeometryMap, out: &mut Vec<Polyhedron>) {
    match cell.shape {
        Shape::Tetrahedron(corners) => {
            let mut pool = [0u32; 10];
            pool[..4].copy_from_slice(&corners);
            for (slot, [a, b]) in TET_MIDPOINTS.iter().enumerate() {
                pool[4 + slot] = intern_midpoint(map, corners[*a], corners[*b]);
            }

            for (verts, creases) in &TET_CHILD_TETS {
                let mut child =
                    Polyhedron::tetrahedron(verts.map(|slot| pool[slot]), cell.material);
                child.crease_faces = propagate(cell, creases);
                out.push(child);
            }
            let (verts, creases) = &TET_CHILD_OCT;
            let mut child = Polyhedron::octahedron(verts.map(|slot| pool[slot]), cell.material);
            child.crease_faces = propagate(cell, creases);
            out.push(child);
        }
        Shape::Octahedron(corners) => {
            let mut pool = [0u32; 19];
            pool[..6].copy_from_slice(&corners);
            for (slot, [a, b]) in OCT_MIDPOINTS.iter().enumerate() {
                pool[6 + slot] = intern_midpoint(map, corners[*a], corners[*b]);
            }
            pool[18] = map.intern(cell.centroid(map.geometry()));

            for (verts, creases) in &OCT_CHILD_OCTS {
                let mut child =
                    Polyhedron::octahedron(verts.map(|slot| pool[slot]), cell.material);
                child.crease_faces = propagate(cell, creases);
                out.push(child);
            }
            for (verts, crease) in &OCT_CHILD_TETS {
                let mut child =
                    Polyhedron::tetrahedron(verts.map(|slot| pool[slot]), cell.material);
                child.crease_faces = propagate(cell, std::slice::from_ref(crease));
                out.push(child);
            }
        }
    }
}

fn split_face(face: &Face, map: &mut GeometryMap, out: &mut Vec<Face>) {
    let [v0, v1, v2] = face.vertices;
    let a = intern_midpoint(map, v0, v1);
    let b = intern_midpoint(map, v1, v2);
    let c = intern_midpoint(map, v2, v0);
    out.push(Face::with_materials([a, v1, b], face.materials));
    out.push(Face::with_materials([c, b, v2], face.materials));
    out.push(Face::with_materials([v0, a, c], face.materials));
    out.push(Face::with_materials([a, b, c], face.materials));
}

fn split_edge(edge: &Edge, map: &mut GeometryMap, out: &mut Vec<Edge>) {
    let [a, b] = edge.vertices;
    let mid = intern_midpoint(map, a, b);
    for endpoint in [a, b] {
        let mut child = Edge::new(endpoint, mid);
        child.materials = edge.materials.clone();
        out.push(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creases::detect_creases;
    use approx::assert_relative_eq;
    use atlas_kernel_math::Point3;

    fn regular_tet() -> (Topology, Geometry) {
        let geometry = Geometry::new(vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
        ]);
        let topology = Topology::from_cells(vec![Polyhedron::tetrahedron([0, 1, 2, 3], 1)]);
        (topology, geometry)
    }

    fn count_shapes(topo: &Topology) -> (usize, usize) {
        let tets = topo
            .polyhedra
            .iter()
            .filter(|p| matches!(p.shape, Shape::Tetrahedron(_)))
            .count();
        (tets, topo.polyhedra.len() - tets)
    }

    #[test]
    fn test_tet_splits_into_four_tets_and_one_oct() {
        let (topo, mut geometry) = regular_tet();
        let next = subdivide(&topo, &mut geometry);
        assert_eq!(count_shapes(&next), (4, 1));
        // 6 unique edges, so 6 new midpoints.
        assert_eq!(geometry.len(), 10);
    }

    #[test]
    fn test_oct_splits_into_six_octs_and_eight_tets() {
        let geometry = Geometry::new(vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
        ]);
        let topology = Topology::from_cells(vec![Polyhedron::octahedron([0, 1, 2, 3, 4, 5], 1)]);
        let mut geometry = geometry;
        let next = subdivide(&topology, &mut geometry);
        assert_eq!(count_shapes(&next), (8, 6));
        // 12 edge midpoints plus the centroid.
        assert_eq!(geometry.len(), 6 + 13);
    }

    #[test]
    fn test_shared_edges_are_deduplicated() {
        let geometry = Geometry::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
        ]);
        let topology = Topology::from_cells(vec![
            Polyhedron::tetrahedron([0, 1, 2, 3], 1),
            Polyhedron::tetrahedron([0, 2, 1, 4], 1),
        ]);
        let mut geometry = geometry;
        let next = subdivide(&topology, &mut geometry);
        assert_eq!(count_shapes(&next), (8, 2));
        // 9 unique edges between the two cells.
        assert_eq!(geometry.len(), 5 + 9);
    }

    #[test]
    fn test_crease_flags_propagate_per_table() {
        let (mut topo, mut geometry) = regular_tet();
        topo.polyhedra[0].crease_faces.insert(0);
        let next = subdivide(&topo, &mut geometry);

        let flags: Vec<Vec<u8>> = next
            .polyhedra
            .iter()
            .map(|p| p.crease_faces.iter().collect())
            .collect();
        // Parent face 0 maps onto face 0 of the first three child tets and
        // face 1 of the central octahedron.
        assert_eq!(flags[0], vec![0]);
        assert_eq!(flags[1], vec![0]);
        assert_eq!(flags[2], vec![0]);
        assert_eq!(flags[3], Vec::<u8>::new());
        assert_eq!(flags[4], vec![1]);
    }

    #[test]
    fn test_propagated_flags_match_redetection() {
        let cells = vec![
            Polyhedron::tetrahedron([0, 1, 2, 3], 1),
            Polyhedron::tetrahedron([0, 2, 1, 4], 2),
        ];
        let mut geometry = Geometry::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
        ]);
        let topo = detect_creases(cells).unwrap();
        let next = subdivide(&topo, &mut geometry);
        let redetected = detect_creases(next.polyhedra.clone()).unwrap();
        for (a, b) in next.polyhedra.iter().zip(&redetected.polyhedra) {
            assert_eq!(a.crease_faces, b.crease_faces);
        }
    }

    #[test]
    fn test_crease_counts_after_subdivision() {
        let cells = vec![
            Polyhedron::tetrahedron([0, 1, 2, 3], 1),
            Polyhedron::tetrahedron([0, 2, 1, 4], 2),
        ];
        let mut geometry = Geometry::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
        ]);
        let topo = detect_creases(cells).unwrap();
        let next = subdivide(&topo, &mut geometry);
        let redetected = detect_creases(next.polyhedra.clone()).unwrap();

        // Every crease face splits in four; crease points are preserved.
        assert_eq!(next.faces.len(), topo.faces.len() * 4);
        assert_eq!(redetected.faces.len(), topo.faces.len() * 4);
        assert_eq!(next.edges.len(), topo.edges.len() * 2);
        assert_eq!(redetected.points.len(), topo.points.len());
    }

    #[test]
    fn test_crease_points_survive_subdivision() {
        // Three materials fanned around edge (0,1) make both axis
        // endpoints crease points.
        let cells = vec![
            Polyhedron::tetrahedron([0, 1, 2, 3], 1),
            Polyhedron::tetrahedron([0, 1, 3, 4], 2),
            Polyhedron::tetrahedron([0, 1, 4, 2], 3),
        ];
        let mut geometry = Geometry::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(-0.5, 0.9, 1.0),
            Point3::new(-0.5, -0.9, 1.0),
        ]);
        let topo = detect_creases(cells).unwrap();
        assert_eq!(topo.points, vec![0, 1]);

        let next = subdivide(&topo, &mut geometry);
        assert_eq!(next.points, topo.points);
        // The axis midpoint joins only the two child axis edges, so a
        // fresh detection finds the same two crease points.
        let redetected = detect_creases(next.polyhedra.clone()).unwrap();
        assert_eq!(redetected.points, vec![0, 1]);
        // Crease points are pinned by smoothing.
        assert_eq!(geometry.get(0), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(geometry.get(1), Point3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_smoothing_preserves_regular_tet_centroid() {
        let (topo, mut geometry) = regular_tet();
        let before = geometry.centroid();
        subdivide(&topo, &mut geometry);
        let after = geometry.centroid();
        assert_relative_eq!(before.x, after.x, epsilon = 1e-12);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-12);
        assert_relative_eq!(before.z, after.z, epsilon = 1e-12);
    }
}
