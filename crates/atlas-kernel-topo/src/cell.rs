//! Tetrahedral and octahedral cells.
//!
//! Both shapes are fixed-arity index tuples over a [`Geometry`], with
//! hand-derived face, edge, and edge-adjacency tables keyed to the canonical
//! vertex ordering. Reordering a cell's vertices invalidates every table
//! below, so cells are treated as immutable once built.

use atlas_kernel_math::Point3;
use serde::{Deserialize, Serialize};

use crate::error::TopologyError;
use crate::geometry::Geometry;

// =============================================================================
// Local-index tables
// =============================================================================

/// Local face layout of a tetrahedron over canonical vertex order `0..4`.
pub const TET_FACES: [[u8; 3]; 4] = [[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]];

/// Local face layout of an octahedron over canonical vertex order `0..6`.
///
/// Vertex pairs `(0,5) (1,4) (2,3)` are the diagonals; they appear in no
/// face and form no edge.
pub const OCT_FACES: [[u8; 3]; 8] = [
    [0, 1, 2],
    [0, 3, 1],
    [1, 5, 2],
    [2, 4, 0],
    [3, 4, 5],
    [3, 0, 4],
    [4, 2, 5],
    [5, 1, 3],
];

/// Local edges of a tetrahedron, endpoints sorted.
pub(crate) const TET_EDGES: [[u8; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

/// Local edges of an octahedron, endpoints sorted.
pub(crate) const OCT_EDGES: [[u8; 2]; 12] = [
    [0, 1],
    [0, 2],
    [0, 3],
    [0, 4],
    [1, 2],
    [1, 3],
    [1, 5],
    [2, 4],
    [2, 5],
    [3, 4],
    [3, 5],
    [4, 5],
];

/// For each entry of [`TET_EDGES`], the two local faces sharing that edge.
const TET_EDGE_FACES: [[u8; 2]; 6] = [[0, 2], [0, 1], [1, 2], [0, 3], [2, 3], [1, 3]];

/// For each entry of [`OCT_EDGES`], the two local faces sharing that edge.
const OCT_EDGE_FACES: [[u8; 2]; 12] = [
    [0, 1],
    [0, 3],
    [1, 5],
    [3, 5],
    [0, 2],
    [1, 7],
    [2, 7],
    [3, 6],
    [2, 6],
    [4, 5],
    [4, 7],
    [4, 6],
];

// =============================================================================
// Crease-face flag set
// =============================================================================

/// Set of local face indices flagged as crease faces, stored as a bitmask.
///
/// A cell has at most 8 faces, so a byte suffices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceSet(u8);

impl FaceSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Insert a local face index.
    pub fn insert(&mut self, face: u8) {
        debug_assert!(face < 8);
        self.0 |= 1 << face;
    }

    /// Whether the local face index is in the set.
    pub fn contains(&self, face: u8) -> bool {
        self.0 & (1 << face) != 0
    }

    /// Number of flagged faces.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no face is flagged.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Flagged local face indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..8).filter(|f| self.contains(*f))
    }
}

// =============================================================================
// Cells
// =============================================================================

/// Vertex indices of a cell, by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Four vertices, four triangular faces.
    Tetrahedron([u32; 4]),
    /// Six vertices, eight triangular faces.
    Octahedron([u32; 6]),
}

/// One volumetric cell: a shape, its material (region id), and the set of
/// local faces flagged as crease faces by crease detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polyhedron {
    /// Vertex indices, in the shape's canonical order.
    pub shape: Shape,
    /// Region/partition id.
    pub material: i32,
    /// Local faces lying on a material boundary.
    pub crease_faces: FaceSet,
}

impl Polyhedron {
    /// A tetrahedron with no crease flags.
    pub fn tetrahedron(vertices: [u32; 4], material: i32) -> Self {
        Self {
            shape: Shape::Tetrahedron(vertices),
            material,
            crease_faces: FaceSet::EMPTY,
        }
    }

    /// An octahedron with no crease flags.
    pub fn octahedron(vertices: [u32; 6], material: i32) -> Self {
        Self {
            shape: Shape::Octahedron(vertices),
            material,
            crease_faces: FaceSet::EMPTY,
        }
    }

    /// Build a cell from a loader record; 4 or 6 indices, anything else is
    /// corrupt input.
    pub fn from_record(vertices: &[u32], material: i32) -> Result<Self, TopologyError> {
        match vertices.len() {
            4 => Ok(Self::tetrahedron(
                [vertices[0], vertices[1], vertices[2], vertices[3]],
                material,
            )),
            6 => Ok(Self::octahedron(
                [
                    vertices[0],
                    vertices[1],
                    vertices[2],
                    vertices[3],
                    vertices[4],
                    vertices[5],
                ],
                material,
            )),
            n => Err(TopologyError::InvalidCellArity(n)),
        }
    }

    /// Vertex indices in canonical order.
    pub fn vertices(&self) -> &[u32] {
        match &self.shape {
            Shape::Tetrahedron(v) => v,
            Shape::Octahedron(v) => v,
        }
    }

    /// Number of triangular faces (4 or 8).
    pub fn face_count(&self) -> usize {
        self.local_faces().len()
    }

    /// The shape's local face table.
    pub fn local_faces(&self) -> &'static [[u8; 3]] {
        match self.shape {
            Shape::Tetrahedron(_) => &TET_FACES,
            Shape::Octahedron(_) => &OCT_FACES,
        }
    }

    /// Global vertex indices of the local face `face`.
    pub fn face(&self, face: usize) -> [u32; 3] {
        let [a, b, c] = self.local_faces()[face];
        let v = self.vertices();
        [v[a as usize], v[b as usize], v[c as usize]]
    }

    /// The shape's local edge table (endpoints sorted).
    pub fn local_edges(&self) -> &'static [[u8; 2]] {
        match self.shape {
            Shape::Tetrahedron(_) => &TET_EDGES,
            Shape::Octahedron(_) => &OCT_EDGES,
        }
    }

    /// Global vertex indices of the local edge `edge`.
    pub fn edge(&self, edge: usize) -> [u32; 2] {
        let [a, b] = self.local_edges()[edge];
        let v = self.vertices();
        [v[a as usize], v[b as usize]]
    }

    /// The two local faces adjacent to the edge between local vertices
    /// `a` and `b`.
    ///
    /// Used by the cross-section traversal to step across an exit edge.
    pub fn adjacent_faces(&self, a: u8, b: u8) -> Result<[u8; 2], TopologyError> {
        let key = if a <= b { [a, b] } else { [b, a] };
        let (edges, faces): (&[[u8; 2]], &[[u8; 2]]) = match self.shape {
            Shape::Tetrahedron(_) => (&TET_EDGES, &TET_EDGE_FACES),
            Shape::Octahedron(_) => (&OCT_EDGES, &OCT_EDGE_FACES),
        };
        edges
            .iter()
            .position(|e| *e == key)
            .map(|i| faces[i])
            .ok_or(TopologyError::NotAnEdge(a, b))
    }

    /// Arithmetic mean of the cell's corners.
    pub fn centroid(&self, g: &Geometry) -> Point3 {
        let v = self.vertices();
        let mut acc = Point3::origin();
        for &i in v {
            acc.coords += g.get(i).coords;
        }
        Point3::from(acc.coords / v.len() as f64)
    }

    /// Signed volume of the cell.
    ///
    /// The octahedron is decomposed into four tetrahedra around the
    /// `1-4` diagonal.
    pub fn volume(&self, g: &Geometry) -> f64 {
        match self.shape {
            Shape::Tetrahedron([a, b, c, d]) => tet_volume(g, a, b, c, d),
            Shape::Octahedron([a, b, c, d, e, f]) => {
                tet_volume(g, a, b, c, e)
                    + tet_volume(g, a, b, d, e)
                    + tet_volume(g, f, b, c, e)
                    + tet_volume(g, f, b, d, e)
            }
        }
    }
}

fn tet_volume(g: &Geometry, a: u32, b: u32, c: u32, d: u32) -> f64 {
    let a = g.get(a);
    let ab = g.get(b) - a;
    let ac = g.get(c) - a;
    let ad = g.get(d) - a;
    ab.cross(&ac).dot(&ad) / 6.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_tet_geometry() -> Geometry {
        Geometry::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ])
    }

    /// Regular octahedron with diagonals (0,5), (1,4), (2,3).
    fn unit_oct_geometry() -> Geometry {
        Geometry::new(vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
        ])
    }

    fn count_faces_with_edge(faces: &[[u8; 3]], a: u8, b: u8) -> Vec<u8> {
        faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.contains(&a) && f.contains(&b))
            .map(|(i, _)| i as u8)
            .collect()
    }

    #[test]
    fn test_tet_adjacency_matches_face_table() {
        let cell = Polyhedron::tetrahedron([0, 1, 2, 3], 0);
        for &[a, b] in TET_EDGES.iter() {
            let mut expected = count_faces_with_edge(&TET_FACES, a, b);
            expected.sort_unstable();
            let mut got = cell.adjacent_faces(a, b).unwrap().to_vec();
            got.sort_unstable();
            assert_eq!(got, expected, "edge ({a},{b})");
        }
    }

    #[test]
    fn test_oct_adjacency_matches_face_table() {
        let cell = Polyhedron::octahedron([0, 1, 2, 3, 4, 5], 0);
        for &[a, b] in OCT_EDGES.iter() {
            let mut expected = count_faces_with_edge(&OCT_FACES, a, b);
            expected.sort_unstable();
            let mut got = cell.adjacent_faces(a, b).unwrap().to_vec();
            got.sort_unstable();
            assert_eq!(got, expected, "edge ({a},{b})");
        }
    }

    #[test]
    fn test_adjacency_is_order_independent() {
        let cell = Polyhedron::octahedron([0, 1, 2, 3, 4, 5], 0);
        assert_eq!(
            cell.adjacent_faces(3, 0).unwrap(),
            cell.adjacent_faces(0, 3).unwrap()
        );
    }

    #[test]
    fn test_diagonal_is_not_an_edge() {
        let cell = Polyhedron::octahedron([0, 1, 2, 3, 4, 5], 0);
        assert_eq!(
            cell.adjacent_faces(2, 3),
            Err(TopologyError::NotAnEdge(2, 3))
        );
    }

    #[test]
    fn test_from_record_rejects_bad_arity() {
        assert_eq!(
            Polyhedron::from_record(&[0, 1, 2, 3, 4], 1),
            Err(TopologyError::InvalidCellArity(5))
        );
        assert!(Polyhedron::from_record(&[0, 1, 2, 3], 1).is_ok());
        assert!(Polyhedron::from_record(&[0, 1, 2, 3, 4, 5], 1).is_ok());
    }

    #[test]
    fn test_face_set() {
        let mut set = FaceSet::EMPTY;
        assert!(set.is_empty());
        set.insert(0);
        set.insert(7);
        set.insert(7);
        assert_eq!(set.len(), 2);
        assert!(set.contains(7));
        assert!(!set.contains(3));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 7]);
    }

    #[test]
    fn test_unit_tet_volume() {
        let g = unit_tet_geometry();
        let cell = Polyhedron::tetrahedron([0, 1, 2, 3], 0);
        assert_relative_eq!(cell.volume(&g), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_oct_volume_and_centroid() {
        let g = unit_oct_geometry();
        let cell = Polyhedron::octahedron([0, 1, 2, 3, 4, 5], 0);
        // Regular octahedron with unit circumradius: V = 4/3.
        assert_relative_eq!(cell.volume(&g).abs(), 4.0 / 3.0, epsilon = 1e-12);
        let c = cell.centroid(&g);
        assert_relative_eq!(c.coords.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_face_maps_local_to_global() {
        let cell = Polyhedron::tetrahedron([10, 20, 30, 40], 0);
        assert_eq!(cell.face(3), [20, 40, 30]);
        assert_eq!(cell.edge(0), [10, 20]);
    }
}
