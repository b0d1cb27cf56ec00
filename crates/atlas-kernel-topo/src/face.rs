//! Triangular faces with front/back materials.

use atlas_kernel_math::{triangle_normal, Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::NULL_BOUNDARY;

/// Order-independent identity of a face: its vertex indices, sorted.
pub type FaceKey = [u32; 3];

/// A triangle shared by at most two cells, tagged with the material on each
/// side.
///
/// `materials[0]` is the material of the cell that first registered the face
/// (the front); `materials[1]` is the other cell's, or [`NULL_BOUNDARY`] if
/// the face lies on the outer surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    /// Vertex indices, in the front cell's winding order.
    pub vertices: [u32; 3],
    /// Front and back materials.
    pub materials: [i32; 2],
}

impl Face {
    /// A face seen from one cell only; the back material is open.
    pub fn new(vertices: [u32; 3], front: i32) -> Self {
        Self {
            vertices,
            materials: [front, NULL_BOUNDARY],
        }
    }

    /// A face with both sides known.
    pub fn with_materials(vertices: [u32; 3], materials: [i32; 2]) -> Self {
        Self { vertices, materials }
    }

    /// Whether the two sides carry different materials.
    pub fn is_crease(&self) -> bool {
        self.materials[0] != self.materials[1]
    }

    /// Whether the face lies on the outer surface of the mesh.
    pub fn is_surface(&self) -> bool {
        self.materials.contains(&NULL_BOUNDARY)
    }

    /// Sorted vertex indices, the canonical lookup key.
    pub fn key(&self) -> FaceKey {
        let mut k = self.vertices;
        k.sort_unstable();
        k
    }

    /// The three edges as sorted index pairs.
    pub fn edges(&self) -> [[u32; 2]; 3] {
        let [a, b, c] = self.vertices;
        [sorted(a, b), sorted(b, c), sorted(c, a)]
    }

    /// Arithmetic mean of the corners.
    pub fn centroid(&self, g: &Geometry) -> Point3 {
        let [a, b, c] = self.vertices;
        let acc = g.get(a).coords + g.get(b).coords + g.get(c).coords;
        Point3::from(acc / 3.0)
    }

    /// Unit normal by the front winding order.
    pub fn normal(&self, g: &Geometry) -> Vec3 {
        let [a, b, c] = self.vertices;
        triangle_normal(&g.get(a), &g.get(b), &g.get(c))
    }
}

fn sorted(a: u32, b: u32) -> [u32; 2] {
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}
