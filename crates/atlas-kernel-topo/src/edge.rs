//! Mesh edges with the accumulated set of adjacent materials.

use serde::{Deserialize, Serialize};

/// Order-independent identity of an edge: its endpoint indices, sorted.
pub type EdgeKey = [u32; 2];

/// An edge together with every distinct material of a crease face incident
/// to it.
///
/// An edge touched by three or more materials is a crease edge; its vertices
/// are smoothed along the crease curve instead of into the volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Endpoint indices, sorted.
    pub vertices: EdgeKey,
    /// Distinct materials of incident crease faces, in first-seen order.
    pub materials: Vec<i32>,
}

impl Edge {
    /// An edge with no materials recorded yet.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            vertices: if a <= b { [a, b] } else { [b, a] },
            materials: Vec::new(),
        }
    }

    /// Record a material; duplicates are ignored.
    pub fn add_material(&mut self, material: i32) {
        if !self.materials.contains(&material) {
            self.materials.push(material);
        }
    }

    /// Whether this edge lies on a crease curve (three or more materials).
    pub fn is_crease(&self) -> bool {
        self.materials.len() > 2
    }

    /// The sorted endpoint pair.
    pub fn key(&self) -> EdgeKey {
        self.vertices
    }
}
