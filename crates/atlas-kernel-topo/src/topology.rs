//! Container tying cells to their derived crease structures.

use serde::{Deserialize, Serialize};

use crate::cell::Polyhedron;
use crate::edge::Edge;
use crate::face::Face;

/// The full topological state of a mesh.
///
/// `polyhedra` is primary data; `faces`, `edges`, and `points` are derived
/// by crease detection and rebuilt from scratch whenever the cell list
/// changes. `points` holds the crease points: vertices pinned in place by
/// smoothing because more than two crease edges meet there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    /// The volumetric cells.
    pub polyhedra: Vec<Polyhedron>,
    /// Crease faces only, with front/back materials.
    pub faces: Vec<Face>,
    /// Crease edges only.
    pub edges: Vec<Edge>,
    /// Vertex indices of the crease points.
    pub points: Vec<u32>,
}

impl Topology {
    /// A topology with cells but no derived structures yet.
    pub fn from_cells(polyhedra: Vec<Polyhedron>) -> Self {
        Self {
            polyhedra,
            faces: Vec::new(),
            edges: Vec::new(),
            points: Vec::new(),
        }
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.polyhedra.len()
    }

    /// Distinct material ids present, in ascending order.
    pub fn partition_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.polyhedra.iter().map(|p| p.material).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
