//! Degree-dependent vertex smoothing, run once per subdivision pass.

use atlas_kernel_math::{midpoint, Point3, Vec3};
use atlas_kernel_topo::{Geometry, Shape, Topology};

/// Stencil weights for an interior tetrahedron corner.
const TET_SELF: f64 = -1.0 / 16.0;
const TET_OTHER: f64 = 17.0 / 48.0;

/// Stencil weights for an interior octahedron corner. The paired corner is
/// the one at `index ± 1` by parity in the canonical ordering.
const OCT_SELF: f64 = 3.0 / 8.0;
const OCT_OTHER: f64 = 1.0 / 12.0;
const OCT_PAIRED: f64 = 7.0 / 24.0;

/// How constrained a vertex is, most constrained last. A vertex takes the
/// strongest classification it qualifies for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Degree {
    Normal,
    CreaseFace,
    CreaseEdge,
    CreasePoint,
}

/// Reposition every vertex as a weighted average of its neighborhood.
///
/// All stencils read from a snapshot of the pre-smoothing positions while
/// the new positions accumulate in place; each vertex is finally divided by
/// its valence (the number of contributing terms). A vertex that collects
/// no terms keeps its snapshot position.
pub(crate) fn smooth(topology: &Topology, geometry: &mut Geometry) {
    let n = geometry.len();

    let mut degree = vec![Degree::Normal; n];
    for face in &topology.faces {
        for &v in &face.vertices {
            degree[v as usize] = Degree::CreaseFace;
        }
    }
    for edge in &topology.edges {
        for &v in &edge.vertices {
            degree[v as usize] = Degree::CreaseEdge;
        }
    }
    for &v in &topology.points {
        degree[v as usize] = Degree::CreasePoint;
    }

    let reference: Vec<Point3> = geometry.points().to_vec();
    let mut acc = vec![Vec3::zeros(); n];
    let mut valence = vec![0u32; n];

    // Crease points stay put.
    for &v in &topology.points {
        let v = v as usize;
        acc[v] = reference[v].coords;
        valence[v] = 1;
    }

    // Crease-edge vertices average the midpoints of their incident crease
    // edges.
    for edge in &topology.edges {
        let [a, b] = edge.vertices;
        let mid = midpoint(&reference[a as usize], &reference[b as usize]);
        for v in [a as usize, b as usize] {
            if degree[v] == Degree::CreaseEdge {
                acc[v] += mid.coords;
                valence[v] += 1;
            }
        }
    }

    // Crease-face vertices use a Loop stencil whose weight depends on the
    // number of incident crease faces.
    let mut face_valence = vec![0u32; n];
    for face in &topology.faces {
        for &v in &face.vertices {
            if degree[v as usize] == Degree::CreaseFace {
                face_valence[v as usize] += 1;
            }
        }
    }
    for face in &topology.faces {
        for i in 0..3 {
            let v = face.vertices[i] as usize;
            if degree[v] != Degree::CreaseFace {
                continue;
            }
            let k = f64::from(face_valence[v]);
            let w = 5.0 / 8.0
                - (3.0 / 8.0 + 0.25 * (2.0 * std::f64::consts::PI / k).cos()).powi(2);
            let b = face.vertices[(i + 1) % 3] as usize;
            let c = face.vertices[(i + 2) % 3] as usize;
            acc[v] += (1.0 - 2.0 * w) * reference[v].coords
                + w * reference[b].coords
                + w * reference[c].coords;
            valence[v] += 1;
        }
    }

    // Interior vertices accumulate one shape stencil per incident cell.
    for cell in &topology.polyhedra {
        match cell.shape {
            Shape::Tetrahedron(corners) => {
                for (index, &v) in corners.iter().enumerate() {
                    let v = v as usize;
                    if degree[v] != Degree::Normal {
                        continue;
                    }
                    for (i, &u) in corners.iter().enumerate() {
                        let w = if i == index { TET_SELF } else { TET_OTHER };
                        acc[v] += w * reference[u as usize].coords;
                    }
                    valence[v] += 1;
                }
            }
            Shape::Octahedron(corners) => {
                for (index, &v) in corners.iter().enumerate() {
                    let v = v as usize;
                    if degree[v] != Degree::Normal {
                        continue;
                    }
                    let paired = index ^ 1;
                    for (i, &u) in corners.iter().enumerate() {
                        let w = if i == index {
                            OCT_SELF
                        } else if i == paired {
                            OCT_PAIRED
                        } else {
                            OCT_OTHER
                        };
                        acc[v] += w * reference[u as usize].coords;
                    }
                    valence[v] += 1;
                }
            }
        }
    }

    for v in 0..n {
        if valence[v] > 0 {
            geometry.set(v as u32, Point3::from(acc[v] / f64::from(valence[v])));
        }
    }
}
