//! One-shot crease analysis over raw cells.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use atlas_kernel_topo::{Edge, EdgeKey, Face, FaceKey, FaceSet, Polyhedron, Topology};

use crate::error::RefineError;

struct FaceRecord {
    face: Face,
    // (cell index, local face index) for each side seen so far.
    owners: [(u32, u8); 2],
    seen: u8,
}

/// Derive the crease structures of a mesh from its cells.
///
/// Every face is hashed by its sorted vertex triple, so the two cells
/// sharing it find the same record regardless of winding. Faces whose two
/// materials differ (counting [`atlas_kernel_topo::NULL_BOUNDARY`] for
/// once-seen surface faces) become crease faces and are flagged on both
/// owning cells. Crease edges and crease points follow from those faces.
///
/// Fails on a face seen more than twice, which no manifold mesh produces.
pub fn detect_creases(mut polyhedra: Vec<Polyhedron>) -> Result<Topology, RefineError> {
    for cell in &mut polyhedra {
        cell.crease_faces = FaceSet::EMPTY;
    }

    let mut records: HashMap<FaceKey, FaceRecord> = HashMap::new();
    for (ci, cell) in polyhedra.iter().enumerate() {
        for fi in 0..cell.face_count() {
            let face = Face::new(cell.face(fi), cell.material);
            match records.entry(face.key()) {
                Entry::Vacant(slot) => {
                    slot.insert(FaceRecord {
                        face,
                        owners: [(ci as u32, fi as u8), (0, 0)],
                        seen: 1,
                    });
                }
                Entry::Occupied(mut slot) => {
                    let record = slot.get_mut();
                    if record.seen == 2 {
                        return Err(RefineError::NonManifoldFace(face.key()));
                    }
                    record.face.materials[1] = cell.material;
                    record.owners[1] = (ci as u32, fi as u8);
                    record.seen = 2;
                }
            }
        }
    }

    let mut faces = Vec::new();
    for record in records.into_values() {
        if record.face.is_crease() {
            for &(ci, fi) in &record.owners[..record.seen as usize] {
                polyhedra[ci as usize].crease_faces.insert(fi);
            }
            faces.push(record.face);
        }
    }
    // Hash order is arbitrary; sort so downstream passes are reproducible.
    faces.sort_unstable_by_key(Face::key);

    let mut edge_records: HashMap<EdgeKey, Edge> = HashMap::new();
    for face in &faces {
        for [a, b] in face.edges() {
            let edge = edge_records
                .entry([a, b])
                .or_insert_with(|| Edge::new(a, b));
            edge.add_material(face.materials[0]);
            edge.add_material(face.materials[1]);
        }
    }
    let mut edges: Vec<Edge> = edge_records
        .into_values()
        .filter(Edge::is_crease)
        .collect();
    edges.sort_unstable_by_key(Edge::key);

    let mut incident: HashMap<u32, u32> = HashMap::new();
    for edge in &edges {
        for &v in &edge.vertices {
            *incident.entry(v).or_insert(0) += 1;
        }
    }
    let mut points: Vec<u32> = incident
        .into_iter()
        .filter(|&(_, count)| count > 2)
        .map(|(v, _)| v)
        .collect();
    points.sort_unstable();

    Ok(Topology {
        polyhedra,
        faces,
        edges,
        points,
    })
}
