//! Exact cross-section of one cell against the cutting plane.

use atlas_kernel_math::{Point3, Vec3};
use atlas_kernel_topo::{Geometry, Polyhedron, Topology};

use crate::cross_section::{Contour, CrossSection};
use crate::error::SectionError;
use crate::plane::CuttingPlane;

/// Fraction of the normal used per nudge step.
const NUDGE_STEP: f64 = 1.0 / 10_000.0;

/// The plane point, nudged along the normal until no vertex of the cell
/// lies exactly on the plane.
///
/// The step direction is chosen toward the cell centroid, so the plane
/// moves into the cell rather than off it. With no coincident vertex this
/// returns `plane.point()` unchanged.
pub fn nudged_plane_point(cell: &Polyhedron, geometry: &Geometry, plane: &CuttingPlane) -> Point3 {
    let normal = plane.normal();
    let mut point = plane.point();

    let mut step = normal * NUDGE_STEP;
    if normal.dot(&(cell.centroid(geometry) - point)) < 0.0 {
        step = -step;
    }

    while cell
        .vertices()
        .iter()
        .any(|&v| (geometry.get(v) - point).dot(&normal) == 0.0)
    {
        point += step;
    }
    point
}

/// Compute the polygon(s) cut from one cell by the plane.
///
/// Signed distances classify every vertex; faces with an edge spanning the
/// plane form the broad set. A traversal starts at any such face, walks
/// across intersected edges until it returns to its start, and emits one
/// interpolated point plus a crease tag per step. If intersecting faces
/// remain unvisited the cut is disconnected and a second traversal collects
/// the other contour.
///
/// Returns an empty section when the plane misses the cell entirely.
pub fn cross_section(
    cell: &Polyhedron,
    geometry: &Geometry,
    plane: &CuttingPlane,
) -> Result<CrossSection, SectionError> {
    let normal = plane.normal();
    let point = nudged_plane_point(cell, geometry, plane);

    let mut dist = [0.0f64; 6];
    for (i, &v) in cell.vertices().iter().enumerate() {
        dist[i] = signed_distance(&geometry.get(v), &point, &normal);
    }

    let faces = cell.local_faces();
    let mut intersecting = [false; 8];
    for (fi, face) in faces.iter().enumerate() {
        intersecting[fi] = face_edges(face).iter().any(|&[a, b]| crosses(&dist, a, b));
    }

    let mut section = CrossSection::default();
    let Some(start) = (0..faces.len()).find(|&f| intersecting[f]) else {
        return Ok(section);
    };

    let mut visited = [false; 8];
    traverse(
        cell,
        geometry,
        &dist,
        start as u8,
        &mut visited,
        &mut section.contours[0],
    )?;

    // Unvisited intersecting faces mean the cut is disconnected.
    if let Some(second) = (0..faces.len()).find(|&f| intersecting[f] && !visited[f]) {
        traverse(
            cell,
            geometry,
            &dist,
            second as u8,
            &mut visited,
            &mut section.contours[1],
        )?;
    }

    Ok(section)
}

/// Sections of every cell in `cells`, with per-cell failures collected as
/// diagnostics.
#[derive(Debug, Clone, Default)]
pub struct MeshSection {
    /// Non-empty sections, keyed by cell index.
    pub sections: Vec<(u32, CrossSection)>,
    /// Cells whose section could not be computed.
    pub failures: Vec<(u32, SectionError)>,
}

/// Run the cross-section engine over the given cell indices, typically the
/// contents of a refreshed [`crate::IntersectionIndex`].
///
/// A failing cell is skipped and reported; it never aborts the batch.
pub fn section_mesh(
    topology: &Topology,
    geometry: &Geometry,
    plane: &CuttingPlane,
    cells: &[u32],
) -> MeshSection {
    let mut result = MeshSection::default();
    for &ci in cells {
        match cross_section(&topology.polyhedra[ci as usize], geometry, plane) {
            Ok(section) if !section.is_empty() => result.sections.push((ci, section)),
            Ok(_) => {}
            Err(err) => result.failures.push((ci, err)),
        }
    }
    result
}

fn signed_distance(q: &Point3, p: &Point3, n: &Vec3) -> f64 {
    (q - p).dot(n)
}

fn face_edges(face: &[u8; 3]) -> [[u8; 2]; 3] {
    let [a, b, c] = *face;
    [sorted(a, b), sorted(b, c), sorted(c, a)]
}

fn sorted(a: u8, b: u8) -> [u8; 2] {
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}

fn crosses(dist: &[f64; 6], a: u8, b: u8) -> bool {
    dist[a as usize] * dist[b as usize] < 0.0
}

fn traverse(
    cell: &Polyhedron,
    geometry: &Geometry,
    dist: &[f64; 6],
    start: u8,
    visited: &mut [bool; 8],
    contour: &mut Contour,
) -> Result<(), SectionError> {
    let verts = cell.vertices();
    let faces = cell.local_faces();
    let mut current = start;
    let mut last_edge: Option<[u8; 2]> = None;

    loop {
        visited[current as usize] = true;

        let exit = face_edges(&faces[current as usize])
            .into_iter()
            .filter(|edge| Some(*edge) != last_edge)
            .find(|&[a, b]| crosses(dist, a, b))
            .ok_or(SectionError::NoIntersectingEdge { face: current })?;

        let [a, b] = exit;
        let (da, db) = (dist[a as usize], dist[b as usize]);
        let t = da / (da - db);
        let pa = geometry.get(verts[a as usize]);
        let pb = geometry.get(verts[b as usize]);
        contour.points.push(pa + t * (pb - pa));
        contour.crease.push(cell.crease_faces.contains(current));

        let [f0, f1] = cell.adjacent_faces(a, b)?;
        current = if f0 == current { f1 } else { f0 };
        last_edge = Some(exit);

        if current == start {
            break;
        }
    }
    Ok(())
}
