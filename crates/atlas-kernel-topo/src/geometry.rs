//! Flat indexed point store and the exact-equality deduplication map.

use std::collections::HashMap;

use atlas_kernel_math::{Point3, PointKey, Transform};

/// Growable indexed store of 3D points.
///
/// Indices handed out by [`Geometry`] are stable: subdivision only appends,
/// and global transforms edit in place. One `Geometry` is exclusively owned
/// by one mesh; topology elements hold indices into it, never copies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    points: Vec<Point3>,
}

impl Geometry {
    /// Wrap a list of points.
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// The point at `index`.
    ///
    /// Panics on an out-of-range index; indices stored in a topology are
    /// valid for its geometry by construction.
    #[inline]
    pub fn get(&self, index: u32) -> Point3 {
        self.points[index as usize]
    }

    /// Replace the point at `index`.
    #[inline]
    pub fn set(&mut self, index: u32, p: Point3) {
        self.points[index as usize] = p;
    }

    /// Append a point, returning its index.
    pub fn push(&mut self, p: Point3) -> u32 {
        self.points.push(p);
        (self.points.len() - 1) as u32
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points, in index order.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Arithmetic mean of all points (origin for an empty store).
    pub fn centroid(&self) -> Point3 {
        if self.points.is_empty() {
            return Point3::origin();
        }
        let mut acc = Point3::origin();
        for p in &self.points {
            acc.coords += p.coords;
        }
        Point3::from(acc.coords / self.points.len() as f64)
    }

    /// Largest distance from the origin to any point.
    pub fn bounding_radius(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.coords.norm())
            .fold(0.0, f64::max)
    }

    /// Apply an affine transform to every point, in place.
    pub fn transform(&mut self, t: &Transform) {
        for p in &mut self.points {
            *p = t.apply_point(p);
        }
    }
}

/// Deduplicating view over a [`Geometry`] used during one subdivision pass.
///
/// Maps point values to indices with exact-bit equality so that the shared
/// midpoint of an edge is appended once no matter how many cells split it.
/// Holding the geometry mutably for the lifetime of the map enforces the
/// single-writer discipline of a pass.
#[derive(Debug)]
pub struct GeometryMap<'a> {
    geometry: &'a mut Geometry,
    index: HashMap<PointKey, u32>,
}

impl<'a> GeometryMap<'a> {
    /// Build the map, seeding it with the existing points.
    ///
    /// On duplicate coordinates the first occurrence wins, so existing
    /// indices are never remapped.
    pub fn new(geometry: &'a mut Geometry) -> Self {
        let mut index = HashMap::with_capacity(geometry.len() * 2);
        for (i, p) in geometry.points().iter().enumerate() {
            index.entry(PointKey::of(p)).or_insert(i as u32);
        }
        Self { geometry, index }
    }

    /// Index of `p`, appending it to the geometry if it is new.
    pub fn intern(&mut self, p: Point3) -> u32 {
        match self.index.entry(PointKey::of(&p)) {
            std::collections::hash_map::Entry::Occupied(e) => *e.get(),
            std::collections::hash_map::Entry::Vacant(e) => {
                let i = self.geometry.push(p);
                e.insert(i);
                i
            }
        }
    }

    /// The wrapped geometry (read access while the pass runs).
    pub fn geometry(&self) -> &Geometry {
        self.geometry
    }
}
