//! Result types of the cross-section engine.

use atlas_kernel_math::Point3;

/// One closed polygon cut from a cell's surface.
///
/// `crease` runs parallel to `points`: entry `i` tells whether the face the
/// traversal crossed when it emitted point `i` is a crease face, which tags
/// the contour segment ending at that point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    /// Intersection points in traversal order.
    pub points: Vec<Point3>,
    /// Crease tag per contour segment.
    pub crease: Vec<bool>,
}

impl Contour {
    /// Whether the contour has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// The intersection of one cell with the cutting plane.
///
/// The second contour is non-empty only when the plane's intersection with
/// the cell surface is disconnected, which cannot happen for a convexly
/// embedded cell but does occur once smoothing has deformed the mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossSection {
    /// Up to two closed contours; the second may be empty.
    pub contours: [Contour; 2],
}

impl CrossSection {
    /// Whether the plane missed the cell entirely.
    pub fn is_empty(&self) -> bool {
        self.contours[0].is_empty()
    }
}
