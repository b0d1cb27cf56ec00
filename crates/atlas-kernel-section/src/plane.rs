//! The cutting plane and its pose parameters.

use atlas_kernel_math::{Point3, Transform, Vec3};
use atlas_kernel_topo::Geometry;

/// A slicing plane that slides along a rotatable axis.
///
/// The axis starts out along +Z, sized by the mesh bounding radius, and is
/// reoriented by a rotation around X followed by one around Y (angles in
/// radians). The plane sits at `offset` in `[-1, 1]` along that axis, where
/// the extremes touch the bounding sphere.
///
/// Every mutator bumps a revision counter; caches keyed on the revision
/// (see [`crate::IntersectionIndex`]) refresh lazily.
#[derive(Debug, Clone, PartialEq)]
pub struct CuttingPlane {
    radius: f64,
    x_angle: f64,
    y_angle: f64,
    offset: f64,
    revision: u64,
}

impl CuttingPlane {
    /// A plane for a mesh of the given bounding radius, unrotated and
    /// centered.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            x_angle: 0.0,
            y_angle: 0.0,
            offset: 0.0,
            revision: 0,
        }
    }

    /// A plane sized to the geometry's bounding radius.
    pub fn from_geometry(geometry: &Geometry) -> Self {
        Self::new(geometry.bounding_radius())
    }

    /// Unit normal: the +Z axis rotated by the X angle, then the Y angle.
    pub fn normal(&self) -> Vec3 {
        Transform::rotation_x(self.x_angle)
            .then(&Transform::rotation_y(self.y_angle))
            .apply_vec(&Vec3::z())
    }

    /// A point on the plane: the origin displaced along the normal by
    /// `offset * radius`.
    pub fn point(&self) -> Point3 {
        Point3::origin() + self.normal() * (self.offset * self.radius)
    }

    /// Bounding radius the plane was sized with.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Current offset along the axis.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Revision counter, bumped by every mutator.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Set the rotation around X, in radians.
    pub fn set_angle_x(&mut self, angle: f64) {
        self.x_angle = angle;
        self.revision += 1;
    }

    /// Set the rotation around Y, in radians.
    pub fn set_angle_y(&mut self, angle: f64) {
        self.y_angle = angle;
        self.revision += 1;
    }

    /// Set the offset along the axis; values outside `[-1, 1]` place the
    /// plane beyond the mesh.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.revision += 1;
    }

    /// Map a pan value in `[0, 1]` onto the offset range `[-1, 1]`.
    pub fn set_pan(&mut self, pan: f64) {
        self.set_offset(2.0 * pan - 1.0);
    }
}
