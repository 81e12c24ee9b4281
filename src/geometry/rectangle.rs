use serde::{Deserialize, Serialize};

use crate::math::{Point2, TOLERANCE};

use super::{BoundaryRings, BoundingBox};

/// A rectangle defined by its center, extents and a rotation about the
/// center, given in degrees (counter-clockwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub center_y: f64,
    pub center_z: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Rectangle {
    #[must_use]
    pub fn new(center_y: f64, center_z: f64, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            center_y,
            center_z,
            width,
            height,
            rotation,
        }
    }

    /// The four corner vertices in counter-clockwise order, rotated
    /// about the center.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point2> {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let corners = [
            (-half_w, -half_h),
            (half_w, -half_h),
            (half_w, half_h),
            (-half_w, half_h),
        ];
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        corners
            .iter()
            .map(|&(dy, dz)| {
                Point2::new(
                    self.center_y + dy * cos - dz * sin,
                    self.center_z + dy * sin + dz * cos,
                )
            })
            .collect()
    }

    /// Boundary-inclusive containment test.
    ///
    /// The point is rotated into the rectangle's local frame and compared
    /// against the half extents.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        let dy = p.x - self.center_y;
        let dz = p.y - self.center_z;
        let (sin, cos) = (-self.rotation.to_radians()).sin_cos();
        let local_y = dy * cos - dz * sin;
        let local_z = dy * sin + dz * cos;
        local_y.abs() <= self.width / 2.0 + TOLERANCE
            && local_z.abs() <= self.height / 2.0 + TOLERANCE
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices())
    }

    #[must_use]
    pub fn centroid(&self) -> Point2 {
        Point2::new(self.center_y, self.center_z)
    }

    #[must_use]
    pub fn boundary_rings(&self) -> BoundaryRings {
        BoundaryRings {
            exterior: self.vertices(),
            holes: Vec::new(),
        }
    }
}
