use serde::{Deserialize, Serialize};

use crate::math::{Point2, TOLERANCE};

use super::circle::{sample_ring, DEFAULT_BOUNDARY_POINTS};
use super::{BoundaryRings, BoundingBox};

/// An annulus: the region between two concentric circles.
///
/// The only shape variant whose boundary carries a hole ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub center_y: f64,
    pub center_z: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    #[serde(default = "default_n_points")]
    pub n_points: usize,
}

fn default_n_points() -> usize {
    DEFAULT_BOUNDARY_POINTS
}

impl Ring {
    #[must_use]
    pub fn new(center_y: f64, center_z: f64, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            center_y,
            center_z,
            inner_radius,
            outer_radius,
            n_points: DEFAULT_BOUNDARY_POINTS,
        }
    }

    /// Boundary-inclusive containment test: inside the outer circle and
    /// outside (or on) the inner circle.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        let dy = p.x - self.center_y;
        let dz = p.y - self.center_z;
        let d = (dy * dy + dz * dz).sqrt();
        d >= self.inner_radius - TOLERANCE && d <= self.outer_radius + TOLERANCE
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            min_y: self.center_y - self.outer_radius,
            min_z: self.center_z - self.outer_radius,
            max_y: self.center_y + self.outer_radius,
            max_z: self.center_z + self.outer_radius,
        }
    }

    #[must_use]
    pub fn centroid(&self) -> Point2 {
        Point2::new(self.center_y, self.center_z)
    }

    #[must_use]
    pub fn boundary_rings(&self) -> BoundaryRings {
        BoundaryRings {
            exterior: sample_ring(self.center_y, self.center_z, self.outer_radius, self.n_points),
            holes: vec![sample_ring(
                self.center_y,
                self.center_z,
                self.inner_radius,
                self.n_points,
            )],
        }
    }
}
