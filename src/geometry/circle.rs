use serde::{Deserialize, Serialize};

use crate::math::{Point2, TOLERANCE};

use super::{BoundaryRings, BoundingBox};

/// Default number of boundary samples for circular shapes.
pub const DEFAULT_BOUNDARY_POINTS: usize = 40;

/// A filled circle.
///
/// Containment uses the exact circle equation; the boundary ring handed
/// to the mesher is a regular `n_points`-gon inscribed in the circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center_y: f64,
    pub center_z: f64,
    pub radius: f64,
    #[serde(default = "default_n_points")]
    pub n_points: usize,
}

fn default_n_points() -> usize {
    DEFAULT_BOUNDARY_POINTS
}

/// Samples a full circle as an open counter-clockwise ring.
pub(crate) fn sample_ring(center_y: f64, center_z: f64, radius: f64, n: usize) -> Vec<Point2> {
    #[allow(clippy::cast_precision_loss)]
    (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            Point2::new(
                center_y + radius * angle.cos(),
                center_z + radius * angle.sin(),
            )
        })
        .collect()
}

impl Circle {
    #[must_use]
    pub fn new(center_y: f64, center_z: f64, radius: f64) -> Self {
        Self {
            center_y,
            center_z,
            radius,
            n_points: DEFAULT_BOUNDARY_POINTS,
        }
    }

    /// Boundary-inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        let dy = p.x - self.center_y;
        let dz = p.y - self.center_z;
        (dy * dy + dz * dz).sqrt() <= self.radius + TOLERANCE
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            min_y: self.center_y - self.radius,
            min_z: self.center_z - self.radius,
            max_y: self.center_y + self.radius,
            max_z: self.center_z + self.radius,
        }
    }

    #[must_use]
    pub fn centroid(&self) -> Point2 {
        Point2::new(self.center_y, self.center_z)
    }

    #[must_use]
    pub fn boundary_rings(&self) -> BoundaryRings {
        BoundaryRings {
            exterior: sample_ring(self.center_y, self.center_z, self.radius, self.n_points),
            holes: Vec::new(),
        }
    }
}
