use std::f64::consts::PI;

use super::{Fiber, FiberProvenance, DEFAULT_MATERIAL_ID};

/// A row of rebar fibers evenly spaced along a straight line.
///
/// Generated fibers carry local ids `1..=count`; callers placing them on
/// a section re-id them from the section's current fiber count.
#[derive(Debug, Clone)]
pub struct LineFiberPattern {
    pub start_y: f64,
    pub start_z: f64,
    pub end_y: f64,
    pub end_z: f64,
    /// Bar radius, used to derive the area when `fiber_area` is not positive.
    pub radius: f64,
    pub count: usize,
    /// Per-fiber area; non-positive values fall back to `pi * radius^2`.
    pub fiber_area: f64,
    pub material_id: u32,
}

impl LineFiberPattern {
    /// Generates the fibers of this pattern.
    ///
    /// Endpoints are included; a single fiber sits at the midpoint. A
    /// zero-length line degenerates to one fiber at the start point.
    #[must_use]
    pub fn generate(&self) -> Vec<Fiber> {
        let area = effective_area(self.fiber_area, self.radius);

        let dy = self.end_y - self.start_y;
        let dz = self.end_z - self.start_z;
        if (dy * dy + dz * dz).sqrt() == 0.0 {
            let mut fiber = Fiber::new(1, self.start_y, self.start_z, area, self.material_id);
            fiber.provenance = FiberProvenance::Line;
            return vec![fiber];
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        (0..self.count)
            .map(|i| {
                let t = if self.count > 1 {
                    i as f64 / (self.count - 1) as f64
                } else {
                    0.5
                };
                let mut fiber = Fiber::new(
                    i as u32 + 1,
                    self.start_y + t * dy,
                    self.start_z + t * dz,
                    area,
                    self.material_id,
                );
                fiber.provenance = FiberProvenance::Line;
                fiber
            })
            .collect()
    }
}

/// Rebar fibers distributed on a circle around a center point.
#[derive(Debug, Clone)]
pub struct RadialFiberPattern {
    pub center_y: f64,
    pub center_z: f64,
    /// Radius of the circle the fibers sit on.
    pub radius: f64,
    pub count: usize,
    /// Per-fiber area; non-positive values fall back to `pi * radius^2`.
    pub fiber_area: f64,
    pub material_id: u32,
    /// Start angle in degrees.
    pub start_angle: f64,
    /// End angle in degrees. A non-positive sweep means a full circle.
    pub end_angle: f64,
}

impl RadialFiberPattern {
    /// A full-circle pattern with default material.
    #[must_use]
    pub fn full_circle(center_y: f64, center_z: f64, radius: f64, count: usize) -> Self {
        Self {
            center_y,
            center_z,
            radius,
            count,
            fiber_area: 0.0,
            material_id: DEFAULT_MATERIAL_ID,
            start_angle: 0.0,
            end_angle: 360.0,
        }
    }

    /// Generates the fibers of this pattern.
    ///
    /// Fibers are spaced at `i / count` of the angular range, so a full
    /// circle does not duplicate the start position at the end.
    #[must_use]
    pub fn generate(&self) -> Vec<Fiber> {
        let area = effective_area(self.fiber_area, self.radius);

        let mut range = self.end_angle - self.start_angle;
        if range <= 0.0 {
            range = 360.0;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        (0..self.count)
            .map(|i| {
                let angle =
                    (self.start_angle + range * i as f64 / self.count as f64).to_radians();
                let mut fiber = Fiber::new(
                    i as u32 + 1,
                    self.center_y + self.radius * angle.cos(),
                    self.center_z + self.radius * angle.sin(),
                    area,
                    self.material_id,
                );
                fiber.provenance = FiberProvenance::Radial;
                fiber
            })
            .collect()
    }
}

fn effective_area(fiber_area: f64, radius: f64) -> f64 {
    if fiber_area > 0.0 {
        fiber_area
    } else {
        PI * radius * radius
    }
}
