use serde::{Deserialize, Serialize};

/// Material id assigned when no shape claims a fiber or the claiming
/// shape has no material of its own.
pub const DEFAULT_MATERIAL_ID: u32 = 1;

/// How a fiber came to exist.
///
/// An explicit tag; fibers are never classified by id ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FiberProvenance {
    /// Derived from a mesh element.
    #[default]
    Mesh,
    /// Placed manually along a straight line.
    Line,
    /// Placed manually on a radial pattern.
    Radial,
}

/// A point sample of (position, area, material) representing one slice
/// of a cross-section for sectional force integration.
///
/// `y`/`z` are section-plane coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fiber {
    pub id: u32,
    pub y: f64,
    pub z: f64,
    pub area: f64,
    pub material_id: u32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub provenance: FiberProvenance,
}

fn default_active() -> bool {
    true
}

impl Fiber {
    /// Creates an active mesh-derived fiber.
    #[must_use]
    pub fn new(id: u32, y: f64, z: f64, area: f64, material_id: u32) -> Self {
        Self {
            id,
            y,
            z,
            area,
            material_id,
            active: true,
            provenance: FiberProvenance::Mesh,
        }
    }
}
