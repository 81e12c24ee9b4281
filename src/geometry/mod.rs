pub mod circle;
pub mod polygon;
pub mod rectangle;
pub mod ring;

pub use circle::Circle;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use ring::Ring;

use serde::{Deserialize, Serialize};

use crate::math::Point2;

/// Mesh strategy requested for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeshType {
    #[default]
    Triangular,
    Quadrilateral,
}

/// Axis-aligned bounding box in section-plane (y, z) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_y: f64,
    pub min_z: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl BoundingBox {
    /// Computes the bounding box of a point set.
    ///
    /// Empty input yields a degenerate box at the origin.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let mut bbox = Self {
            min_y: f64::INFINITY,
            min_z: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            max_z: f64::NEG_INFINITY,
        };
        for p in points {
            bbox.min_y = bbox.min_y.min(p.x);
            bbox.min_z = bbox.min_z.min(p.y);
            bbox.max_y = bbox.max_y.max(p.x);
            bbox.max_z = bbox.max_z.max(p.y);
        }
        if points.is_empty() {
            return Self {
                min_y: 0.0,
                min_z: 0.0,
                max_y: 0.0,
                max_z: 0.0,
            };
        }
        bbox
    }

    /// Extent along the y axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Extent along the z axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_z - self.min_z
    }
}

/// Boundary representation of a shape: one exterior ring plus any number
/// of hole rings. Rings are open (no repeated closing point).
#[derive(Debug, Clone)]
pub struct BoundaryRings {
    pub exterior: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
}

/// The geometric payload of a shape.
///
/// A closed set of variants; everything downstream dispatches through
/// the four query operations rather than matching on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeKind {
    Rectangle(Rectangle),
    Circle(Circle),
    Ring(Ring),
    Polygon(Polygon),
}

impl ShapeKind {
    /// Tests whether a point lies within the filled region, boundary included.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        match self {
            Self::Rectangle(r) => r.contains(p),
            Self::Circle(c) => c.contains(p),
            Self::Ring(r) => r.contains(p),
            Self::Polygon(poly) => poly.contains(p),
        }
    }

    /// Returns the axis-aligned bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Self::Rectangle(r) => r.bounding_box(),
            Self::Circle(c) => c.bounding_box(),
            Self::Ring(r) => r.bounding_box(),
            Self::Polygon(poly) => poly.bounding_box(),
        }
    }

    /// Returns the centroid of the filled region.
    #[must_use]
    pub fn centroid(&self) -> Point2 {
        match self {
            Self::Rectangle(r) => r.centroid(),
            Self::Circle(c) => c.centroid(),
            Self::Ring(r) => r.centroid(),
            Self::Polygon(poly) => poly.centroid(),
        }
    }

    /// Returns the boundary rings. Only [`Ring`] produces holes.
    #[must_use]
    pub fn boundary_rings(&self) -> BoundaryRings {
        match self {
            Self::Rectangle(r) => r.boundary_rings(),
            Self::Circle(c) => c.boundary_rings(),
            Self::Ring(r) => r.boundary_rings(),
            Self::Polygon(poly) => poly.boundary_rings(),
        }
    }
}

/// A 2D geometric primitive of a cross-section.
///
/// Shapes are independent value-like entities owned by a section's shape
/// list and referenced by `id` everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: u32,
    #[serde(default)]
    pub material_id: Option<u32>,
    /// Display-only; the meshing core never reads it.
    pub color: String,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Overrides the global mesh size when set.
    #[serde(default)]
    pub mesh_size: Option<f64>,
    #[serde(default)]
    pub mesh_type: MeshType,
    pub kind: ShapeKind,
}

fn default_active() -> bool {
    true
}

const SHAPE_PALETTE: [&str; 10] = [
    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF", "#800000", "#008000",
    "#000080", "#808000",
];

impl Shape {
    /// Creates an active triangular-meshed shape with a palette color
    /// derived from its id.
    #[must_use]
    pub fn new(id: u32, kind: ShapeKind) -> Self {
        Self {
            id,
            material_id: None,
            color: SHAPE_PALETTE[id as usize % SHAPE_PALETTE.len()].to_owned(),
            active: true,
            mesh_size: None,
            mesh_type: MeshType::default(),
            kind,
        }
    }

    /// Tests whether a point lies within the shape, boundary included.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        self.kind.contains(p)
    }

    /// Returns the axis-aligned bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.kind.bounding_box()
    }

    /// Returns the centroid of the filled region.
    #[must_use]
    pub fn centroid(&self) -> Point2 {
        self.kind.centroid()
    }

    /// Returns the boundary rings.
    #[must_use]
    pub fn boundary_rings(&self) -> BoundaryRings {
        self.kind.boundary_rings()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_shape_defaults() {
        let shape = Shape::new(3, ShapeKind::Circle(Circle::new(0.0, 0.0, 1.0)));
        assert!(shape.active);
        assert_eq!(shape.mesh_type, MeshType::Triangular);
        assert!(shape.material_id.is_none());
        assert!(shape.mesh_size.is_none());
        assert_eq!(shape.color, "#FFFF00");
    }

    #[test]
    fn bounding_box_from_points() {
        let bbox = BoundingBox::from_points(&[
            Point2::new(-1.0, 2.0),
            Point2::new(3.0, -4.0),
            Point2::new(0.0, 0.0),
        ]);
        assert!((bbox.min_y + 1.0).abs() < 1e-12);
        assert!((bbox.max_y - 3.0).abs() < 1e-12);
        assert!((bbox.min_z + 4.0).abs() < 1e-12);
        assert!((bbox.max_z - 2.0).abs() < 1e-12);
        assert!((bbox.width() - 4.0).abs() < 1e-12);
        assert!((bbox.height() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn shape_round_trips_through_json() {
        let mut shape = Shape::new(7, ShapeKind::Rectangle(Rectangle::new(1.0, 2.0, 3.0, 4.0, 30.0)));
        shape.material_id = Some(5);
        shape.mesh_size = Some(0.25);
        shape.mesh_type = MeshType::Quadrilateral;

        let json = serde_json::to_string(&shape).unwrap();
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
        assert_eq!(back.id, 7);
    }

    #[test]
    fn shape_kind_tag_matches_variant_name() {
        let shape = Shape::new(1, ShapeKind::Circle(Circle::new(0.0, 0.0, 2.0)));
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"type\":\"Circle\""));
    }
}
