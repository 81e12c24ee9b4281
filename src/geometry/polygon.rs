use serde::{Deserialize, Serialize};

use crate::math::{polygon_2d, Point2};

use super::{BoundaryRings, BoundingBox};

/// An arbitrary simple polygon given by its vertex list.
///
/// The stored list is closed (first vertex repeated at the end) and
/// immutable once constructed. Input with fewer than 3 distinct vertices
/// is replaced by a canonical unit square; the substitution is logged
/// but never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    #[must_use]
    pub fn new(mut vertices: Vec<Point2>) -> Self {
        if count_distinct(&vertices) < 3 {
            log::warn!(
                "polygon with {} distinct vertices is degenerate, substituting unit square",
                count_distinct(&vertices)
            );
            vertices = vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ];
        }
        if vertices.first() != vertices.last() {
            let first = vertices[0];
            vertices.push(first);
        }
        Self { vertices }
    }

    /// The closed vertex list (first point repeated at the end).
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// The open exterior ring (closing point stripped).
    fn ring(&self) -> &[Point2] {
        &self.vertices[..self.vertices.len() - 1]
    }

    /// Boundary-inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        polygon_2d::contains_point(self.ring(), p)
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.ring())
    }

    #[must_use]
    pub fn centroid(&self) -> Point2 {
        polygon_2d::centroid(self.ring())
    }

    #[must_use]
    pub fn boundary_rings(&self) -> BoundaryRings {
        BoundaryRings {
            exterior: self.ring().to_vec(),
            holes: Vec::new(),
        }
    }
}

fn count_distinct(vertices: &[Point2]) -> usize {
    let mut distinct: Vec<&Point2> = Vec::with_capacity(vertices.len());
    for v in vertices {
        if !distinct.iter().any(|d| *d == v) {
            distinct.push(v);
        }
    }
    distinct.len()
}
