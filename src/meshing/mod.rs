pub mod fiber;
pub mod generate;
pub mod patterns;

pub use fiber::{Fiber, FiberProvenance, DEFAULT_MATERIAL_ID};
pub use generate::{MeshGenerator, DEFAULT_MESH_SIZE};
pub use patterns::{LineFiberPattern, RadialFiberPattern};

use serde::{Deserialize, Serialize};

use crate::error::MeshingError;
use crate::geometry::Shape;
use crate::math::{polygon_2d, Point2};

/// One cell of a mesh: a triangle or a quadrilateral, as indices into
/// the owning mesh's node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Triangle([usize; 3]),
    Quad([usize; 4]),
}

impl Element {
    /// The node indices of this element.
    #[must_use]
    pub fn nodes(&self) -> &[usize] {
        match self {
            Self::Triangle(n) => n,
            Self::Quad(n) => n,
        }
    }
}

/// A node/element/fiber container.
///
/// Node indices are never deduplicated across merged shapes: two shapes
/// sharing a geometric boundary point get two distinct node entries at
/// the same coordinate. Preserved as-is; callers must not rely on
/// coordinate uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub id: u32,
    /// Node coordinates in the section plane; index = node id.
    pub nodes: Vec<Point2>,
    pub elements: Vec<Element>,
    /// Per-element material ids recorded at generation time. Provisional:
    /// fiber discretization re-resolves materials by centroid containment.
    pub element_materials: Vec<u32>,
    /// The most recently generated fiber set for this mesh. A section's
    /// own fiber list is the authoritative merged collection.
    pub fibers: Vec<Fiber>,
}

impl Mesh {
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Appends a node and returns its index.
    pub fn add_node(&mut self, y: f64, z: f64) -> usize {
        self.nodes.push(Point2::new(y, z));
        self.nodes.len() - 1
    }

    /// Appends an element with its provisional material id and returns
    /// the element index.
    pub fn add_element(&mut self, element: Element, material_id: u32) -> usize {
        self.elements.push(element);
        self.element_materials.push(material_id);
        self.elements.len() - 1
    }

    /// Discretizes every element into a fiber.
    ///
    /// Fibers are produced in element-visitation order with ids starting
    /// at 1, positioned at the element centroid with the element's polygon
    /// area. The material is taken from the first active shape containing
    /// the centroid (its `material_id`, or [`DEFAULT_MATERIAL_ID`] when
    /// unset); centroids claimed by no shape get [`DEFAULT_MATERIAL_ID`].
    ///
    /// Zero-area elements still produce (zero-area) fibers; downstream
    /// consumers that require `area > 0` must filter.
    ///
    /// The result replaces `self.fibers` wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`MeshingError::NodeIndexOutOfRange`] if an element
    /// references a node index outside the node list. This indicates a
    /// generator bug, never user input.
    pub fn generate_fibers(&mut self, shapes: &[Shape]) -> Result<Vec<Fiber>, MeshingError> {
        let mut fibers = Vec::with_capacity(self.elements.len());

        for (i, element) in self.elements.iter().enumerate() {
            let mut ring = Vec::with_capacity(element.nodes().len());
            for &node in element.nodes() {
                let p = self
                    .nodes
                    .get(node)
                    .ok_or(MeshingError::NodeIndexOutOfRange {
                        element: i,
                        node,
                        node_count: self.nodes.len(),
                    })?;
                ring.push(*p);
            }

            let area = polygon_2d::area(&ring);
            let c = polygon_2d::centroid(&ring);
            let material_id = resolve_material(shapes, &c);

            #[allow(clippy::cast_possible_truncation)]
            fibers.push(Fiber::new(i as u32 + 1, c.x, c.y, area, material_id));
        }

        self.fibers.clone_from(&fibers);
        Ok(fibers)
    }

    /// Looks up a fiber of this mesh by id.
    #[must_use]
    pub fn fiber_by_id(&self, fiber_id: u32) -> Option<&Fiber> {
        self.fibers.iter().find(|f| f.id == fiber_id)
    }
}

/// Resolves the material for a point: first active shape (in list order)
/// containing it wins.
fn resolve_material(shapes: &[Shape], p: &Point2) -> u32 {
    for shape in shapes {
        if shape.active && shape.contains(p) {
            return shape.material_id.unwrap_or(DEFAULT_MATERIAL_ID);
        }
    }
    DEFAULT_MATERIAL_ID
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Rectangle, ShapeKind};

    fn unit_triangle_mesh() -> Mesh {
        let mut mesh = Mesh::new(1);
        mesh.add_node(0.0, 0.0);
        mesh.add_node(1.0, 0.0);
        mesh.add_node(0.0, 1.0);
        mesh.add_element(Element::Triangle([0, 1, 2]), 1);
        mesh
    }

    #[test]
    fn add_node_and_element_return_indices() {
        let mut mesh = Mesh::new(1);
        assert_eq!(mesh.add_node(0.0, 0.0), 0);
        assert_eq!(mesh.add_node(1.0, 0.0), 1);
        assert_eq!(mesh.add_node(0.0, 1.0), 2);
        assert_eq!(mesh.add_element(Element::Triangle([0, 1, 2]), 7), 0);
        assert_eq!(mesh.element_materials, vec![7]);
    }

    #[test]
    fn fiber_count_matches_element_count() {
        let mut mesh = unit_triangle_mesh();
        let fibers = mesh.generate_fibers(&[]).unwrap();
        assert_eq!(fibers.len(), mesh.elements.len());
        assert_eq!(mesh.fibers, fibers);

        let mut empty = Mesh::new(2);
        assert!(empty.generate_fibers(&[]).unwrap().is_empty());
    }

    #[test]
    fn fiber_geometry_and_default_material() {
        let mut mesh = unit_triangle_mesh();
        let fibers = mesh.generate_fibers(&[]).unwrap();
        let f = &fibers[0];
        assert_eq!(f.id, 1);
        assert!((f.area - 0.5).abs() < 1e-12);
        assert!((f.y - 1.0 / 3.0).abs() < 1e-12);
        assert!((f.z - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(f.material_id, DEFAULT_MATERIAL_ID);
    }

    #[test]
    fn material_resolution_prefers_first_active_shape() {
        let mut first = Shape::new(1, ShapeKind::Rectangle(Rectangle::new(0.5, 0.5, 2.0, 2.0, 0.0)));
        first.material_id = Some(10);
        let mut second = Shape::new(2, ShapeKind::Rectangle(Rectangle::new(0.5, 0.5, 2.0, 2.0, 0.0)));
        second.material_id = Some(20);

        let mut mesh = unit_triangle_mesh();
        let fibers = mesh.generate_fibers(&[first.clone(), second.clone()]).unwrap();
        assert_eq!(fibers[0].material_id, 10);

        // An inactive first shape falls through to the second.
        first.active = false;
        let fibers = mesh.generate_fibers(&[first, second]).unwrap();
        assert_eq!(fibers[0].material_id, 20);
    }

    #[test]
    fn containing_shape_without_material_falls_back_to_default() {
        let shape = Shape::new(1, ShapeKind::Rectangle(Rectangle::new(0.5, 0.5, 2.0, 2.0, 0.0)));
        let mut mesh = unit_triangle_mesh();
        let fibers = mesh.generate_fibers(&[shape]).unwrap();
        assert_eq!(fibers[0].material_id, DEFAULT_MATERIAL_ID);
    }

    #[test]
    fn zero_area_element_still_yields_fiber() {
        let mut mesh = Mesh::new(1);
        mesh.add_node(0.0, 0.0);
        mesh.add_node(1.0, 0.0);
        mesh.add_node(2.0, 0.0);
        mesh.add_element(Element::Triangle([0, 1, 2]), 1);

        let fibers = mesh.generate_fibers(&[]).unwrap();
        assert_eq!(fibers.len(), 1);
        assert!(fibers[0].area.abs() < 1e-12);
        assert!((fibers[0].y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_node_index_is_an_error() {
        let mut mesh = Mesh::new(1);
        mesh.add_node(0.0, 0.0);
        mesh.add_node(1.0, 0.0);
        mesh.add_element(Element::Triangle([0, 1, 9]), 1);

        let err = mesh.generate_fibers(&[]).unwrap_err();
        assert!(matches!(
            err,
            MeshingError::NodeIndexOutOfRange { element: 0, node: 9, node_count: 2 }
        ));
    }

    #[test]
    fn regeneration_replaces_fibers_wholesale() {
        let mut mesh = unit_triangle_mesh();
        mesh.fibers.push(Fiber::new(99, 0.0, 0.0, 1.0, 1));
        let fibers = mesh.generate_fibers(&[]).unwrap();
        assert_eq!(mesh.fibers.len(), 1);
        assert_eq!(mesh.fibers, fibers);
        assert!(mesh.fiber_by_id(99).is_none());
    }

    #[test]
    fn mesh_round_trips_through_json() {
        let mut mesh = unit_triangle_mesh();
        mesh.add_node(1.0, 1.0);
        mesh.add_element(Element::Quad([0, 1, 3, 2]), 2);
        mesh.generate_fibers(&[]).unwrap();

        let json = serde_json::to_string(&mesh).unwrap();
        let back: Mesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mesh);
    }
}
