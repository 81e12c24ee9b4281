pub mod command;

pub use command::{AddShape, Command, DeleteShape, OperationHistory, RegenerateMesh};

use serde::{Deserialize, Serialize};

use crate::geometry::Shape;
use crate::meshing::{Fiber, Mesh};

/// A cross-section being edited: the shape list, the current mesh and the
/// authoritative fiber list.
///
/// `fibers` mixes mesh-derived and manually placed fibers; a mesh's own
/// `fibers` field only ever holds the freshly generated set. The (mesh,
/// fibers) pair is mutated exclusively through [`Command`]s so every
/// transition is reversible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: u32,
    pub name: String,
    shapes: Vec<Shape>,
    mesh: Option<Mesh>,
    fibers: Vec<Fiber>,
}

impl Section {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            shapes: Vec::new(),
            mesh: None,
            fibers: Vec::new(),
        }
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Looks up a shape by id.
    #[must_use]
    pub fn shape(&self, shape_id: u32) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == shape_id)
    }

    /// The next free shape id for this section.
    #[must_use]
    pub fn next_shape_id(&self) -> u32 {
        self.shapes.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }

    #[must_use]
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// The authoritative fiber list, mixing mesh-derived and manual fibers.
    #[must_use]
    pub fn fibers(&self) -> &[Fiber] {
        &self.fibers
    }

    /// Looks up a fiber by id.
    #[must_use]
    pub fn fiber(&self, fiber_id: u32) -> Option<&Fiber> {
        self.fibers.iter().find(|f| f.id == fiber_id)
    }

    /// Places manually generated fibers (line/radial patterns) onto the
    /// section, re-assigning their ids sequentially from the current fiber
    /// count. Returns the number of fibers added.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_manual_fibers(&mut self, mut fibers: Vec<Fiber>) -> usize {
        let offset = self.fibers.len() as u32;
        for (i, fiber) in fibers.iter_mut().enumerate() {
            fiber.id = offset + i as u32 + 1;
        }
        let added = fibers.len();
        self.fibers.extend(fibers);
        added
    }

    pub(crate) fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub(crate) fn remove_shape(&mut self, shape_id: u32) -> Option<Shape> {
        let pos = self.shapes.iter().position(|s| s.id == shape_id)?;
        Some(self.shapes.remove(pos))
    }

    pub(crate) fn set_mesh(&mut self, mesh: Option<Mesh>) {
        self.mesh = mesh;
    }

    pub(crate) fn set_fibers(&mut self, fibers: Vec<Fiber>) {
        self.fibers = fibers;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Circle, ShapeKind};
    use crate::meshing::{FiberProvenance, RadialFiberPattern};

    #[test]
    fn next_shape_id_starts_at_one() {
        let mut section = Section::new(1, "Section 1");
        assert_eq!(section.next_shape_id(), 1);
        section.add_shape(Shape::new(1, ShapeKind::Circle(Circle::new(0.0, 0.0, 1.0))));
        assert_eq!(section.next_shape_id(), 2);
    }

    #[test]
    fn manual_fibers_are_re_idd_from_fiber_count() {
        let mut section = Section::new(1, "Section 1");
        section.set_fibers(vec![
            Fiber::new(1, 0.0, 0.0, 1.0, 1),
            Fiber::new(2, 1.0, 0.0, 1.0, 1),
        ]);

        let added = section.add_manual_fibers(
            RadialFiberPattern::full_circle(0.0, 0.0, 1.0, 3).generate(),
        );
        assert_eq!(added, 3);
        let ids: Vec<u32> = section.fibers().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(section.fibers()[4].provenance, FiberProvenance::Radial);
    }

    #[test]
    fn fiber_lookup_by_id() {
        let mut section = Section::new(1, "Section 1");
        section.set_fibers(vec![Fiber::new(7, 0.5, 0.5, 0.1, 2)]);
        assert!(section.fiber(7).is_some());
        assert!(section.fiber(8).is_none());
    }

    #[test]
    fn section_round_trips_through_json() {
        let mut section = Section::new(3, "Column base");
        let mut shape = Shape::new(1, ShapeKind::Circle(Circle::new(0.0, 0.0, 2.0)));
        shape.material_id = Some(4);
        section.add_shape(shape);
        section.set_fibers(vec![Fiber::new(11, 0.1, 0.2, 0.3, 4)]);

        let json = serde_json::to_string(&section).unwrap();
        let back: Section = serde_json::from_str(&json).unwrap();
        assert_eq!(back, section);
        assert_eq!(back.fibers()[0].id, 11);
    }
}
