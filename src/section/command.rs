use std::collections::HashSet;

use crate::error::{Result, SectionError};
use crate::geometry::Shape;
use crate::meshing::{Fiber, Mesh, MeshGenerator};

use super::Section;

/// An undoable mutation of a section.
///
/// A closed set of variants dispatched through `execute`/`undo`/`redo`;
/// the (mesh, fibers) state of a section only ever changes through these.
#[derive(Debug)]
pub enum Command {
    AddShape(AddShape),
    DeleteShape(DeleteShape),
    RegenerateMesh(RegenerateMesh),
}

impl Command {
    /// A human-readable description for history displays.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::AddShape(c) => format!("add shape {}", c.shape.id),
            Self::DeleteShape(c) => format!("delete shape {}", c.shape_id),
            Self::RegenerateMesh(c) => format!("regenerate mesh (size {})", c.mesh_size),
        }
    }

    fn execute(&mut self, section: &mut Section, generator: &mut MeshGenerator) -> Result<()> {
        match self {
            Self::AddShape(c) => {
                section.add_shape(c.shape.clone());
                Ok(())
            }
            Self::DeleteShape(c) => {
                c.removed = section.remove_shape(c.shape_id);
                if c.removed.is_none() {
                    return Err(SectionError::ShapeNotFound(c.shape_id).into());
                }
                Ok(())
            }
            Self::RegenerateMesh(c) => c.execute(section, generator),
        }
    }

    fn undo(&mut self, section: &mut Section) {
        match self {
            Self::AddShape(c) => {
                section.remove_shape(c.shape.id);
            }
            Self::DeleteShape(c) => {
                if let Some(shape) = &c.removed {
                    section.add_shape(shape.clone());
                }
            }
            Self::RegenerateMesh(c) => c.undo(section),
        }
    }

    fn redo(&mut self, section: &mut Section) {
        match self {
            Self::AddShape(c) => section.add_shape(c.shape.clone()),
            Self::DeleteShape(c) => {
                section.remove_shape(c.shape_id);
            }
            Self::RegenerateMesh(c) => c.redo(section),
        }
    }
}

/// Adds a shape to the section's shape list.
#[derive(Debug)]
pub struct AddShape {
    shape: Shape,
}

impl AddShape {
    #[must_use]
    pub fn new(shape: Shape) -> Command {
        Command::AddShape(Self { shape })
    }
}

/// Removes a shape by id, snapshotting it for undo.
#[derive(Debug)]
pub struct DeleteShape {
    shape_id: u32,
    removed: Option<Shape>,
}

impl DeleteShape {
    #[must_use]
    pub fn new(shape_id: u32) -> Command {
        Command::DeleteShape(Self {
            shape_id,
            removed: None,
        })
    }
}

/// Rebuilds the section's mesh and reconciles the fiber lists.
///
/// `execute` snapshots the prior (mesh, fibers) pair, generates a new mesh
/// from the section's active shapes, discretizes it into fibers and merges
/// them with whatever fibers the section already holds: on an id collision
/// the existing fiber always wins, novel mesh fibers are appended. The
/// computed mesh and merged list are cached on the command, so `redo`
/// replays them without re-running generation (triangulation output is
/// not guaranteed deterministic across runs).
#[derive(Debug)]
pub struct RegenerateMesh {
    mesh_size: f64,
    prior_mesh: Option<Mesh>,
    prior_fibers: Vec<Fiber>,
    cached_mesh: Option<Mesh>,
    cached_fibers: Vec<Fiber>,
}

impl RegenerateMesh {
    #[must_use]
    pub fn new(mesh_size: f64) -> Command {
        Command::RegenerateMesh(Self {
            mesh_size,
            prior_mesh: None,
            prior_fibers: Vec::new(),
            cached_mesh: None,
            cached_fibers: Vec::new(),
        })
    }

    fn execute(&mut self, section: &mut Section, generator: &mut MeshGenerator) -> Result<()> {
        self.prior_mesh = section.mesh().cloned();
        self.prior_fibers = section.fibers().to_vec();

        let mut new_mesh = generator.generate(section.shapes(), self.mesh_size);

        // Errors out before touching the section, so a failed command
        // leaves it exactly as found.
        let new_fibers = match new_mesh.as_mut() {
            Some(mesh) => mesh.generate_fibers(section.shapes())?,
            None => Vec::new(),
        };

        let merged = merge_fibers(section.fibers().to_vec(), new_fibers);

        section.set_mesh(new_mesh);
        section.set_fibers(merged.clone());

        self.cached_mesh = section.mesh().cloned();
        self.cached_fibers = merged;
        Ok(())
    }

    fn undo(&self, section: &mut Section) {
        section.set_mesh(self.prior_mesh.clone());
        section.set_fibers(self.prior_fibers.clone());
    }

    fn redo(&self, section: &mut Section) {
        section.set_mesh(self.cached_mesh.clone());
        section.set_fibers(self.cached_fibers.clone());
    }
}

/// Unions two fiber lists by id: existing fibers always win on collision,
/// incoming fibers are appended only when their id is novel.
fn merge_fibers(existing: Vec<Fiber>, incoming: Vec<Fiber>) -> Vec<Fiber> {
    let existing_ids: HashSet<u32> = existing.iter().map(|f| f.id).collect();
    let mut merged = existing;
    merged.extend(
        incoming
            .into_iter()
            .filter(|f| !existing_ids.contains(&f.id)),
    );
    merged
}

/// Generic undo/redo stack for section commands.
///
/// A command is pushed only after it executes successfully, and any new
/// command clears the redo stack.
#[derive(Debug, Default)]
pub struct OperationHistory {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl OperationHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a command against the section and records it.
    ///
    /// # Errors
    ///
    /// Propagates the command's failure; failed commands are not recorded.
    pub fn apply(
        &mut self,
        section: &mut Section,
        generator: &mut MeshGenerator,
        mut command: Command,
    ) -> Result<()> {
        command.execute(section, generator)?;
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(())
    }

    /// Undoes the most recent command. Returns its description, or `None`
    /// when there is nothing to undo.
    pub fn undo(&mut self, section: &mut Section) -> Option<String> {
        let mut command = self.undo_stack.pop()?;
        command.undo(section);
        let description = command.description();
        self.redo_stack.push(command);
        Some(description)
    }

    /// Redoes the most recently undone command. Returns its description,
    /// or `None` when there is nothing to redo.
    pub fn redo(&mut self, section: &mut Section) -> Option<String> {
        let mut command = self.redo_stack.pop()?;
        command.redo(section);
        let description = command.description();
        self.undo_stack.push(command);
        Some(description)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
