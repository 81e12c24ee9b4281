use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::FixedFaceHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, RefinementParameters,
    Triangulation,
};

use crate::error::MeshingError;
use crate::geometry::{MeshType, Shape};
use crate::math::Point2;

use super::{Element, Mesh, DEFAULT_MATERIAL_ID};

/// Fallback mesh size when the resolved value is non-finite or non-positive.
pub const DEFAULT_MESH_SIZE: f64 = 0.1;

/// Builds per-shape local meshes and merges them into one global [`Mesh`].
///
/// Each shape is meshed independently with its own strategy and size;
/// local node indices are remapped onto the global node list with no
/// deduplication, so adjoining shapes keep distinct boundary nodes.
#[derive(Debug)]
pub struct MeshGenerator {
    next_mesh_id: u32,
}

impl Default for MeshGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// A shape's local mesh before merging.
#[derive(Debug, Default)]
struct ShapeMesh {
    nodes: Vec<Point2>,
    elements: Vec<Element>,
}

impl MeshGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self { next_mesh_id: 1 }
    }

    /// Generates a mesh from the active shapes in `shapes`, in list order.
    ///
    /// Returns `None` when no shape is active. A shape that fails to mesh
    /// is skipped with a warning and generation continues, so when every
    /// shape fails the result is an empty mesh rather than `None`;
    /// callers can distinguish "nothing to mesh" from "nothing meshed".
    pub fn generate(&mut self, shapes: &[Shape], global_mesh_size: f64) -> Option<Mesh> {
        let active: Vec<&Shape> = shapes.iter().filter(|s| s.active).collect();
        if active.is_empty() {
            return None;
        }

        let mut merged = Mesh::new(self.next_mesh_id);
        self.next_mesh_id += 1;

        for shape in active {
            let size = resolve_mesh_size(shape.mesh_size.unwrap_or(global_mesh_size));
            let local = match shape.mesh_type {
                MeshType::Triangular => match triangulate_shape(shape, size) {
                    Ok(local) => local,
                    Err(e) => {
                        log::warn!("skipping shape {}: {e}", shape.id);
                        continue;
                    }
                },
                MeshType::Quadrilateral => grid_mesh(shape, size),
            };
            log::debug!(
                "shape {}: {} nodes, {} elements",
                shape.id,
                local.nodes.len(),
                local.elements.len()
            );
            merge_into(
                &mut merged,
                local,
                shape.material_id.unwrap_or(DEFAULT_MATERIAL_ID),
            );
        }

        log::debug!(
            "mesh {}: {} nodes, {} elements total",
            merged.id,
            merged.nodes.len(),
            merged.elements.len()
        );
        Some(merged)
    }
}

/// Coerces a mesh size to a usable positive value.
fn resolve_mesh_size(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        DEFAULT_MESH_SIZE
    }
}

/// Appends a local shape mesh onto the global mesh, remapping node indices.
fn merge_into(merged: &mut Mesh, local: ShapeMesh, material_id: u32) {
    let offset = merged.nodes.len();
    for node in local.nodes {
        merged.add_node(node.x, node.y);
    }
    for element in local.elements {
        let remapped = match element {
            Element::Triangle(n) => {
                Element::Triangle([n[0] + offset, n[1] + offset, n[2] + offset])
            }
            Element::Quad(n) => {
                Element::Quad([n[0] + offset, n[1] + offset, n[2] + offset, n[3] + offset])
            }
        };
        merged.add_element(remapped, material_id);
    }
}

/// Meshes a shape with constrained Delaunay triangulation.
///
/// The boundary rings become constraint loops, the triangulation is
/// refined towards the target element size, and interior triangles are
/// selected by constraint-crossing parity so holes stay empty.
fn triangulate_shape(shape: &Shape, mesh_size: f64) -> Result<ShapeMesh, MeshingError> {
    let rings = shape.boundary_rings();

    let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
    insert_constraint_loop(&mut cdt, &rings.exterior)?;
    for hole in &rings.holes {
        insert_constraint_loop(&mut cdt, hole)?;
    }

    // Refine towards equilateral triangles with side length ~ mesh_size.
    let max_area = 3.0_f64.sqrt() / 4.0 * mesh_size * mesh_size;
    let _ = cdt.refine(RefinementParameters::new().with_max_allowed_area(max_area));

    let interior_faces = classify_interior_faces(&cdt);

    let mut mesh = ShapeMesh::default();
    let mut vertex_map: HashMap<usize, usize> = HashMap::new();

    for face_handle in cdt.inner_faces() {
        if !interior_faces.contains(&face_handle.fix().index()) {
            continue;
        }

        let mut tri = [0usize; 3];
        for (i, vh) in face_handle.vertices().iter().enumerate() {
            let idx = vh.fix().index();
            let node = *vertex_map.entry(idx).or_insert_with(|| {
                let pos = vh.position();
                mesh.nodes.push(Point2::new(pos.x, pos.y));
                mesh.nodes.len() - 1
            });
            tri[i] = node;
        }
        mesh.elements.push(Element::Triangle(tri));
    }

    Ok(mesh)
}

/// Meshes a shape with a regular quadrilateral grid over its bounding box.
///
/// A cell survives iff at least 3 of its 4 corner nodes lie inside or on
/// the shape boundary, giving a staircase approximation of the true
/// boundary. Grid nodes of discarded cells stay in the node list.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn grid_mesh(shape: &Shape, mesh_size: f64) -> ShapeMesh {
    let bbox = shape.bounding_box();
    let width = bbox.width();
    let height = bbox.height();

    let n_y = ((width / mesh_size).floor() as usize).max(2);
    let n_z = ((height / mesh_size).floor() as usize).max(2);

    let mut mesh = ShapeMesh::default();
    for i in 0..=n_z {
        let z = bbox.min_z + height * i as f64 / n_z as f64;
        for j in 0..=n_y {
            let y = bbox.min_y + width * j as f64 / n_y as f64;
            mesh.nodes.push(Point2::new(y, z));
        }
    }

    let cols = n_y + 1;
    for i in 0..n_z {
        for j in 0..n_y {
            let corners = [
                i * cols + j,
                i * cols + j + 1,
                (i + 1) * cols + j + 1,
                (i + 1) * cols + j,
            ];
            let inside = corners
                .iter()
                .filter(|&&n| shape.contains(&mesh.nodes[n]))
                .count();
            if inside >= 3 {
                mesh.elements.push(Element::Quad(corners));
            }
        }
    }

    mesh
}

/// Inserts a closed polygon as constraint edges into the CDT.
fn insert_constraint_loop(
    cdt: &mut ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
    ring: &[Point2],
) -> Result<(), MeshingError> {
    if ring.len() < 3 {
        return Err(MeshingError::Triangulation(
            "constraint loop needs at least 3 points".into(),
        ));
    }

    let mut handles = Vec::with_capacity(ring.len());
    for p in ring {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| MeshingError::Triangulation(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(MeshingError::Triangulation(
                "boundary segments intersect".into(),
            ));
        }
        cdt.add_constraint(from, to);
    }

    Ok(())
}

/// Classifies which inner CDT faces lie inside the shape.
///
/// Breadth-first flood-fill from the outer (infinite) face, counting how
/// many constraint edges each path crosses. Odd crossing depth means the
/// face is interior; faces inside a hole ring sit at depth 2 and are
/// excluded.
fn classify_interior_faces(
    cdt: &ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut visited: HashMap<usize, u32> = HashMap::new();
    let mut frontier: VecDeque<(FixedFaceHandle<spade::handles::InnerTag>, u32)> = VecDeque::new();

    let mut visit = |face: FixedFaceHandle<spade::handles::InnerTag>,
                     depth: u32,
                     visited: &mut HashMap<usize, u32>,
                     frontier: &mut VecDeque<(FixedFaceHandle<spade::handles::InnerTag>, u32)>| {
        let idx = face.index();
        if visited.contains_key(&idx) {
            return;
        }
        visited.insert(idx, depth);
        if depth % 2 == 1 {
            interior.insert(idx);
        }
        frontier.push_back((face, depth));
    };

    // Inner faces bordering the infinite face seed the fill.
    let outer_fix = cdt.outer_face().fix();
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            visit(inner.fix(), depth, &mut visited, &mut frontier);
        }
    }

    while let Some((face_fix, depth)) = frontier.pop_front() {
        for edge in cdt.face(face_fix).adjacent_edges() {
            if let Some(neighbor) = edge.rev().face().as_inner() {
                let crossed = cdt.is_constraint_edge(edge.as_undirected().fix());
                visit(
                    neighbor.fix(),
                    depth + u32::from(crossed),
                    &mut visited,
                    &mut frontier,
                );
            }
        }
    }

    interior
}
