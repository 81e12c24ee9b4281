use thiserror::Error;

/// Top-level error type for the fibris meshing engine.
#[derive(Debug, Error)]
pub enum FibrisError {
    #[error(transparent)]
    Meshing(#[from] MeshingError),

    #[error(transparent)]
    Section(#[from] SectionError),
}

/// Errors related to mesh generation and fiber discretization.
///
/// Per-shape meshing failures are recoverable: the generator logs them
/// and continues with the next shape, so only contract violations
/// between the generator's own steps surface as `Err` to callers.
#[derive(Debug, Error)]
pub enum MeshingError {
    #[error("element {element} references node {node}, but the mesh has {node_count} nodes")]
    NodeIndexOutOfRange {
        element: usize,
        node: usize,
        node_count: usize,
    },

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

/// Errors related to section bookkeeping.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("shape not found: {0}")]
    ShapeNotFound(u32),
}

/// Convenience type alias for results using [`FibrisError`].
pub type Result<T> = std::result::Result<T, FibrisError>;
