pub mod polygon_2d;

/// 2D point type. The section plane uses (y, z) coordinates, stored as
/// `Point2 { x: y, y: z }`.
pub type Point2 = nalgebra::Point2<f64>;

/// Global geometric tolerance for floating-point comparisons.
///
/// Containment tests are boundary-inclusive within this tolerance so
/// that grid nodes lying exactly on a shape boundary count as inside.
pub const TOLERANCE: f64 = 1e-10;
