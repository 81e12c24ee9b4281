pub mod error;
pub mod geometry;
pub mod math;
pub mod meshing;
pub mod section;

pub use error::{FibrisError, Result};
