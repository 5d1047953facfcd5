pub mod bspline;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod persist;

pub use error::{KnotworkError, Result};
pub use geometry::{Coordinates, Curve, CurveData, CurveKind};
