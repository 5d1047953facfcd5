//! Shared numeric types and kernels.

pub mod complex;
pub mod linalg;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Complex number type used for planar points and homogeneous weights.
pub type Complex = nalgebra::Complex<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
