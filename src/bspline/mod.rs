//! B-spline evaluators and knot-vector algebra.
//!
//! [`BSpline`] is generic over the control point space so the same
//! evaluation, knot insertion, differentiation and degree elevation code
//! serves scalar channels, planar curves and homogeneous complex curves.

mod basis;
mod curve;
mod elevate;
mod knots;
mod rational;

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

use crate::math::{Complex, Vector2};
use crate::math::complex::ComplexMassPoint;

pub use basis::{
    basis_functions, compute_basis_function, range_including_stop_value, span_basis, BasisSample, SpanBasis,
    MAX_RANGE_SAMPLES,
};
pub use curve::BSpline;
pub use knots::{
    distinct_knots, find_span, greville_abscissae, is_clamped, knot_multiplicity,
    spread_coincident_knots, uniform_knots,
};
pub use rational::RationalBSpline;

/// Planar non-rational B-spline.
pub type BSpline2 = BSpline<Vector2>;

/// Scalar B-spline, used for single coordinate channels.
pub type BSpline1 = BSpline<f64>;

/// A value that can be blended by B-spline basis functions.
pub trait ControlPoint:
    Copy + Debug + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;
}

impl ControlPoint for f64 {
    fn zero() -> Self {
        0.0
    }
}

impl ControlPoint for Vector2 {
    fn zero() -> Self {
        Vector2::zeros()
    }
}

impl ControlPoint for Complex {
    fn zero() -> Self {
        Complex::new(0.0, 0.0)
    }
}

impl ControlPoint for ComplexMassPoint {
    fn zero() -> Self {
        ComplexMassPoint::zero()
    }
}
