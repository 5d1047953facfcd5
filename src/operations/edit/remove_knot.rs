use crate::error::Result;
use crate::geometry::curve::Curve;
use crate::operations::fitting::remove_a_single_knot;

use super::{keep_on_singular, replace_curve, CurveEdit};

/// Removes one interior knot and refits the control points.
///
/// `knot_index` counts interior knots only, so 0 is the first knot after the
/// clamped start. Complex and Pythagorean hodograph curves are returned
/// unchanged.
pub struct RemoveKnot {
    id: String,
    knot_index: usize,
}

impl RemoveKnot {
    /// Creates a new `RemoveKnot` edit.
    #[must_use]
    pub fn new(id: impl Into<String>, knot_index: usize) -> Self {
        Self {
            id: id.into(),
            knot_index,
        }
    }

    /// Executes the edit; the result is appended to the history.
    ///
    /// A singular refit keeps the previous curve.
    ///
    /// # Errors
    ///
    /// Returns an error if `knot_index` is not an interior knot or the stored
    /// curve is malformed.
    pub fn execute(&self, curves: &[Curve]) -> Result<Option<CurveEdit>> {
        replace_curve(curves, &self.id, false, |curve| match curve {
            Curve::NonRational(_) | Curve::Rational(_) => {
                let spline = curve.to_bspline()?;
                let absolute = self.knot_index + spline.degree() + 1;
                let refit = remove_a_single_knot(&spline, absolute).map(|s| curve.with_bspline(&s));
                keep_on_singular(curve, refit)
            }
            Curve::Complex(_) | Curve::PythagoreanHodograph(_) => Ok(curve.clone()),
        })
    }
}
