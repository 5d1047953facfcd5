use crate::error::Result;
use crate::geometry::curve::Curve;

use super::{replace_curve, CurveEdit};

/// Raises the degree of a curve by one without changing its shape.
pub struct ElevateDegree {
    id: String,
}

impl ElevateDegree {
    /// Creates a new `ElevateDegree` edit.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Executes the edit; the result is appended to the history.
    ///
    /// # Errors
    ///
    /// Returns an error if the knot vector is not clamped or the stored curve
    /// is malformed.
    pub fn execute(&self, curves: &[Curve]) -> Result<Option<CurveEdit>> {
        replace_curve(curves, &self.id, false, |curve| match curve {
            Curve::NonRational(_) | Curve::Rational(_) | Curve::PythagoreanHodograph(_) => {
                Ok(curve.with_bspline(&curve.to_bspline()?.elevate_degree()?))
            }
            Curve::Complex(_) => Ok(curve.with_rational(&curve.to_rational()?.elevate_degree()?)),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::edit::fixtures::{complex_arc, non_rational};
    use crate::operations::query::points_on_curve;
    use approx::assert_abs_diff_eq;

    #[test]
    fn polynomial_curve_gains_a_degree() {
        let curves = vec![non_rational(
            "c",
            &[(0.0, 0.0), (1.0, 2.0), (2.0, -1.0), (3.0, 0.0)],
            &[0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0],
        )];
        let edit = ElevateDegree::new("c").execute(&curves).unwrap().unwrap();
        assert!(!edit.overwrite);
        assert_eq!(edit.curves[0].degree(), Some(3));
        let before = points_on_curve(&curves[0], 40).unwrap();
        let after = points_on_curve(&edit.curves[0], 40).unwrap();
        for (p, q) in before.iter().zip(&after) {
            assert_abs_diff_eq!(p.distance(q), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn complex_arc_stays_circular() {
        let edit = ElevateDegree::new("arc").execute(&[complex_arc("arc")]).unwrap().unwrap();
        let arc = &edit.curves[0];
        assert_eq!(arc.degree(), Some(2));
        assert_eq!(arc.points().len(), 5);
        for p in points_on_curve(arc, 30).unwrap() {
            assert_abs_diff_eq!((p.x - 1.0).hypot(p.y), 1.0, epsilon = 1e-9);
        }
    }
}
