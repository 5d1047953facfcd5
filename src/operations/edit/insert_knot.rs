use crate::error::Result;
use crate::geometry::curve::Curve;

use super::{replace_curve, CurveEdit};

/// Inserts a knot without changing the curve shape.
pub struct InsertKnot {
    id: String,
    u: f64,
}

impl InsertKnot {
    /// Creates a new `InsertKnot` edit.
    #[must_use]
    pub fn new(id: impl Into<String>, u: f64) -> Self {
        Self { id: id.into(), u }
    }

    /// Executes the edit; the result is appended to the history.
    ///
    /// # Errors
    ///
    /// Returns an error if `u` lies outside the open domain, if the knot is
    /// already at full multiplicity, or if the stored curve is malformed.
    pub fn execute(&self, curves: &[Curve]) -> Result<Option<CurveEdit>> {
        replace_curve(curves, &self.id, false, |curve| match curve {
            Curve::NonRational(_) | Curve::Rational(_) | Curve::PythagoreanHodograph(_) => {
                Ok(curve.with_bspline(&curve.to_bspline()?.insert_knot(self.u, 1)?))
            }
            Curve::Complex(_) => Ok(curve.with_rational(&curve.to_rational()?.insert_knot(self.u, 1)?)),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{KnotworkError, SplineError};
    use crate::geometry::curve::Coordinates;
    use crate::operations::edit::fixtures::{complex_arc, non_rational};
    use crate::operations::query::point_on_curve;
    use crate::operations::edit::ElevateDegree;
    use approx::assert_abs_diff_eq;

    fn assert_same_points(a: &Curve, b: &Curve) {
        for i in 0..=50 {
            let u = f64::from(i) / 50.0;
            let (p, q) = (point_on_curve(a, u).unwrap(), point_on_curve(b, u).unwrap());
            assert_abs_diff_eq!(p.distance(&q), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn inserts_into_a_polynomial_curve() {
        let curves = vec![non_rational(
            "q",
            &[(0.0, 0.0), (1.0, 2.0), (3.0, 0.0)],
            &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        )];
        let edit = InsertKnot::new("q", 0.5).execute(&curves).unwrap().unwrap();
        assert!(!edit.overwrite);
        assert_eq!(edit.curves[0].knots().len(), 7);
        assert_eq!(edit.curves[0].points().len(), 4);
        assert_eq!(edit.curves[0].points()[1], Coordinates::new(0.5, 1.0));
        assert_same_points(&curves[0], &edit.curves[0]);
    }

    #[test]
    fn inserts_into_a_complex_curve() {
        let elevated = ElevateDegree::new("arc")
            .execute(&[complex_arc("arc")])
            .unwrap()
            .unwrap()
            .curves;
        let edit = InsertKnot::new("arc", 0.3).execute(&elevated).unwrap().unwrap();
        assert_eq!(edit.curves[0].points().len(), elevated[0].points().len() + 2);
        assert_same_points(&elevated[0], &edit.curves[0]);
    }

    #[test]
    fn knot_outside_domain_is_rejected() {
        let curves = vec![non_rational("l", &[(0.0, 0.0), (1.0, 0.0)], &[0.0, 0.0, 1.0, 1.0])];
        assert!(matches!(
            InsertKnot::new("l", 1.0).execute(&curves),
            Err(KnotworkError::Spline(SplineError::InvalidKnotInsertion { .. }))
        ));
    }
}
