use std::ops::Range;

use crate::error::{Result, SplineError};
use crate::geometry::curve::Curve;

use super::{replace_curve, CurveEdit};

/// Drags a knot together with every knot sharing its value.
///
/// The new position is clamped to the closed interval between the
/// neighbouring distinct knot values. Landing on a neighbour merges the two
/// groups only while both are interior and the merged multiplicity stays
/// within the degree; otherwise the knots are left where they were.
pub struct MoveKnot {
    id: String,
    index: usize,
    new_position: f64,
}

impl MoveKnot {
    /// Creates a new `MoveKnot` edit.
    #[must_use]
    pub fn new(id: impl Into<String>, index: usize, new_position: f64) -> Self {
        Self {
            id: id.into(),
            index,
            new_position,
        }
    }

    /// Executes the edit; the result overwrites the current history entry.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfRange`] if `index` is not a knot, and
    /// [`SplineError::InvalidSpline`] if the new position is not finite or
    /// the stored knots are not finite and non-decreasing.
    pub fn execute(&self, curves: &[Curve]) -> Result<Option<CurveEdit>> {
        replace_curve(curves, &self.id, true, |curve| match curve {
            Curve::NonRational(data)
            | Curve::Rational(data)
            | Curve::Complex(data)
            | Curve::PythagoreanHodograph(data) => {
                let degree = curve.degree().unwrap_or(0);
                let knots = move_knot_group(data.knots(), self.index, self.new_position, degree)?;
                Ok(curve.with_data(data.with_knots(knots)))
            }
        })
    }
}

/// Index range of the run of knots equal to `knots[index]`.
#[allow(clippy::float_cmp)]
fn knot_group(knots: &[f64], index: usize) -> Range<usize> {
    let value = knots[index];
    let first = knots[..index].iter().rposition(|&k| k != value).map_or(0, |i| i + 1);
    let last = knots[index..]
        .iter()
        .position(|&k| k != value)
        .map_or(knots.len(), |i| index + i);
    first..last
}

#[allow(clippy::float_cmp)]
fn move_knot_group(knots: &[f64], index: usize, new_position: f64, degree: usize) -> Result<Vec<f64>> {
    if index >= knots.len() {
        return Err(SplineError::IndexOutOfRange {
            index,
            len: knots.len(),
        }
        .into());
    }
    if !new_position.is_finite() {
        return Err(SplineError::InvalidSpline("knot position must be finite".into()).into());
    }
    if knots.iter().any(|k| !k.is_finite()) || knots.windows(2).any(|w| w[1] < w[0]) {
        return Err(SplineError::InvalidSpline("knots must be finite and non-decreasing".into()).into());
    }

    let group = knot_group(knots, index);
    let lower = group.start.checked_sub(1).map(|i| knot_group(knots, i));
    let upper = (group.end < knots.len()).then(|| knot_group(knots, group.end));
    let lower_value = lower.as_ref().map_or(f64::NEG_INFINITY, |g| knots[g.start]);
    let upper_value = upper.as_ref().map_or(f64::INFINITY, |g| knots[g.start]);
    let position = new_position.clamp(lower_value, upper_value);

    let neighbour = if position == lower_value {
        lower
    } else if position == upper_value {
        upper
    } else {
        None
    };
    if let Some(neighbour) = neighbour {
        let at_end = |g: &Range<usize>| g.start == 0 || g.end == knots.len();
        if at_end(&group) || at_end(&neighbour) || group.len() + neighbour.len() > degree {
            tracing::debug!(index, position, "knot drag blocked by its neighbour");
            return Ok(knots.to_vec());
        }
    }

    let mut moved = knots.to_vec();
    moved[group].fill(position);
    Ok(moved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::KnotworkError;
    use crate::operations::edit::fixtures::non_rational;
    use crate::operations::query::{point_on_curve, points_on_curve};
    use approx::assert_abs_diff_eq;

    fn quadratic() -> Vec<Curve> {
        vec![non_rational(
            "q",
            &[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)],
            &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        )]
    }

    #[test]
    fn coincident_knots_move_together() {
        let edit = MoveKnot::new("q", 3, 0.8).execute(&quadratic()).unwrap().unwrap();
        assert!(edit.overwrite);
        assert_eq!(edit.curves[0].knots(), &[0.0, 0.0, 0.0, 0.8, 0.8, 0.8]);
    }

    fn quadratic_with_interior_knot() -> Vec<Curve> {
        vec![non_rational(
            "c",
            &[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)],
            &[0.0, 0.0, 0.0, 0.4, 1.0, 1.0, 1.0],
        )]
    }

    #[test]
    fn knot_does_not_merge_into_an_end_group() {
        let curves = quadratic_with_interior_knot();
        let edit = MoveKnot::new("c", 3, 1.5).execute(&curves).unwrap().unwrap();
        assert_eq!(edit.curves[0].knots(), &[0.0, 0.0, 0.0, 0.4, 1.0, 1.0, 1.0]);
        let edit = MoveKnot::new("c", 3, -0.5).execute(&curves).unwrap().unwrap();
        assert_eq!(edit.curves[0].knots(), &[0.0, 0.0, 0.0, 0.4, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn dragged_curve_still_evaluates() {
        let curves = quadratic_with_interior_knot();
        let edit = MoveKnot::new("c", 3, 0.9).execute(&curves).unwrap().unwrap();
        assert_eq!(edit.curves[0].knots(), &[0.0, 0.0, 0.0, 0.9, 1.0, 1.0, 1.0]);
        let end = point_on_curve(&edit.curves[0], 1.0).unwrap();
        assert_abs_diff_eq!(end.x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(end.y, 1.0, epsilon = 1e-12);
        for p in points_on_curve(&edit.curves[0], 9).unwrap() {
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn interior_groups_merge_up_to_the_degree() {
        let points = [(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0), (4.0, 0.0), (5.0, 1.0)];
        let curves = vec![non_rational(
            "c",
            &points,
            &[0.0, 0.0, 0.0, 0.0, 0.3, 0.6, 1.0, 1.0, 1.0, 1.0],
        )];
        let edit = MoveKnot::new("c", 4, 0.8).execute(&curves).unwrap().unwrap();
        assert_eq!(
            edit.curves[0].knots(),
            &[0.0, 0.0, 0.0, 0.0, 0.6, 0.6, 1.0, 1.0, 1.0, 1.0]
        );

        let curves = vec![non_rational(
            "c",
            &points,
            &[0.0, 0.0, 0.0, 0.3, 0.3, 0.6, 1.0, 1.0, 1.0],
        )];
        let edit = MoveKnot::new("c", 5, 0.1).execute(&curves).unwrap().unwrap();
        assert_eq!(edit.curves[0].knots(), &[0.0, 0.0, 0.0, 0.3, 0.3, 0.6, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn decreasing_knots_are_rejected() {
        let curves = vec![non_rational("a", &[(0.0, 0.0), (1.0, 1.0)], &[0.9, 0.2, 0.5, 1.0])];
        assert!(matches!(
            MoveKnot::new("a", 1, 0.3).execute(&curves),
            Err(KnotworkError::Spline(SplineError::InvalidSpline(_)))
        ));
    }

    #[test]
    fn non_finite_position_is_rejected() {
        assert!(matches!(
            MoveKnot::new("q", 3, f64::NAN).execute(&quadratic()),
            Err(KnotworkError::Spline(SplineError::InvalidSpline(_)))
        ));
        assert!(MoveKnot::new("q", 3, f64::INFINITY).execute(&quadratic()).is_err());
    }

    #[test]
    fn group_is_found_from_any_copy() {
        let edit = MoveKnot::new("q", 1, 0.25).execute(&quadratic()).unwrap().unwrap();
        assert_eq!(edit.curves[0].knots(), &[0.25, 0.25, 0.25, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn missing_knot_index_is_rejected() {
        assert!(MoveKnot::new("q", 6, 0.5).execute(&quadratic()).is_err());
    }
}
