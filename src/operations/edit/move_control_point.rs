use crate::error::{Result, SplineError};
use crate::geometry::curve::{Coordinates, Curve};

use super::{replace_curve, CurveEdit};

/// Drags one persisted point of a curve.
///
/// For complex curves `index` addresses the interleaved layout, so moving an
/// odd index reshapes the arc through that tangent point. Pythagorean
/// hodograph curves ignore free point moves.
pub struct MoveControlPoint {
    id: String,
    index: usize,
    point: Coordinates,
}

impl MoveControlPoint {
    /// Creates a new `MoveControlPoint` edit.
    #[must_use]
    pub fn new(id: impl Into<String>, index: usize, point: Coordinates) -> Self {
        Self {
            id: id.into(),
            index,
            point,
        }
    }

    /// Executes the edit; the result overwrites the current history entry.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::IndexOutOfRange`] if `index` is past the last
    /// point.
    pub fn execute(&self, curves: &[Curve]) -> Result<Option<CurveEdit>> {
        replace_curve(curves, &self.id, true, |curve| match curve {
            Curve::NonRational(data) | Curve::Rational(data) | Curve::Complex(data) => {
                let len = data.points().len();
                if self.index >= len {
                    return Err(SplineError::IndexOutOfRange { index: self.index, len }.into());
                }
                let mut points = data.points().to_vec();
                points[self.index] = self.point;
                Ok(curve.with_data(data.with_points(points)))
            }
            Curve::PythagoreanHodograph(_) => Ok(curve.clone()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::CurveData;
    use crate::operations::edit::fixtures::{complex_arc, coords, non_rational};

    #[test]
    fn moves_one_point_and_overwrites() {
        let curves = vec![non_rational("a", &[(0.0, 0.0), (1.0, 1.0)], &[0.0, 0.0, 1.0, 1.0])];
        let edit = MoveControlPoint::new("a", 1, Coordinates::new(5.0, 6.0))
            .execute(&curves)
            .unwrap()
            .unwrap();
        assert!(edit.overwrite);
        assert_eq!(edit.curves[0].points()[1], Coordinates::new(5.0, 6.0));
        assert_eq!(edit.curves[0].points()[0], Coordinates::new(0.0, 0.0));
        assert_eq!(curves[0].points()[1], Coordinates::new(1.0, 1.0));
    }

    #[test]
    fn complex_tangent_point_moves() {
        let curves = vec![complex_arc("arc")];
        let edit = MoveControlPoint::new("arc", 1, Coordinates::new(1.0, 2.0))
            .execute(&curves)
            .unwrap()
            .unwrap();
        assert_eq!(edit.curves[0].points()[1], Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn pythagorean_hodograph_is_unchanged() {
        let curves = vec![Curve::PythagoreanHodograph(CurveData::new(
            "ph",
            coords(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]),
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        ))];
        let edit = MoveControlPoint::new("ph", 0, Coordinates::new(9.0, 9.0))
            .execute(&curves)
            .unwrap()
            .unwrap();
        assert_eq!(edit.curves, curves);
    }

    #[test]
    fn index_past_end_is_rejected() {
        let curves = vec![non_rational("a", &[(0.0, 0.0), (1.0, 1.0)], &[0.0, 0.0, 1.0, 1.0])];
        assert!(MoveControlPoint::new("a", 2, Coordinates::default()).execute(&curves).is_err());
    }
}
